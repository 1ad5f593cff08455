use chrono::NaiveDate;

use videoshop_core::{Entity, MovieId, RentalId, UserId};

/// Entity: an immutable fact linking a user, a movie and a rental date.
///
/// Rentals come into existence only through
/// [`RentalService::create_rental`](crate::RentalService::create_rental)
/// (the constructor is crate-private) and are never mutated afterwards; the
/// only further lifecycle step is deletion on return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    id: RentalId,
    user_id: UserId,
    movie_id: MovieId,
    rental_date: NaiveDate,
}

impl Rental {
    pub(crate) fn new(user_id: UserId, movie_id: MovieId, rental_date: NaiveDate) -> Self {
        Self {
            id: RentalId::new(),
            user_id,
            movie_id,
            rental_date,
        }
    }

    pub fn id_typed(&self) -> RentalId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    pub fn rental_date(&self) -> NaiveDate {
        self.rental_date
    }

    /// Whole days elapsed between the rental date and `on`, never negative.
    /// A rental taken out today has 0 elapsed days until the next day
    /// boundary.
    pub fn rental_days(&self, on: NaiveDate) -> i64 {
        (on - self.rental_date).num_days().max(0)
    }
}

impl Entity for Rental {
    type Id = RentalId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_rental_has_zero_elapsed_days() {
        let r = Rental::new(UserId::new(), MovieId::new(), date(2024, 3, 10));
        assert_eq!(r.rental_days(date(2024, 3, 10)), 0);
    }

    #[test]
    fn elapsed_days_count_whole_days() {
        let r = Rental::new(UserId::new(), MovieId::new(), date(2024, 3, 10));
        assert_eq!(r.rental_days(date(2024, 3, 11)), 1);
        assert_eq!(r.rental_days(date(2024, 3, 31)), 21);
    }

    #[test]
    fn elapsed_days_never_go_negative() {
        let r = Rental::new(UserId::new(), MovieId::new(), date(2024, 3, 10));
        assert_eq!(r.rental_days(date(2024, 3, 1)), 0);
    }
}
