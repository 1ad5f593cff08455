use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{NaiveDate, Utc};

use videoshop_catalog::Movie;
use videoshop_core::{DomainError, DomainResult, MovieId, RentalId, UserId};
use videoshop_members::{MAX_RENTABLE_MOVIES, User};
use videoshop_pricing::PriceCategory as _;

use crate::outcome::{CreateRentalOutcome, DeleteRentalOutcome, RentalRefusal};
use crate::rental::Rental;
use crate::store::{MovieStore, RentalStore, UserStore};

/// Tunable business policy for the rental orchestration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RentalPolicy {
    /// Refuse a rental once the user already holds this many active rentals.
    /// `None` leaves the limit unenforced.
    pub max_active_rentals: Option<u32>,
}

impl RentalPolicy {
    /// Enforce the shop's standard per-user limit
    /// ([`MAX_RENTABLE_MOVIES`]).
    pub fn with_rental_limit() -> Self {
        Self {
            max_active_rentals: Some(MAX_RENTABLE_MOVIES),
        }
    }
}

/// One mutex per key, created on first use.
///
/// The registry's own lock is held only long enough to look a key up; the
/// per-key mutex guards nothing but ordering, so a poisoned guard is safe to
/// recover.
struct LockRegistry<K> {
    locks: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Eq + Hash> LockRegistry<K> {
    fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn entry(&self, key: K) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key).or_default())
    }
}

/// Orchestrates the rental lifecycle against movie availability.
///
/// The availability check and the transition to `rented` happen under one
/// per-movie mutex, so two concurrent requests for the same movie resolve to
/// exactly one `Created` and one `Refused` — never two rentals for one copy.
/// A per-user mutex serializes updates to the user's rental list the same
/// way. Locks are always taken movie first, then user, which makes the
/// ordering total across all operations.
pub struct RentalService {
    movies: Arc<dyn MovieStore>,
    users: Arc<dyn UserStore>,
    rentals: Arc<dyn RentalStore>,
    policy: RentalPolicy,
    movie_locks: LockRegistry<MovieId>,
    user_locks: LockRegistry<UserId>,
}

impl RentalService {
    pub fn new(
        movies: Arc<dyn MovieStore>,
        users: Arc<dyn UserStore>,
        rentals: Arc<dyn RentalStore>,
    ) -> Self {
        Self::with_policy(movies, users, rentals, RentalPolicy::default())
    }

    pub fn with_policy(
        movies: Arc<dyn MovieStore>,
        users: Arc<dyn UserStore>,
        rentals: Arc<dyn RentalStore>,
        policy: RentalPolicy,
    ) -> Self {
        Self {
            movies,
            users,
            rentals,
            policy,
            movie_locks: LockRegistry::new(),
            user_locks: LockRegistry::new(),
        }
    }

    pub fn policy(&self) -> RentalPolicy {
        self.policy
    }

    /// Rent `movie_id` to `user_id` as of `rental_date`.
    ///
    /// Preconditions (checked under the movie's lock): the user and the
    /// movie exist, the movie is available, the date is not after today,
    /// and the user is under the policy's rental limit if one is set. Any
    /// failed precondition leaves every record untouched and reports a
    /// [`RentalRefusal`]; only store trouble surfaces as an `Err`.
    pub fn create_rental(
        &self,
        user_id: UserId,
        movie_id: MovieId,
        rental_date: NaiveDate,
    ) -> DomainResult<CreateRentalOutcome> {
        let movie_lock = self.movie_locks.entry(movie_id);
        let _movie_held = movie_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let user_lock = self.user_locks.entry(user_id);
        let _user_held = user_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let Some(mut user) = self.users.get_by_id(user_id)? else {
            return Ok(self.refuse(user_id, movie_id, RentalRefusal::UserNotFound));
        };
        let Some(mut movie) = self.movies.get_by_id(movie_id)? else {
            return Ok(self.refuse(user_id, movie_id, RentalRefusal::MovieNotFound));
        };
        if movie.is_rented() {
            return Ok(self.refuse(user_id, movie_id, RentalRefusal::MovieAlreadyRented));
        }
        if rental_date > Utc::now().date_naive() {
            return Ok(self.refuse(user_id, movie_id, RentalRefusal::RentalDateInFuture));
        }
        if let Some(limit) = self.policy.max_active_rentals {
            if user.rentals().len() as u32 >= limit {
                return Ok(self.refuse(
                    user_id,
                    movie_id,
                    RentalRefusal::RentalLimitReached { limit },
                ));
            }
        }

        let rental = Rental::new(user_id, movie_id, rental_date);
        // Flip the movie before recording the rental: a half-applied store
        // failure can only leave the movie unavailable, never double-booked.
        movie.set_rented(true);
        self.movies.save(movie)?;
        self.rentals.save(rental.clone())?;
        user.record_rental(rental.id_typed());
        self.users.save(user)?;

        tracing::info!(
            rental_id = %rental.id_typed(),
            %user_id,
            %movie_id,
            "rental created"
        );
        Ok(CreateRentalOutcome::Created(rental))
    }

    /// Return the rental identified by `rental_id`.
    ///
    /// An unknown id reports [`DeleteRentalOutcome::NotFound`] and changes
    /// nothing. Otherwise the movie transitions back to available, the
    /// rental leaves the user's list and the record is deleted.
    pub fn delete_rental(&self, rental_id: RentalId) -> DomainResult<DeleteRentalOutcome> {
        let Some(rental) = self.rentals.get_by_id(rental_id)? else {
            tracing::debug!(%rental_id, "return refused: rental not found");
            return Ok(DeleteRentalOutcome::NotFound);
        };

        let movie_lock = self.movie_locks.entry(rental.movie_id());
        let _movie_held = movie_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let user_lock = self.user_locks.entry(rental.user_id());
        let _user_held = user_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Re-check under the lock; a concurrent return may have won.
        if !self.rentals.delete(rental_id)? {
            tracing::debug!(%rental_id, "return refused: rental not found");
            return Ok(DeleteRentalOutcome::NotFound);
        }

        let Some(mut movie) = self.movies.get_by_id(rental.movie_id())? else {
            return Err(DomainError::invariant(
                "rental references a movie missing from the store",
            ));
        };
        movie.set_rented(false);
        self.movies.save(movie)?;

        if let Some(mut user) = self.users.get_by_id(rental.user_id())? {
            user.clear_rental(rental_id);
            self.users.save(user)?;
        }

        tracing::info!(
            %rental_id,
            movie_id = %rental.movie_id(),
            "rental returned"
        );
        Ok(DeleteRentalOutcome::Deleted)
    }

    pub fn get_rental(&self, rental_id: RentalId) -> DomainResult<Option<Rental>> {
        self.rentals.get_by_id(rental_id)
    }

    /// All active rentals, oldest first.
    pub fn get_all_rentals(&self) -> DomainResult<Vec<Rental>> {
        self.rentals.get_all()
    }

    pub fn get_all_movies(&self) -> DomainResult<Vec<Movie>> {
        self.movies.get_all()
    }

    /// Movies filtered by availability.
    pub fn get_movies_by_rented(&self, rented: bool) -> DomainResult<Vec<Movie>> {
        Ok(self
            .movies
            .get_all()?
            .into_iter()
            .filter(|m| m.is_rented() == rented)
            .collect())
    }

    /// Total charge across all of the user's active rentals as of `on`.
    pub fn total_charge(&self, user_id: UserId, on: NaiveDate) -> DomainResult<f64> {
        let mut total = 0.0;
        for (rental, movie) in self.rentals_of(user_id)? {
            total += movie.price_category().charge(rental.rental_days(on));
        }
        Ok(total)
    }

    /// Loyalty points across all of the user's active rentals as of `on`.
    pub fn frequent_renter_points(&self, user_id: UserId, on: NaiveDate) -> DomainResult<u32> {
        let mut points = 0;
        for (rental, movie) in self.rentals_of(user_id)? {
            points += movie
                .price_category()
                .frequent_renter_points(rental.rental_days(on));
        }
        Ok(points)
    }

    fn rentals_of(&self, user_id: UserId) -> DomainResult<Vec<(Rental, Movie)>> {
        let user: User = self
            .users
            .get_by_id(user_id)?
            .ok_or_else(DomainError::not_found)?;

        let mut resolved = Vec::with_capacity(user.rentals().len());
        for rental_id in user.rentals() {
            let rental = self.rentals.get_by_id(*rental_id)?.ok_or_else(|| {
                DomainError::invariant("user references a rental missing from the store")
            })?;
            let movie = self.movies.get_by_id(rental.movie_id())?.ok_or_else(|| {
                DomainError::invariant("rental references a movie missing from the store")
            })?;
            resolved.push((rental, movie));
        }
        Ok(resolved)
    }

    fn refuse(
        &self,
        user_id: UserId,
        movie_id: MovieId,
        refusal: RentalRefusal,
    ) -> CreateRentalOutcome {
        tracing::debug!(%user_id, %movie_id, %refusal, "rental refused");
        CreateRentalOutcome::Refused(refusal)
    }
}

impl core::fmt::Debug for RentalService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RentalService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
