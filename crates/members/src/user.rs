use chrono::{Months, NaiveDate, Utc};

use videoshop_core::{DomainError, DomainResult, Entity, RentalId, UserId, ValueObject};

/// Maximum length of a family or first name, in characters.
pub const MAX_NAME_LENGTH: usize = 40;

/// Maximum age of a user, in years.
pub const MAX_USER_AGE_YEARS: u32 = 120;

/// Maximum number of movies a user may have rented at the same time.
///
/// Declared here as the business rule names it; whether it is enforced is a
/// policy decision made by the rental orchestration, which defaults to off.
pub const MAX_RENTABLE_MOVIES: u32 = 3;

/// Value object: a person's family or first name.
///
/// Trimmed-non-empty and at most [`MAX_NAME_LENGTH`] characters; every
/// construction re-runs the validation, so a `PersonName` is valid by
/// existence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "name cannot exceed {MAX_NAME_LENGTH} characters"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for PersonName {}

/// Value object: a user's date of birth.
///
/// Must not lie in the future and must be within [`MAX_USER_AGE_YEARS`]
/// years of today. Both bounds are evaluated against the current date at
/// every construction — mutation of a user's birth date goes through here,
/// so the checks run on every change, not just the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub fn new(date: NaiveDate) -> DomainResult<Self> {
        let today = Utc::now().date_naive();
        if date > today {
            return Err(DomainError::validation("birth date cannot be in the future"));
        }
        let oldest = today
            .checked_sub_months(Months::new(MAX_USER_AGE_YEARS * 12))
            .unwrap_or(NaiveDate::MIN);
        if date < oldest {
            return Err(DomainError::validation(format!(
                "birth date cannot be more than {MAX_USER_AGE_YEARS} years ago"
            )));
        }
        Ok(Self(date))
    }

    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl ValueObject for BirthDate {}

/// Entity: a registered user of the shop.
///
/// Carries the ordered list of the user's active rentals (by id, oldest
/// first); the rental orchestration appends on creation and removes on
/// return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: PersonName,
    first_name: PersonName,
    birth_date: BirthDate,
    rentals: Vec<RentalId>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        first_name: impl Into<String>,
        birth_date: NaiveDate,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: UserId::new(),
            name: PersonName::new(name)?,
            first_name: PersonName::new(first_name)?,
            birth_date: BirthDate::new(birth_date)?,
            rentals: Vec::new(),
        })
    }

    pub fn id_typed(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date.as_date()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        self.name = PersonName::new(name)?;
        Ok(())
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) -> DomainResult<()> {
        self.first_name = PersonName::new(first_name)?;
        Ok(())
    }

    pub fn set_birth_date(&mut self, birth_date: NaiveDate) -> DomainResult<()> {
        self.birth_date = BirthDate::new(birth_date)?;
        Ok(())
    }

    /// Active rentals, oldest first.
    pub fn rentals(&self) -> &[RentalId] {
        &self.rentals
    }

    pub fn has_rentals(&self) -> bool {
        !self.rentals.is_empty()
    }

    /// Append a rental to the user's list. Returns the new rental count.
    pub fn record_rental(&mut self, rental_id: RentalId) -> usize {
        self.rentals.push(rental_id);
        self.rentals.len()
    }

    /// Remove a returned rental from the user's list. Returns whether it was
    /// present.
    pub fn clear_rental(&mut self, rental_id: RentalId) -> bool {
        let before = self.rentals.len();
        self.rentals.retain(|id| *id != rental_id);
        self.rentals.len() != before
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
