use core::fmt;

use crate::rental::Rental;

/// Why a rental request was declined.
///
/// These are business refusals, not errors: the inputs were well-formed but
/// the operation's preconditions did not hold. Contention on a popular movie
/// makes them a frequent, cheap outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RentalRefusal {
    UserNotFound,
    MovieNotFound,
    MovieAlreadyRented,
    RentalDateInFuture,
    RentalLimitReached { limit: u32 },
}

impl fmt::Display for RentalRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserNotFound => f.write_str("user does not exist"),
            Self::MovieNotFound => f.write_str("movie does not exist"),
            Self::MovieAlreadyRented => f.write_str("movie is already rented"),
            Self::RentalDateInFuture => f.write_str("rental date lies in the future"),
            Self::RentalLimitReached { limit } => {
                write!(f, "user already holds {limit} active rentals")
            }
        }
    }
}

/// Outcome of a rental-creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRentalOutcome {
    Created(Rental),
    Refused(RentalRefusal),
}

impl CreateRentalOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// The created rental, if any.
    pub fn created(self) -> Option<Rental> {
        match self {
            Self::Created(rental) => Some(rental),
            Self::Refused(_) => None,
        }
    }

    /// The refusal, if any.
    pub fn refusal(&self) -> Option<&RentalRefusal> {
        match self {
            Self::Created(_) => None,
            Self::Refused(refusal) => Some(refusal),
        }
    }
}

/// Outcome of a rental-return request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRentalOutcome {
    Deleted,
    NotFound,
}
