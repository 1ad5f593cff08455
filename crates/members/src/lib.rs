//! Members domain module (registered users of the shop).
//!
//! This crate contains the user entity and its name/birth-date validation
//! rules, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod user;

pub use user::{
    BirthDate, MAX_NAME_LENGTH, MAX_RENTABLE_MOVIES, MAX_USER_AGE_YEARS, PersonName, User,
};
