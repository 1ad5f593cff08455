//! Catalog domain module.
//!
//! This crate contains the movie catalog entity and its validation rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod movie;

pub use movie::{MAX_TITLE_LENGTH, Movie};
