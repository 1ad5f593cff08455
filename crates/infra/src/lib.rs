//! Infrastructure adapters for the videoshop domain.
//!
//! In-memory reference implementations of the store traits, suitable for
//! tests, demos and seed tooling. Durable persistence is a separate
//! collaborator implementing the same traits.

pub mod memory;

pub use memory::{InMemoryMovieStore, InMemoryRentalStore, InMemoryUserStore};
