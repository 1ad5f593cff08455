//! Pricing domain module.
//!
//! This crate contains the rental pricing strategies and the registry that
//! resolves a category identifier to its shared strategy instance. Pure
//! business rules — no IO, no HTTP, no storage.

pub mod category;
pub mod registry;

pub use category::{NewRelease, PriceCategory, Regular};
pub use registry::CategoryRegistry;
