//! Inventory domain module.
//!
//! This crate tracks how many physical copies of each title the shop holds
//! and fans out low-stock notifications to registered listeners. Per-title
//! counters are independent of per-copy rental identity.

pub mod stock;

pub use stock::{LowStockListener, Stock, StockError};
