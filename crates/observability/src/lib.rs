//! Shared tracing/logging setup for videoshop processes and test harnesses.

use tracing_subscriber::EnvFilter;

/// Install the process-wide tracing subscriber: JSON events, filterable via
/// `RUST_LOG` (default `info`).
///
/// Safe to call multiple times — only the first call installs a subscriber,
/// later calls are no-ops, so every test can call this without coordination.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(false)
        .try_init();
}
