//! Tracing setup for binaries embedding the adapter.
//!
//! The adapter logs through `tracing` only; installing a subscriber is the
//! host's job.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber.
///
/// Reads `RUST_LOG` env var. Falls back to `default_directives` if unset or
/// invalid. Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=ivrquery=debug ivrquery-server
/// ```
pub fn init(default_directives: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
