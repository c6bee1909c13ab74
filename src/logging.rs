//! Tracing setup for the harness's console trace.
//!
//! The per-step trace lines (command being run, files being created or
//! modified, divergence reports) are `info` events and shown by default.
//! `RUST_LOG` overrides the filter for debugging.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `lockstep=info` if unset.
/// Output: stderr, compact format.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lockstep=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
