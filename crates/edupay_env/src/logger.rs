//! Structured logging for the gateway layer.
//!
//! Re-exports the `tracing` macros so downstream crates log through
//! `edupay_env::logger`, and provides a subscriber setup for binaries and
//! integration harnesses.

pub use tracing::{debug, error, event, info, instrument, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// The filter is taken from `RUST_LOG` when set, otherwise everything at
/// `info` and above is emitted. Returns an error if a subscriber is
/// already installed.
pub fn setup(
    default_directive: &str,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
}
