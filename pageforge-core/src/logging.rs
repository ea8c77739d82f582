//! Logging bootstrap for PageForge.
//!
//! Initializes a `tracing` subscriber with an environment-driven filter.
//! Call [`init_logging`] once at application startup; subsequent calls are
//! rejected by the global subscriber registry.

use crate::error::CoreError;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// The filter is read from `RUST_LOG`, defaulting to `info` when unset.
pub fn init_logging() -> Result<(), CoreError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| CoreError::LoggingInitialization(e.to_string()))
}

/// Minimal fallback initialization for early-startup error reporting.
///
/// Ignores failures so it is safe to call when [`init_logging`] may already
/// have run.
pub fn init_minimal_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .try_init();
}
