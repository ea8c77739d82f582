//! Error handling for the PageForge core layer.
//!
//! The main error type for this crate is [`CoreError`]. Higher layers define
//! their own error enums and wrap `CoreError` where infrastructure failures
//! can surface.

use thiserror::Error;

/// Core error type for PageForge infrastructure failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors that occur during initialization of the logging system.
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),

    /// General I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failures at the infrastructure level.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An internal invariant was violated.
    #[error("Internal error: {0}")]
    Internal(String),
}
