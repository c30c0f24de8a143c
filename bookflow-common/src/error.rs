//! Common error types for Bookflow

use thiserror::Error;

/// Common result type for Bookflow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Bookflow crates
///
/// The taxonomy follows the workflow's recovery rules:
/// - `Validation` blocks a stage transition and is always recoverable by re-input.
/// - `Persistence` is non-fatal; navigation proceeds and the failure is only flagged.
/// - `Recommendation` is reported to the caller, which owns retry policy.
///
/// Missing branch data (an unset age at a branch point) is never an error;
/// the resolver falls back to the 11+ path instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Stage input failed validation; the transition was not committed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Best-effort partial save failed (never blocks navigation)
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Downstream recommendation request failed
    #[error("Recommendation error: {0}")]
    Recommendation(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal engine error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the user can recover by correcting their input
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
