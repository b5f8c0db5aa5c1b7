//! Error types shared by the alignment engine, motif index and session.

use thiserror::Error;

/// Errors reported synchronously by core operations.
///
/// All core operations are deterministic, so a failure will recur identically
/// on retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Empty sequence or motif, malformed scoring scheme, unknown record id.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unrecognized alignment mode.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Operation issued against an object that is not ready for it.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl CoreError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_configuration<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState(message.into())
    }
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
