//! Unified error types for the loadshift workspace
//!
//! [`LoadshiftError`] covers the failure classes that abort work: malformed
//! input bundles (fatal before any scenario runs) and solver invocation
//! failures (fatal for a single scenario). Infeasible or unbounded solves are
//! not errors; they are reported through [`crate::SolveStatus`].

use thiserror::Error;

/// Unified error type for all loadshift operations.
#[derive(Error, Debug)]
pub enum LoadshiftError {
    /// A required input field is missing or a profile has the wrong length
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The model could not be built or the solver could not be invoked
    #[error("solve invocation failed: {0}")]
    SolveInvocation(String),

    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

impl LoadshiftError {
    /// Shorthand for [`LoadshiftError::MalformedInput`].
    pub fn malformed(msg: impl Into<String>) -> Self {
        LoadshiftError::MalformedInput(msg.into())
    }

    pub fn is_malformed_input(&self) -> bool {
        matches!(self, LoadshiftError::MalformedInput(_))
    }
}

/// Convenience type alias for Results using LoadshiftError.
pub type LoadshiftResult<T> = Result<T, LoadshiftError>;

impl From<serde_json::Error> for LoadshiftError {
    fn from(err: serde_json::Error) -> Self {
        LoadshiftError::MalformedInput(err.to_string())
    }
}
