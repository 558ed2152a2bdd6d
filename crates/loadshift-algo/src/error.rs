use loadshift_core::LoadshiftError;
use thiserror::Error;

/// Failures that prevent a solve from being attempted at all.
///
/// Infeasible or unbounded models are not errors; they come back as a
/// [`loadshift_core::SolveStatus`] inside a successful outcome.
#[derive(Debug, Clone, Error)]
pub enum SolveError {
    /// The model description is inconsistent (non-finite coefficient, bad handle, ...)
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// The backend rejected the problem or could not be set up
    #[error("solver backend '{backend}' failed: {message}")]
    Backend { backend: String, message: String },

    /// No backend registered under this name
    #[error("unknown solver backend '{0}'")]
    UnknownBackend(String),
}

impl From<SolveError> for LoadshiftError {
    fn from(err: SolveError) -> Self {
        LoadshiftError::SolveInvocation(err.to_string())
    }
}
