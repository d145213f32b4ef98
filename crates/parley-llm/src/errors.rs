//! Model boundary errors.

use thiserror::Error;

/// Failures crossing the model service boundary.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The provider rejected or failed the request.
    #[error("model request failed: {0}")]
    Request(String),

    /// The provider's response could not be interpreted.
    #[error("model response malformed: {0}")]
    MalformedResponse(String),

    /// The service is not configured (e.g. missing credentials).
    #[error("model service unavailable: {0}")]
    Unavailable(String),
}
