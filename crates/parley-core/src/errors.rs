//! Core error hierarchy.

use thiserror::Error;

/// Errors surfaced by the foundation layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A request field was missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),
}
