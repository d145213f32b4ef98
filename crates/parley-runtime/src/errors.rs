//! Orchestration errors.

use thiserror::Error;

use parley_core::errors::CoreError;
use parley_llm::ModelError;

/// Failures a query can surface to the caller.
///
/// Confidentiality narrowing is never one of these — a filtered-down
/// context is a normal outcome, reported through the response's
/// `privacy_restricted` flag.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The request was malformed and rejected before any model call.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The model service failed. In the plain path this aborts the query;
    /// inside the tool loop individual tool failures never surface here.
    #[error(transparent)]
    Model(#[from] ModelError),
}
