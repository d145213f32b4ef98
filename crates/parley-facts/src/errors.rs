//! Fact store errors.

use thiserror::Error;

/// Errors from the serialize/restore boundary.
///
/// Query and mutation operations never error — malformed filters simply
/// match nothing.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A serialized snapshot could not be encoded or decoded.
    #[error("fact snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
