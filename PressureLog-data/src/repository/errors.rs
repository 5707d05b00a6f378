use thiserror::Error;

use crate::store::StoreError;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Store failure, passed through unchanged
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Snapshot could not be encoded or decoded
    #[error("Serialization error for key {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RepositoryError {
    /// Whether the error came from a malformed snapshot rather than the store
    pub fn is_corrupt_snapshot(&self) -> bool {
        matches!(self, RepositoryError::Serialization { .. })
    }
}
