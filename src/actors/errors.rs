use crate::models::ProfileError;
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("Failed to update transaction data: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to update transaction data: {0}")]
    Balance(#[from] ProfileError),
    #[error("Transaction recorder is no longer running")]
    Unavailable
}
