use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please enter a valid 10 digit mobile number, got '{0}'")]
    InvalidMobile(String),
    #[error("Name must be at least 2 characters")]
    InvalidName,
    #[error("Please enter a valid email address, got '{0}'")]
    InvalidEmail(String),
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError)
}
