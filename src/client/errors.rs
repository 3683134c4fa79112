use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("Biometric backend request failed: {0}")]
    Http(#[from] reqwest::Error)
}
