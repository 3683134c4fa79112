use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Scan was cancelled before it completed")]
    Cancelled
}
