use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Please enter a valid amount greater than 0")]
    Empty,
    #[error("Invalid amount '{0}': not a number")]
    InvalidFormat(String),
    #[error("Invalid amount '{0}': must be greater than 0")]
    NotPositive(String)
}
