use crate::scanner::ScanError;
use crate::types::AmountError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("{0}")]
    Validation(#[from] AmountError),
    #[error("Cannot {action} while the payment flow is in the {stage} stage")]
    InvalidTransition {
        stage: &'static str,
        action: &'static str
    },
    #[error("{0}")]
    Scan(#[from] ScanError)
}

impl FlowError {
    pub fn invalid_transition(stage: &'static str, action: &'static str) -> Self {
        Self::InvalidTransition { stage, action }
    }
}
