use crate::models::{Direction, TransactionRecord};
use crate::types::TransactionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Numeric overflow applying transaction [{transaction_id}]:[{direction:?}] to the balance of [{name}]")]
    Overflow {
        name: String,
        transaction_id: TransactionId,
        direction: Direction
    },
    #[error("Numeric overflow totalling {direction:?} transactions")]
    TotalOverflow {
        direction: Direction
    }
}

impl ProfileError {
    pub fn overflow(name: &str, record: &TransactionRecord) -> Self {
        Self::Overflow {
            name: name.to_string(),
            transaction_id: record.id.clone(),
            direction: record.direction
        }
    }
}
