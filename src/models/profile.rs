use crate::models::errors::ProfileError;
use crate::models::{Direction, Role, TransactionRecord, TransactionStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The signed-in user as stored under the `user` session key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub mobile: String,
    #[serde(rename = "userType")]
    pub role: Role,
    /// Running balance, adjusted by every completed transaction.
    pub balance: Decimal,
    /// Whether fingerprint sign-in was enabled at registration.
    #[serde(default)]
    pub fingerprint: bool
}

impl UserProfile {
    /// Applies a transaction to the running balance.
    ///
    /// Only `completed` records move money; failed and scheduled records are
    /// accepted and leave the balance untouched. There is no funds check, so an
    /// outgoing payment may take the balance below zero.
    ///
    /// # Errors
    /// Returns `ProfileError::Overflow` if the new balance cannot be represented.
    pub fn apply(&mut self, record: &TransactionRecord) -> Result<(), ProfileError> {
        if record.status != TransactionStatus::Completed {
            return Ok(())
        }

        let amount = record.amount.value();

        let balance = match record.direction {
            Direction::Incoming => self.balance.checked_add(amount),
            Direction::Outgoing => self.balance.checked_sub(amount)
        };

        self.balance = balance.ok_or_else(|| ProfileError::overflow(&self.name, record))?;

        Ok(())
    }
}
