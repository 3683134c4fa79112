use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Direction, TransactionStatus};
use crate::types::{Amount, TransactionId};

/// A synthetic payment record produced after a successful scan.
///
/// Records are created once by the recorder and never mutated afterwards.
/// Field names on the wire follow the session layout (`merchant`, `type`,
/// `description`) so the stored JSON matches what the dashboard reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// `txn-` followed by a random UUID.
    pub id: TransactionId,
    pub amount: Amount,
    /// The other side of the payment.
    #[serde(rename = "merchant")]
    pub counterparty: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub status: TransactionStatus,
    #[serde(rename = "description", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>
}

impl TransactionRecord {
    pub fn completed(amount: Amount, counterparty: &str, direction: Direction, note: Option<String>) -> Self {
        Self {
            id: format!("txn-{}", Uuid::new_v4().simple()),
            amount,
            counterparty: counterparty.to_string(),
            timestamp: Utc::now(),
            direction,
            status: TransactionStatus::Completed,
            note: note.filter(|note| !note.trim().is_empty())
        }
    }

    /// The amount as it affects the balance: positive for incoming, negative for outgoing.
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Incoming => self.amount.value(),
            Direction::Outgoing => -self.amount.value()
        }
    }

    pub fn date(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%d/%m/%Y").to_string()
    }

    pub fn time(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
    }

    /// The note shown in listings, defaulting to "Payment".
    pub fn description(&self) -> &str {
        self.note.as_deref().unwrap_or("Payment")
    }
}
