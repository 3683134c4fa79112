mod errors;
mod profile;
mod summary;
mod transaction;

use serde::{Deserialize, Serialize};

pub use errors::ProfileError;
pub use profile::UserProfile;
pub use summary::{replay_balance, DashboardSummary};
pub use transaction::TransactionRecord;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Failed,
    Scheduled
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Merchant
}

impl Role {
    /// Merchants collect payments, customers send them.
    pub fn direction(&self) -> Direction {
        match self {
            Role::Merchant => Direction::Incoming,
            Role::Customer => Direction::Outgoing
        }
    }

    /// Counterparty label written on payment-request records.
    pub fn counterparty(&self) -> &'static str {
        match self {
            Role::Merchant => "Your Business",
            Role::Customer => "Merchant"
        }
    }
}
