use crate::models::{Direction, ProfileError, TransactionRecord, TransactionStatus};
use rust_decimal::Decimal;

/// Headline figures for the dashboard, derived from the session's records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    pub balance: Decimal,
    pub incoming_total: Decimal,
    pub outgoing_total: Decimal,
    pub completed: usize,
    pub failed: usize,
    pub scheduled: usize
}

impl DashboardSummary {
    /// # Errors
    /// Returns `ProfileError::TotalOverflow` if a direction's total cannot be represented.
    pub fn new(balance: Decimal, records: &[TransactionRecord]) -> Result<Self, ProfileError> {
        let mut summary = Self {
            balance,
            ..Self::default()
        };

        for record in records {
            match record.status {
                TransactionStatus::Completed => {
                    summary.completed += 1;

                    let total = match record.direction {
                        Direction::Incoming => &mut summary.incoming_total,
                        Direction::Outgoing => &mut summary.outgoing_total
                    };

                    *total = total.checked_add(record.amount.value())
                        .ok_or(ProfileError::TotalOverflow { direction: record.direction })?;
                }
                TransactionStatus::Failed => summary.failed += 1,
                TransactionStatus::Scheduled => summary.scheduled += 1
            }
        }

        Ok(summary)
    }
}

/// Replays every completed record on top of `initial`.
///
/// Records are stored newest first, so they are folded in reverse. Returns
/// `None` on overflow.
pub fn replay_balance(initial: Decimal, records: &[TransactionRecord]) -> Option<Decimal> {
    records.iter()
        .rev()
        .filter(|record| record.status == TransactionStatus::Completed)
        .try_fold(initial, |balance, record| balance.checked_add(record.signed_amount()))
}
