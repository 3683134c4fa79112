use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::actors::{RecordRequest, RecorderHandle};
use crate::engine::{FlowError, Notification, Redirect, Route};
use crate::models::{Direction, TransactionRecord};
use crate::scanner::{ScanDecider, ScanKind, ScanSimulator};
use crate::types::{random_base36, Amount, AmountError};

const DEMO_MERCHANTS: [&str; 5] = ["Coffee Shop", "Grocery Store", "Electronics Store", "Restaurant", "Gas Station"];
const DEMO_AMOUNTS_PAISE: [i64; 5] = [1299, 4567, 12345, 850, 3500];
const BANKS: [&str; 5] = ["SBI", "HDFC", "ICICI", "Axis", "PNB"];

/// A pending scan-to-pay purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    /// `TX` followed by eight uppercase base-36 characters.
    pub id: String,
    pub amount: Amount,
    pub merchant: String,
    pub bank: String,
    pub date: DateTime<Utc>
}

impl PaymentIntent {
    /// Builds an intent from `?amount=&merchant=` query values.
    ///
    /// A missing or non-positive amount, or a blank merchant, falls back to a
    /// random demo purchase.
    pub fn from_query(amount: Option<&str>, merchant: Option<&str>) -> Result<Self, AmountError> {
        let amount = amount.and_then(|amount| Amount::from_str(amount).ok());
        let merchant = merchant.map(str::trim).filter(|merchant| !merchant.is_empty());

        match (amount, merchant) {
            (Some(amount), Some(merchant)) => Ok(Self::new(amount, merchant)),
            _ => Self::demo()
        }
    }

    /// A random purchase from the demo catalogue.
    pub fn demo() -> Result<Self, AmountError> {
        let mut rng = rand::thread_rng();
        let merchant = DEMO_MERCHANTS[rng.gen_range(0..DEMO_MERCHANTS.len())];
        let amount = Amount::try_from(Decimal::new(DEMO_AMOUNTS_PAISE[rng.gen_range(0..DEMO_AMOUNTS_PAISE.len())], 2))?;

        Ok(Self::new(amount, merchant))
    }

    pub fn new(amount: Amount, merchant: &str) -> Self {
        let mut rng = rand::thread_rng();

        Self {
            id: format!("TX{}", random_base36(8).to_uppercase()),
            amount,
            merchant: merchant.to_string(),
            bank: BANKS[rng.gen_range(0..BANKS.len())].to_string(),
            date: Utc::now()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    Approved {
        intent: PaymentIntent,
        record: TransactionRecord,
        redirect: Redirect
    },
    /// The scan failed. The same intent can be paid again.
    Declined {
        intent: PaymentIntent,
        kind: ScanKind
    },
    StorageFailure {
        intent: PaymentIntent
    }
}

impl CheckoutOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, CheckoutOutcome::Approved { .. })
    }

    pub fn notification(&self) -> Notification {
        match self {
            CheckoutOutcome::Approved { intent, .. } => Notification::success(
                "Payment authorized successfully!",
                Some(format!("{} paid to {}", intent.amount, intent.merchant))
            ),
            CheckoutOutcome::Declined { kind, .. } => Notification::error(
                "Authentication failed",
                Some(match kind {
                    ScanKind::Fingerprint => "Please try scanning your fingerprint again".to_string(),
                    ScanKind::PalmVein => "Please try scanning your palm again".to_string()
                })
            ),
            CheckoutOutcome::StorageFailure { .. } => Notification::error("Failed to update transaction data", None)
        }
    }
}

/// The fingerprint and palm-vein payment screens: scan, then pay the merchant.
pub struct Checkout<D: ScanDecider> {
    recorder: RecorderHandle,
    scanner: Arc<ScanSimulator<D>>,
    redirect_delay: Duration
}

impl<D: ScanDecider> Checkout<D> {
    pub fn new(recorder: RecorderHandle, scanner: Arc<ScanSimulator<D>>, redirect_delay: Duration) -> Self {
        Self {
            recorder,
            scanner,
            redirect_delay
        }
    }

    /// Scans and, on success, records an outgoing payment to the intent's merchant.
    pub async fn pay(&self, intent: PaymentIntent, kind: ScanKind) -> Result<CheckoutOutcome, FlowError> {
        let outcome = self.scanner.scan(kind).await?;

        if !outcome.is_success() {
            warn!("Checkout [{}] declined by {kind} scan", intent.id);
            return Ok(CheckoutOutcome::Declined { intent, kind });
        }

        let request = RecordRequest {
            amount: intent.amount,
            counterparty: intent.merchant.clone(),
            direction: Direction::Outgoing,
            note: Some(format!("Paid via {}", intent.bank))
        };

        match self.recorder.record(request).await {
            Ok(record) => {
                info!("Checkout [{}] paid {} to [{}]", intent.id, intent.amount, intent.merchant);

                Ok(CheckoutOutcome::Approved {
                    intent,
                    record,
                    redirect: Redirect { route: Route::Dashboard, after: self.redirect_delay }
                })
            },
            Err(recorder_error) => {
                warn!("Checkout [{}] authorized but not recorded: {recorder_error}", intent.id);
                Ok(CheckoutOutcome::StorageFailure { intent })
            }
        }
    }
}
