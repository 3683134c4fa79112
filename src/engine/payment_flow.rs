use std::mem;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::actors::{RecordRequest, RecorderHandle};
use crate::client::{AuthenticateRequest, BiometricClient, TransactionData};
use crate::engine::{FlowError, Notification, Redirect, Route};
use crate::models::{Role, TransactionRecord};
use crate::scanner::{ScanDecider, ScanError, ScanHandle, ScanKind, ScanSession, ScanSimulator};
use crate::types::Amount;

/// The raw payment form as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    pub amount: String,
    pub description: Option<String>,
    /// Defaults to the role's counterparty label.
    pub counterparty: Option<String>
}

impl PaymentForm {
    pub fn new(amount: &str) -> Self {
        Self {
            amount: amount.to_string(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_counterparty(mut self, counterparty: &str) -> Self {
        self.counterparty = Some(counterparty.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// Authorized and recorded.
    Approved(TransactionRecord),
    /// The scan or authorization failed; nothing was recorded.
    Declined,
    /// Authorized, but the record could not be written.
    StorageFailure
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowStage {
    Form,
    Scanning,
    Complete(FlowOutcome)
}

impl FlowStage {
    pub fn name(&self) -> &'static str {
        match self {
            FlowStage::Form => "form",
            FlowStage::Scanning => "scanning",
            FlowStage::Complete(_) => "complete"
        }
    }
}

#[derive(Debug, Clone)]
struct PaymentDetails {
    amount: Amount,
    counterparty: String,
    note: Option<String>
}

/// The payment request screen: form entry, biometric scan, completion.
///
/// Merchants collect a payment through a scan; customers are authorized by the
/// biometric backend and complete straight away. Dropping the flow cancels a
/// scan in progress.
pub struct PaymentFlow<D: ScanDecider> {
    role: Role,
    recorder: RecorderHandle,
    scanner: Arc<ScanSimulator<D>>,
    client: Arc<BiometricClient>,
    scan_kind: ScanKind,
    redirect_delay: Duration,
    stage: FlowStage,
    pending: Option<PaymentDetails>,
    scan: Option<ScanHandle>,
    notifications: Vec<Notification>
}

impl<D: ScanDecider> PaymentFlow<D> {
    pub fn new(role: Role, recorder: RecorderHandle, scanner: Arc<ScanSimulator<D>>, client: Arc<BiometricClient>, redirect_delay: Duration) -> Self {
        Self {
            role,
            recorder,
            scanner,
            client,
            scan_kind: ScanKind::Fingerprint,
            redirect_delay,
            stage: FlowStage::Form,
            pending: None,
            scan: None,
            notifications: Vec::new()
        }
    }

    pub fn with_scan_kind(mut self, scan_kind: ScanKind) -> Self {
        self.scan_kind = scan_kind;
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn stage(&self) -> &FlowStage {
        &self.stage
    }

    /// Live scanner state while in the `scanning` stage.
    pub fn scan_session(&self) -> Option<ScanSession> {
        self.scan.as_ref().map(ScanHandle::session)
    }

    /// Drains the notifications raised since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    /// Validates the form and moves on to scanning (merchants) or authorization (customers).
    ///
    /// # Errors
    /// `FlowError::Validation` when the amount is not a positive number; the
    /// flow stays on the form and nothing is recorded.
    pub async fn submit(&mut self, form: &PaymentForm) -> Result<&FlowStage, FlowError> {
        if self.stage != FlowStage::Form {
            return Err(FlowError::invalid_transition(self.stage.name(), "submit"));
        }

        let amount = Amount::from_str(&form.amount)?;

        let details = PaymentDetails {
            amount,
            counterparty: form.counterparty.clone()
                .filter(|counterparty| !counterparty.trim().is_empty())
                .unwrap_or_else(|| self.role.counterparty().to_string()),
            note: form.description.clone()
        };

        match self.role {
            Role::Merchant => {
                debug!("Payment request of {} submitted, starting {} scan", details.amount, self.scan_kind);
                self.pending = Some(details);
                self.scan = Some(self.scanner.start(self.scan_kind));
                self.stage = FlowStage::Scanning;
            },
            Role::Customer => {
                debug!("Payment of {} to [{}] submitted, authorizing", details.amount, details.counterparty);
                self.authorize(details).await;
            }
        }

        Ok(&self.stage)
    }

    /// Waits for the running scan and completes the flow with its outcome.
    ///
    /// If this future is dropped early the scan keeps running and the flow
    /// stays in `scanning`, so the wait can be resumed.
    pub async fn await_scan(&mut self) -> Result<&FlowStage, FlowError> {
        let Some(handle) = self.scan.as_mut() else {
            return Err(FlowError::invalid_transition(self.stage.name(), "await a scan"));
        };

        let result = handle.outcome().await;
        self.scan = None;

        match result {
            Ok(outcome) => self.scan_complete(outcome.is_success()).await,
            Err(ScanError::Cancelled) => {
                self.pending = None;
                self.stage = FlowStage::Form;
                Err(ScanError::Cancelled.into())
            }
        }
    }

    /// Completes the `scanning` stage with a scan result.
    pub async fn scan_complete(&mut self, success: bool) -> Result<&FlowStage, FlowError> {
        if self.stage != FlowStage::Scanning {
            return Err(FlowError::invalid_transition(self.stage.name(), "complete a scan"));
        }

        self.scan = None;

        let Some(details) = self.pending.take() else {
            return Err(FlowError::invalid_transition(self.stage.name(), "complete a scan"));
        };

        if success {
            self.record(details).await;
        } else {
            self.decline(&format!("Please try scanning your {} again", self.scan_kind_label()));
        }

        Ok(&self.stage)
    }

    /// Abandons the running scan and returns to the form.
    pub fn cancel(&mut self) -> Result<&FlowStage, FlowError> {
        if self.stage != FlowStage::Scanning {
            return Err(FlowError::invalid_transition(self.stage.name(), "cancel"));
        }

        if let Some(mut handle) = self.scan.take() {
            handle.cancel();
        }

        debug!("Payment scan cancelled");
        self.pending = None;
        self.stage = FlowStage::Form;

        Ok(&self.stage)
    }

    /// "Create new": back to an empty form after completion.
    pub fn reset(&mut self) -> Result<&FlowStage, FlowError> {
        if !matches!(self.stage, FlowStage::Complete(_)) {
            return Err(FlowError::invalid_transition(self.stage.name(), "reset"));
        }

        self.stage = FlowStage::Form;

        Ok(&self.stage)
    }

    /// After an approved payment the dashboard opens automatically.
    pub fn redirect(&self) -> Option<Redirect> {
        match self.stage {
            FlowStage::Complete(FlowOutcome::Approved(_)) => Some(Redirect {
                route: Route::Dashboard,
                after: self.redirect_delay
            }),
            _ => None
        }
    }

    async fn authorize(&mut self, details: PaymentDetails) {
        let request = AuthenticateRequest::new(self.scan_kind).with_transaction(TransactionData {
            amount: details.amount,
            merchant_id: details.counterparty.clone(),
            description: details.note.clone()
        });

        let response = self.client.authenticate(&request).await;

        if response.success {
            self.record(details).await;
        } else {
            self.decline(&response.message);
        }
    }

    async fn record(&mut self, details: PaymentDetails) {
        let request = RecordRequest {
            amount: details.amount,
            counterparty: details.counterparty,
            direction: self.role.direction(),
            note: details.note
        };

        match self.recorder.record(request).await {
            Ok(record) => {
                info!("Payment [{}] of {} approved", record.id, record.amount);
                self.notifications.push(Notification::success("Transaction data updated successfully", None));
                self.stage = FlowStage::Complete(FlowOutcome::Approved(record));
            },
            Err(recorder_error) => {
                error!("Error updating transaction data: {recorder_error}");
                self.notifications.push(Notification::error("Failed to update transaction data", None));
                self.stage = FlowStage::Complete(FlowOutcome::StorageFailure);
            }
        }
    }

    fn decline(&mut self, description: &str) {
        warn!("Payment declined: {description}");
        self.notifications.push(Notification::error("Authentication failed", Some(description.to_string())));
        self.stage = FlowStage::Complete(FlowOutcome::Declined);
    }

    fn scan_kind_label(&self) -> &'static str {
        match self.scan_kind {
            ScanKind::Fingerprint => "fingerprint",
            ScanKind::PalmVein => "palm"
        }
    }
}
