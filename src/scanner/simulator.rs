use std::sync::Arc;
use std::time::Duration;

use tokio::spawn;
use tokio::sync::{oneshot, watch};
use tokio::time::{interval_at, sleep, Instant};
use tracing::{debug, warn};

use crate::scanner::{ScanDecider, ScanError, ScanKind, ScanOutcome, ScanSession, ScanStatus, FULL_PROGRESS};

/// Pacing of the fake progress bar and result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTiming {
    /// Interval between progress steps.
    pub tick: Duration,
    /// Percent added on each tick.
    pub step: u8,
    /// Time from start until the outcome is drawn.
    pub duration: Duration,
    /// Time from the outcome being shown until it is reported.
    pub report_delay: Duration
}

impl Default for ScanTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(120),
            step: 5,
            duration: Duration::from_millis(2400),
            report_delay: Duration::from_millis(1000)
        }
    }
}

pub struct ScanSimulator<D: ScanDecider> {
    decider: Arc<D>,
    timing: ScanTiming
}

impl<D: ScanDecider> ScanSimulator<D> {
    pub fn new(decider: D, timing: ScanTiming) -> Self {
        Self {
            decider: Arc::new(decider),
            timing
        }
    }

    /// Starts a scan in the background and returns a handle to observe, await or cancel it.
    pub fn start(&self, kind: ScanKind) -> ScanHandle {
        let (session_sender, session) = watch::channel(ScanSession::scanning());
        let (outcome_sender, outcome) = oneshot::channel();
        let (cancel, cancel_receiver) = oneshot::channel();

        spawn(run_scan(kind, self.decider.clone(), self.timing, session_sender, outcome_sender, cancel_receiver));

        ScanHandle {
            session,
            outcome,
            cancel: Some(cancel)
        }
    }

    /// Runs a scan to completion.
    pub async fn scan(&self, kind: ScanKind) -> Result<ScanOutcome, ScanError> {
        self.start(kind).wait().await
    }
}

/// A scan in flight. Dropping the handle cancels the scan.
pub struct ScanHandle {
    session: watch::Receiver<ScanSession>,
    outcome: oneshot::Receiver<ScanOutcome>,
    cancel: Option<oneshot::Sender<()>>
}

impl ScanHandle {
    /// The latest status and progress.
    pub fn session(&self) -> ScanSession {
        *self.session.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScanSession> {
        self.session.clone()
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    /// Waits for the outcome, delivered `report_delay` after it was shown.
    pub async fn wait(mut self) -> Result<ScanOutcome, ScanError> {
        self.outcome().await
    }

    /// Waits for the outcome without giving up the handle.
    ///
    /// Dropping the returned future leaves the scan running, so it can be
    /// awaited again. Must not be called again once it has resolved.
    pub async fn outcome(&mut self) -> Result<ScanOutcome, ScanError> {
        (&mut self.outcome).await.map_err(|_| ScanError::Cancelled)
    }
}

async fn run_scan<D: ScanDecider>(
    kind: ScanKind,
    decider: Arc<D>,
    timing: ScanTiming,
    session: watch::Sender<ScanSession>,
    outcome: oneshot::Sender<ScanOutcome>,
    mut cancel: oneshot::Receiver<()>
) {
    debug!("{kind} scan started: {}", kind.scanning_message());

    let deadline = sleep(timing.duration);
    tokio::pin!(deadline);

    let mut ticker = interval_at(Instant::now() + timing.tick, timing.tick);

    loop {
        tokio::select! {
            biased;
            _ = &mut cancel => {
                debug!("{kind} scan cancelled at {}%", session.borrow().progress);
                return;
            }
            _ = &mut deadline => break,
            _ = ticker.tick() => {
                session.send_modify(|current| current.advance(timing.step));
            }
        }
    }

    let result = ScanOutcome::from(decider.decide());

    // Progress is full before the status leaves `Scanning`.
    session.send_modify(|current| current.progress = FULL_PROGRESS);
    session.send_modify(|current| {
        current.status = if result.is_success() { ScanStatus::Success } else { ScanStatus::Failed };
    });

    match result {
        ScanOutcome::Success => debug!("{kind} scan succeeded"),
        ScanOutcome::Failed => warn!("{kind} scan failed")
    }

    tokio::select! {
        biased;
        _ = &mut cancel => {
            debug!("{kind} scan cancelled before reporting");
            return;
        }
        _ = sleep(timing.report_delay) => {}
    }

    let _ = outcome.send(result);
}
