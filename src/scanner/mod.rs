mod decider;
mod errors;
mod simulator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

pub use decider::{FixedDecider, RandomDecider, ScanDecider};
pub use errors::ScanError;
pub use simulator::{ScanHandle, ScanSimulator, ScanTiming};

pub const FULL_PROGRESS: u8 = 100;

/// The biometric modality being faked.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanKind {
    Fingerprint,
    PalmVein
}

impl ScanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanKind::Fingerprint => "fingerprint",
            ScanKind::PalmVein => "palm-vein"
        }
    }

    pub fn scanning_message(&self) -> &'static str {
        match self {
            ScanKind::Fingerprint => "Scanning fingerprint...",
            ScanKind::PalmVein => "Processing palm vein pattern..."
        }
    }
}

impl Display for ScanKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ScanStatus {
    Idle,
    Scanning,
    Success,
    Failed
}

/// What a scanner display shows at any instant.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ScanSession {
    pub status: ScanStatus,
    /// Percent, 0 to 100.
    pub progress: u8
}

impl ScanSession {
    pub fn idle() -> Self {
        Self { status: ScanStatus::Idle, progress: 0 }
    }

    pub fn scanning() -> Self {
        Self { status: ScanStatus::Scanning, progress: 0 }
    }

    fn advance(&mut self, step: u8) {
        self.progress = self.progress.saturating_add(step).min(FULL_PROGRESS);
    }

    pub fn message(&self) -> Option<&'static str> {
        match self.status {
            ScanStatus::Idle | ScanStatus::Scanning => None,
            ScanStatus::Success => Some("Authentication successful"),
            ScanStatus::Failed => Some("Authentication failed")
        }
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::idle()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ScanOutcome {
    Success,
    Failed
}

impl ScanOutcome {
    pub fn is_success(&self) -> bool {
        *self == ScanOutcome::Success
    }
}

impl From<bool> for ScanOutcome {
    fn from(success: bool) -> Self {
        if success { ScanOutcome::Success } else { ScanOutcome::Failed }
    }
}
