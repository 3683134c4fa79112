mod checkout;
mod errors;
mod payment_flow;
mod routes;

pub use checkout::{Checkout, CheckoutOutcome, PaymentIntent};
pub use errors::FlowError;
pub use payment_flow::{FlowOutcome, FlowStage, PaymentFlow, PaymentForm};
pub use routes::{Redirect, Route};

/// A user-facing message raised by a flow, shown as a toast by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success {
        title: String,
        description: Option<String>
    },
    Error {
        title: String,
        description: Option<String>
    }
}

impl Notification {
    pub fn success(title: &str, description: Option<String>) -> Self {
        Self::Success { title: title.to_string(), description }
    }

    pub fn error(title: &str, description: Option<String>) -> Self {
        Self::Error { title: title.to_string(), description }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error { .. })
    }

    pub fn title(&self) -> &str {
        match self {
            Notification::Success { title, .. } | Notification::Error { title, .. } => title
        }
    }
}
