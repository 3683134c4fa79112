use serde::{Deserialize, Serialize};

use crate::scanner::ScanKind;
use crate::types::{Amount, UserId};

/// Body of `POST {endpoint}/authenticate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    pub scan_type: ScanKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_data: Option<TransactionData>,
    /// Base64 image, when a camera frame is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>
}

impl AuthenticateRequest {
    pub fn new(scan_type: ScanKind) -> Self {
        Self {
            scan_type,
            user_id: None,
            transaction_data: None,
            image_data: None
        }
    }

    pub fn with_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_transaction(mut self, transaction_data: TransactionData) -> Self {
        self.transaction_data = Some(transaction_data);
        self
    }

    pub fn with_image(mut self, image_data: impl Into<String>) -> Self {
        self.image_data = Some(image_data.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    pub amount: Amount,
    pub merchant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>
}

impl AuthenticateResponse {
    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            token: None,
            user_id: None
        }
    }
}
