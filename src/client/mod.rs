mod biometric_client;
mod errors;
mod models;

pub use biometric_client::BiometricClient;
pub use errors::ClientError;
pub use models::{AuthenticateRequest, AuthenticateResponse, TransactionData};
