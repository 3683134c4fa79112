use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use tokio::time::sleep;
use tracing::{debug, error, info};

use super::errors::ClientError;
use super::models::{AuthenticateRequest, AuthenticateResponse};
use crate::types::random_base36;

const FAILURE_MESSAGE: &str = "Error during biometric authentication";

/// Client for an optional biometric authentication backend.
///
/// Without an endpoint the client runs in simulation mode: every request
/// succeeds after a fixed delay with a mock token.
pub struct BiometricClient {
    http_client: HttpClient,
    endpoint: Option<String>,
    simulation_delay: Duration
}

impl BiometricClient {
    pub fn new(endpoint: Option<String>, simulation_delay: Duration) -> Self {
        let endpoint = endpoint
            .map(|endpoint| endpoint.trim().trim_end_matches('/').to_string())
            .filter(|endpoint| !endpoint.is_empty());

        Self {
            http_client: HttpClient::new(),
            endpoint,
            simulation_delay
        }
    }

    pub fn simulated(simulation_delay: Duration) -> Self {
        Self::new(None, simulation_delay)
    }

    pub fn is_simulated(&self) -> bool {
        self.endpoint.is_none()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Authenticates a scan. Transport and HTTP failures are logged and come
    /// back as an unsuccessful response rather than an error.
    pub async fn authenticate(&self, request: &AuthenticateRequest) -> AuthenticateResponse {
        let Some(endpoint) = &self.endpoint else {
            return self.simulate(request).await;
        };

        info!("Connecting to biometric authentication backend at {endpoint} using scan type {}", request.scan_type);

        match self.post_authenticate(endpoint, request).await {
            Ok(response) => response,
            Err(client_error) => {
                error!("{FAILURE_MESSAGE}: {client_error}");
                AuthenticateResponse::failure(FAILURE_MESSAGE)
            }
        }
    }

    /// `true` only when an endpoint is configured and its health check answers 2xx.
    pub async fn check_health(&self) -> bool {
        let Some(endpoint) = &self.endpoint else {
            return false;
        };

        match self.http_client.get(format!("{endpoint}/health")).headers(Self::create_headers()).send().await {
            Ok(response) => response.status().is_success(),
            Err(client_error) => {
                error!("Backend not available: {client_error}");
                false
            }
        }
    }

    async fn simulate(&self, request: &AuthenticateRequest) -> AuthenticateResponse {
        debug!("No backend endpoint provided, using simulation mode");
        sleep(self.simulation_delay).await;

        AuthenticateResponse {
            success: true,
            message: "Authentication successful (simulated)".to_string(),
            token: Some(format!("mock-jwt-token-{}", random_base36(11))),
            user_id: Some(request.user_id.clone().unwrap_or_else(|| format!("user-{}", random_base36(11))))
        }
    }

    async fn post_authenticate(&self, endpoint: &str, request: &AuthenticateRequest) -> Result<AuthenticateResponse, ClientError> {
        let response = self.http_client
            .post(format!("{endpoint}/authenticate"))
            .headers(Self::create_headers())
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.json::<AuthenticateResponse>().await?)
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}
