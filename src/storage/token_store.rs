use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

const AUTH_TOKEN_KEY: &str = "authToken";

/// Longer-lived storage for the opaque auth token, separate from the session.
///
/// Tokens expire on their own after the configured time-to-live.
pub struct TokenStore {
    cache: Cache<&'static str, String>
}

impl TokenStore {
    pub fn new(time_to_live: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(1)
                .time_to_live(time_to_live)
                .build()
        }
    }

    pub async fn store(&self, token: String) {
        debug!("Storing auth token");
        self.cache.insert(AUTH_TOKEN_KEY, token).await;
    }

    pub async fn token(&self) -> Option<String> {
        self.cache.get(AUTH_TOKEN_KEY).await
    }

    pub async fn clear(&self) {
        self.cache.invalidate(AUTH_TOKEN_KEY).await;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token().await.is_some()
    }
}
