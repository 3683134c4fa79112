use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::client::{AuthenticateRequest, BiometricClient};
use crate::models::{Role, UserProfile};
use crate::scanner::ScanKind;
use crate::session::{LoginForm, RegistrationForm, SessionError};
use crate::storage::{Storage, TokenStore, TRANSACTIONS_KEY, USER_KEY};

const DEMO_USER_NAME: &str = "Demo User";

/// Mocked sign-in. Profiles live in session storage, tokens in the token store.
pub struct SessionManager<S: Storage> {
    storage: Arc<S>,
    tokens: TokenStore,
    client: Arc<BiometricClient>,
    initial_balance: Decimal
}

impl<S: Storage> SessionManager<S> {
    pub fn new(storage: Arc<S>, tokens: TokenStore, client: Arc<BiometricClient>, initial_balance: Decimal) -> Self {
        Self {
            storage,
            tokens,
            client,
            initial_balance
        }
    }

    /// Signs in the demo merchant account.
    pub async fn login(&self, form: &LoginForm) -> Result<UserProfile, SessionError> {
        form.validate()?;

        let profile = UserProfile {
            name: DEMO_USER_NAME.to_string(),
            email: None,
            mobile: form.mobile.trim().to_string(),
            role: Role::Merchant,
            balance: self.initial_balance,
            fingerprint: form.fingerprint
        };

        self.sign_in(profile).await
    }

    /// Creates an account from the registration form and signs it in.
    pub async fn register(&self, form: &RegistrationForm) -> Result<UserProfile, SessionError> {
        form.validate()?;

        let profile = UserProfile {
            name: form.name.trim().to_string(),
            email: Some(form.email.trim().to_string()),
            mobile: form.mobile.trim().to_string(),
            role: form.role,
            balance: self.initial_balance,
            fingerprint: form.fingerprint
        };

        self.sign_in(profile).await
    }

    pub fn current_user(&self) -> Result<Option<UserProfile>, SessionError> {
        Ok(self.storage.load(USER_KEY)?)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated().await
    }

    pub async fn token(&self) -> Option<String> {
        self.tokens.token().await
    }

    /// Ends the session: profile, history and token are all discarded.
    pub async fn logout(&self) {
        self.storage.remove(USER_KEY);
        self.storage.remove(TRANSACTIONS_KEY);
        self.tokens.clear().await;

        info!("Signed out");
    }

    async fn sign_in(&self, profile: UserProfile) -> Result<UserProfile, SessionError> {
        let request = AuthenticateRequest::new(ScanKind::Fingerprint).with_user(profile.mobile.clone());
        let response = self.client.authenticate(&request).await;

        if !response.success {
            warn!("Sign in for [{}] rejected: {}", profile.mobile, response.message);
            return Err(SessionError::AuthenticationFailed(response.message));
        }

        self.storage.save(USER_KEY, &profile)?;

        if let Some(token) = response.token {
            self.tokens.store(token).await;
        }

        info!("Signed in [{}] as {:?}", profile.name, profile.role);

        Ok(profile)
    }
}
