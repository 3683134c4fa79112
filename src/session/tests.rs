use super::{LoginForm, RegistrationForm, SessionError, SessionManager};
use crate::client::BiometricClient;
use crate::models::Role;
use crate::storage::{SessionStorage, Storage, TokenStore, TRANSACTIONS_KEY, USER_KEY};
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

fn create_manager(client: BiometricClient) -> Result<(Arc<SessionStorage>, SessionManager<SessionStorage>)> {
    let storage = Arc::new(SessionStorage::new());
    let manager = SessionManager::new(
        storage.clone(),
        TokenStore::new(Duration::from_secs(60)),
        Arc::new(client),
        Decimal::from_str("2584.23")?
    );

    Ok((storage, manager))
}

fn registration(role: Role) -> RegistrationForm {
    RegistrationForm {
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        mobile: "9876543210".to_string(),
        role,
        fingerprint: true
    }
}

#[tokio::test(start_paused = true)]
async fn test_login_creates_demo_merchant_and_stores_token() -> Result<()> {
    let (_, manager) = create_manager(BiometricClient::simulated(Duration::from_millis(2000)))?;

    let profile = manager.login(&LoginForm { mobile: " 9876543210 ".to_string(), fingerprint: true }).await?;

    assert_eq!(profile.name, "Demo User");
    assert_eq!(profile.mobile, "9876543210");
    assert_eq!(profile.role, Role::Merchant);
    assert_eq!(profile.balance, Decimal::from_str("2584.23")?);
    assert_eq!(manager.current_user()?, Some(profile));
    assert!(manager.is_authenticated().await);
    assert!(manager.token().await.is_some_and(|token| token.starts_with("mock-jwt-token-")));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_login_rejects_invalid_mobile_without_side_effects() -> Result<()> {
    let (storage, manager) = create_manager(BiometricClient::simulated(Duration::ZERO))?;

    for mobile in ["12345", "98765432101", "98765abcde", ""] {
        let result = manager.login(&LoginForm { mobile: mobile.to_string(), fingerprint: false }).await;

        assert!(matches!(result, Err(SessionError::InvalidMobile(_))));
    }

    assert_eq!(storage.len(), 0);
    assert!(!manager.is_authenticated().await);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_register_stores_profile_for_selected_role() -> Result<()> {
    let (_, manager) = create_manager(BiometricClient::simulated(Duration::ZERO))?;

    let profile = manager.register(&registration(Role::Customer)).await?;
    let stored = manager.current_user()?.ok_or_else(|| anyhow!("Profile missing from session"))?;

    assert_eq!(stored, profile);
    assert_eq!(stored.role, Role::Customer);
    assert_eq!(stored.email.as_deref(), Some("asha@example.com"));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_register_validates_every_field() -> Result<()> {
    let (_, manager) = create_manager(BiometricClient::simulated(Duration::ZERO))?;

    let mut form = registration(Role::Merchant);
    form.name = " A ".to_string();
    assert!(matches!(manager.register(&form).await, Err(SessionError::InvalidName)));

    for email in ["asha", "@example.com", "asha@example", "asha@@example.com", "asha@example."] {
        let mut form = registration(Role::Merchant);
        form.email = email.to_string();
        assert!(matches!(manager.register(&form).await, Err(SessionError::InvalidEmail(_))), "{email} accepted");
    }

    let mut form = registration(Role::Merchant);
    form.mobile = "phone".to_string();
    assert!(matches!(manager.register(&form).await, Err(SessionError::InvalidMobile(_))));

    assert!(manager.current_user()?.is_none());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_logout_clears_profile_history_and_token() -> Result<()> {
    let (storage, manager) = create_manager(BiometricClient::simulated(Duration::ZERO))?;
    manager.register(&registration(Role::Merchant)).await?;
    storage.set(TRANSACTIONS_KEY, "[]".to_string())?;

    manager.logout().await;

    assert!(storage.get(USER_KEY).is_none());
    assert!(storage.get(TRANSACTIONS_KEY).is_none());
    assert!(!manager.is_authenticated().await);

    Ok(())
}

#[tokio::test]
async fn test_failed_backend_authentication_blocks_sign_in() -> Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let endpoint = format!("http://{}", listener.local_addr()?);
    drop(listener);

    let (storage, manager) = create_manager(BiometricClient::new(Some(endpoint), Duration::ZERO))?;

    let result = manager.login(&LoginForm { mobile: "9876543210".to_string(), fingerprint: true }).await;

    assert!(matches!(result, Err(SessionError::AuthenticationFailed(_))));
    assert!(storage.get(USER_KEY).is_none());

    Ok(())
}
