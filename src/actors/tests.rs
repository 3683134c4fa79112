use super::{RecordRequest, RecorderActor, RecorderError};
use crate::models::{replay_balance, Direction, Role, TransactionStatus, UserProfile};
use crate::storage::{SessionStorage, Storage, StorageError, TRANSACTIONS_KEY, USER_KEY};
use crate::types::Amount;
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

fn seed_profile(storage: &SessionStorage, role: Role, balance: &str) -> Result<()> {
    let profile = UserProfile {
        name: "Demo User".to_string(),
        email: Some("demo@example.com".to_string()),
        mobile: "9876543210".to_string(),
        role,
        balance: Decimal::from_str(balance)?,
        fingerprint: false
    };

    storage.save(USER_KEY, &profile)?;

    Ok(())
}

fn create_request(direction: Direction, amount: &str) -> Result<RecordRequest> {
    Ok(RecordRequest {
        amount: Amount::from_str(amount)?,
        counterparty: "Coffee Shop".to_string(),
        direction,
        note: Some("Latte".to_string())
    })
}

fn stored_balance(storage: &SessionStorage) -> Result<Decimal> {
    let profile: UserProfile = storage.load(USER_KEY)?.ok_or_else(|| anyhow!("Profile missing from storage"))?;
    Ok(profile.balance)
}

#[tokio::test]
async fn test_outgoing_payment_records_transaction_and_debits_balance() -> Result<()> {
    let storage = Arc::new(SessionStorage::new());
    seed_profile(&storage, Role::Customer, "2584.23")?;
    let recorder = RecorderActor::spawn(storage.clone());

    let record = recorder.record(create_request(Direction::Outgoing, "45.99")?).await?;

    let history = recorder.history().await?;

    assert_eq!(history.len(), 1);
    assert_eq!(history[0], record);
    assert_eq!(record.direction, Direction::Outgoing);
    assert_eq!(record.status, TransactionStatus::Completed);
    assert_eq!(record.amount.to_string(), "45.99");
    assert_eq!(stored_balance(&storage)?, Decimal::from_str("2538.24")?);

    Ok(())
}

#[tokio::test]
async fn test_history_is_kept_newest_first() -> Result<()> {
    let storage = Arc::new(SessionStorage::new());
    seed_profile(&storage, Role::Merchant, "0")?;
    let recorder = RecorderActor::spawn(storage.clone());

    let first = recorder.record(create_request(Direction::Incoming, "10.00")?).await?;
    let second = recorder.record(create_request(Direction::Incoming, "20.00")?).await?;

    let history = recorder.history().await?;

    assert_eq!(history.iter().map(|record| record.id.clone()).collect::<Vec<_>>(), vec![second.id, first.id]);
    assert_eq!(stored_balance(&storage)?, Decimal::from_str("30.00")?);

    Ok(())
}

#[tokio::test]
async fn test_record_without_profile_still_appends_history() -> Result<()> {
    let storage = Arc::new(SessionStorage::new());
    let recorder = RecorderActor::spawn(storage.clone());

    recorder.record(create_request(Direction::Outgoing, "8.50")?).await?;

    assert_eq!(recorder.history().await?.len(), 1);
    assert!(storage.get(USER_KEY).is_none());

    Ok(())
}

#[tokio::test]
async fn test_concurrent_submissions_do_not_lose_updates() -> Result<()> {
    let storage = Arc::new(SessionStorage::new());
    seed_profile(&storage, Role::Merchant, "1000.00")?;
    let recorder = RecorderActor::spawn(storage.clone());

    let mut tasks = Vec::new();

    for index in 0..50 {
        let recorder = recorder.clone();
        let direction = if index % 2 == 0 { Direction::Incoming } else { Direction::Outgoing };
        let request = create_request(direction, "3.25")?;

        tasks.push(tokio::spawn(async move { recorder.record(request).await }));
    }

    for task in tasks {
        task.await??;
    }

    let history = recorder.history().await?;

    assert_eq!(history.len(), 50);
    assert_eq!(stored_balance(&storage)?, Decimal::from_str("1000.00")?);
    assert_eq!(replay_balance(Decimal::from_str("1000.00")?, &history), Some(stored_balance(&storage)?));

    Ok(())
}

#[tokio::test]
async fn test_corrupt_history_is_reported_and_nothing_is_written() -> Result<()> {
    let storage = Arc::new(SessionStorage::new());
    seed_profile(&storage, Role::Customer, "100.00")?;
    storage.set(TRANSACTIONS_KEY, "{corrupt".to_string())?;
    let recorder = RecorderActor::spawn(storage.clone());

    let result = recorder.record(create_request(Direction::Outgoing, "10.00")?).await;

    assert!(matches!(result, Err(RecorderError::Storage(StorageError::Parse { .. }))));
    assert_eq!(storage.get(TRANSACTIONS_KEY).as_deref(), Some("{corrupt"));
    assert_eq!(stored_balance(&storage)?, Decimal::from_str("100.00")?);

    Ok(())
}

/// Session storage that refuses every write to the profile key.
struct ProfileWriteFails(SessionStorage);

impl Storage for ProfileWriteFails {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if key == USER_KEY {
            return Err(StorageError::QuotaExceeded { key: key.to_string(), required: value.len(), quota: 0 });
        }

        self.0.set(key, value)
    }

    fn remove(&self, key: &str) {
        self.0.remove(key)
    }
}

#[tokio::test]
async fn test_failed_balance_write_rolls_back_history() -> Result<()> {
    let inner = SessionStorage::new();
    seed_profile(&inner, Role::Customer, "100.00")?;
    let profile_json = inner.get(USER_KEY);
    let storage = Arc::new(ProfileWriteFails(inner));
    let recorder = RecorderActor::spawn(storage.clone());

    let result = recorder.record(create_request(Direction::Outgoing, "10.00")?).await;

    assert!(matches!(result, Err(RecorderError::Storage(StorageError::QuotaExceeded { .. }))));
    assert!(storage.get(TRANSACTIONS_KEY).is_none());
    assert_eq!(storage.get(USER_KEY), profile_json);
    assert!(recorder.history().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_summary_reflects_recorded_transactions() -> Result<()> {
    let storage = Arc::new(SessionStorage::new());
    seed_profile(&storage, Role::Merchant, "500.00")?;
    let recorder = RecorderActor::spawn(storage.clone());

    recorder.record(create_request(Direction::Incoming, "120.50")?).await?;
    recorder.record(create_request(Direction::Outgoing, "20.50")?).await?;

    let summary = recorder.summary().await?;

    assert_eq!(summary.balance, Decimal::from_str("600.00")?);
    assert_eq!(summary.incoming_total, Decimal::from_str("120.50")?);
    assert_eq!(summary.outgoing_total, Decimal::from_str("20.50")?);
    assert_eq!(summary.completed, 2);

    Ok(())
}

#[tokio::test]
async fn test_summary_overflow_is_reported_and_recorder_keeps_running() -> Result<()> {
    let storage = Arc::new(SessionStorage::new());
    seed_profile(&storage, Role::Merchant, "0")?;
    let recorder = RecorderActor::spawn(storage.clone());
    let large = "50000000000000000000000000000";

    recorder.record(create_request(Direction::Incoming, large)?).await?;
    recorder.record(create_request(Direction::Outgoing, large)?).await?;
    recorder.record(create_request(Direction::Incoming, large)?).await?;

    assert!(matches!(recorder.summary().await, Err(RecorderError::Balance(_))));
    assert_eq!(recorder.history().await?.len(), 3);
    assert_eq!(stored_balance(&storage)?, Decimal::from_str(large)?);

    recorder.record(create_request(Direction::Outgoing, "0.01")?).await?;

    assert_eq!(recorder.history().await?.len(), 4);

    Ok(())
}
