mod errors;
mod export;
mod session_storage;
mod token_store;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use errors::StorageError;
pub use export::write_transactions;
pub use session_storage::SessionStorage;
pub use token_store::TokenStore;

pub const USER_KEY: &str = "user";
pub const TRANSACTIONS_KEY: &str = "transactions";

/// A session-scoped string key/value store.
pub trait Storage: Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&self, key: &str);

    /// Reads and parses a JSON value, `None` when the key is absent.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> where Self: Sized {
        match self.get(key) {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::parse(key, source)),
            None => Ok(None)
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> where Self: Sized {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::serialize(key, source))?;
        self.set(key, raw)
    }
}
