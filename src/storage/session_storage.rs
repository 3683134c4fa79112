use crate::storage::{Storage, StorageError};
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory stand-in for browser session storage.
///
/// An optional byte quota mirrors the browser limit; a write that would take
/// the total size of keys and values past it fails without touching the store.
pub struct SessionStorage {
    cache: Arc<DashMap<String, String>>,
    quota: Option<usize>
}

impl SessionStorage {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
            quota: None
        }
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
            quota: Some(quota)
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    fn used_excluding(&self, key: &str) -> usize {
        self.cache.iter()
            .filter(|entry| entry.key() != key)
            .map(|entry| entry.key().len() + entry.value().len())
            .sum()
    }
}

impl Default for SessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for SessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let required = self.used_excluding(key) + key.len() + value.len();

            if required > quota {
                return Err(StorageError::QuotaExceeded { key: key.to_string(), required, quota });
            }
        }

        self.cache.insert(key.to_string(), value);

        Ok(())
    }

    fn remove(&self, key: &str) {
        self.cache.remove(key);
    }
}
