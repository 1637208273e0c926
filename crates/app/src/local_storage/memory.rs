//! In-memory local storage

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::local_storage::{LocalStorage, LocalStorageError, validate_key};

#[derive(Debug, Default)]
pub struct MemoryLocalStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryLocalStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalStorage for MemoryLocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, LocalStorageError> {
        validate_key(key)?;

        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), LocalStorageError> {
        validate_key(key)?;

        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), LocalStorageError> {
        validate_key(key)?;

        self.items.write().await.remove(key);

        Ok(())
    }
}
