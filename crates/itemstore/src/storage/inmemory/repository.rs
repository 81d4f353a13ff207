//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use itemstore_core::item::Item;
use itemstore_core::storage::{ItemRepository, RepositoryError, Result};

/// Partition key attribute used by [`InMemoryRepository::new`].
pub const DEFAULT_KEY_ATTRIBUTE: &str = "id";

/// In-memory storage backend.
///
/// Items are keyed by a single partition attribute, like a DynamoDB table
/// with a hash key only. Writes with an existing key overwrite. Data is not
/// persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    key_attribute: String,
    items: Arc<RwLock<BTreeMap<String, Item>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty repository keyed on `id`.
    pub fn new() -> Self {
        Self::with_key_attribute(DEFAULT_KEY_ATTRIBUTE)
    }

    /// Creates a new empty repository keyed on `key_attribute`.
    pub fn with_key_attribute(key_attribute: impl Into<String>) -> Self {
        Self {
            key_attribute: key_attribute.into(),
            items: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Number of stored items.
    #[cfg(test)]
    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }

    /// Storage key for `item`, rejecting items a hash-keyed table would reject.
    fn storage_key(&self, item: &Item) -> Result<String> {
        match item.get(&self.key_attribute) {
            Some(Value::String(s)) if !s.is_empty() => Ok(format!("S#{s}")),
            Some(Value::Number(n)) => Ok(format!("N#{n}")),
            Some(_) => Err(RepositoryError::Validation(format!(
                "Key attribute {} must be a non-empty string or a number",
                self.key_attribute
            ))),
            None => Err(RepositoryError::Validation(format!(
                "Missing the key {} in the item",
                self.key_attribute
            ))),
        }
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn scan(&self) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }

    async fn put(&self, item: &Item) -> Result<()> {
        let key = self.storage_key(item)?;
        let mut items = self.items.write().await;
        items.insert(key, item.clone());
        Ok(())
    }
}
