//! Application state with repository-based storage.
//!
//! Built once at startup and shared read-only by every invocation.

use std::sync::Arc;

use itemstore_core::storage::ItemRepository;

use crate::config::{Config, StorageBackend};
use crate::storage::{DynamoDbRepository, InMemoryRepository};

/// Shared application state.
///
/// The repository handle is created before the runtime loop starts and is
/// never replaced, so invocations share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Item repository for the configured table.
    pub item_repo: Arc<dyn ItemRepository>,
}

impl AppState {
    pub fn new(item_repo: Arc<dyn ItemRepository>) -> Self {
        Self { item_repo }
    }

    /// State backed by an empty in-memory repository.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRepository::new()))
    }

    /// Builds the repository selected by `config`.
    pub async fn from_config(config: &Config) -> Self {
        match config.storage {
            StorageBackend::Dynamodb => {
                let repo = DynamoDbRepository::from_env(&config.table_name)
                    .await
                    .with_consistent_read(config.consistent_read);

                tracing::info!(
                    table = repo.table_name(),
                    consistent_read = config.consistent_read,
                    "Using DynamoDB storage"
                );

                Self::new(Arc::new(repo))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage, items are lost when the process exits");
                Self::in_memory()
            }
        }
    }
}
