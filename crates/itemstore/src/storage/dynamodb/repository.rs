//! DynamoDB repository implementation.
//!
//! Implements [`ItemRepository`] from `itemstore_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use itemstore_core::item::Item;
use itemstore_core::storage::{ItemRepository, Result};

use super::conversions::{attributes_to_item, item_to_attributes};
use super::error::{map_put_item_error, map_scan_error};

/// DynamoDB-based repository over a single table.
///
/// Holds one SDK client for the lifetime of the process. The client is cheap
/// to share and is never reconfigured after construction.
#[derive(Debug, Clone)]
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
    consistent_read: bool,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            consistent_read: false,
        }
    }

    /// Creates a repository using the AWS SDK default configuration chain
    /// (environment, profile, then the Lambda execution role).
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name)
    }

    /// Enables strongly consistent scans.
    pub fn with_consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = consistent_read;
        self
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl ItemRepository for DynamoDbRepository {
    async fn scan(&self) -> Result<Vec<Item>> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .consistent_read(self.consistent_read)
            .send()
            .await
            .map_err(map_scan_error)?;

        // Only the first page is returned; more items remain past the 1 MB limit.
        if result.last_evaluated_key.is_some() {
            tracing::warn!(
                table = %self.table_name,
                scanned = result.scanned_count,
                "Scan stopped at a page boundary, returning partial results"
            );
        }

        let items = result.items.unwrap_or_default();
        items.iter().map(attributes_to_item).collect()
    }

    async fn put(&self, item: &Item) -> Result<()> {
        let attributes = item_to_attributes(item);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(attributes))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }
}
