use async_trait::async_trait;

use crate::item::Item;

use super::Result;

/// Repository over a single schema-free table.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Reads every item the table returns from one scan.
    ///
    /// No ordering is guaranteed and the result is not paginated.
    async fn scan(&self) -> Result<Vec<Item>>;

    /// Inserts an item, overwriting any item with the same key.
    async fn put(&self, item: &Item) -> Result<()>;
}
