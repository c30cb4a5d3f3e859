use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{Item, ItemPatch};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("item {0} not found")]
    NotFound(u64),
}

#[derive(Debug)]
struct Inner {
    items: Vec<Item>,
    next_id: u64,
}

/// In-memory ordered item collection shared across handlers
///
/// Insertion order is preserved and is also the iteration and search order.
/// Ids start at 1 and are never reused. Each mutation holds the write lock
/// for its whole read-modify-write, so the id counter and the collection
/// always change together.
#[derive(Clone, Debug)]
pub struct ItemStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                items: Vec::new(),
                next_id: 1,
            })),
        }
    }

    pub async fn list(&self) -> Vec<Item> {
        self.inner.read().await.items.clone()
    }

    pub async fn get(&self, id: u64) -> Result<Item, StoreError> {
        self.inner
            .read()
            .await
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn create(&self, patch: ItemPatch) -> Item {
        let mut inner = self.inner.write().await;
        let item = patch.into_item(inner.next_id);
        inner.next_id += 1;
        inner.items.push(item.clone());
        tracing::debug!(id = item.id, "item created");
        item
    }

    pub async fn update(&self, id: u64, patch: ItemPatch) -> Result<Item, StoreError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = patch.apply_to(slot);
        tracing::debug!(id, "item updated");
        Ok(slot.clone())
    }

    /// Remove an item and return it
    pub async fn delete(&self, id: u64) -> Result<Item, StoreError> {
        let mut inner = self.inner.write().await;
        let position = inner
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = inner.items.remove(position);
        tracing::debug!(id, "item deleted");
        Ok(removed)
    }

    /// Case-insensitive substring search over item names
    pub async fn search_by_name(&self, needle: &str) -> Vec<Item> {
        let needle = needle.to_lowercase();
        self.inner
            .read()
            .await
            .items
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
