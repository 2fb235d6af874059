//! In-memory category store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CategoryStore, StoreError};
use crate::models::{Category, CategoryId};

/// Category store kept in process memory.
///
/// Ids start at 1 and are never reused. Each operation holds the table lock
/// for its whole duration, which makes every write atomic.
#[derive(Debug)]
pub struct InMemoryCategoryStore {
    rows: RwLock<BTreeMap<CategoryId, Category>>,
    next_id: AtomicI64,
    lookups: AtomicUsize,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Number of read queries (`find_all` and `find_by_id`) served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Overwrites a row directly, bypassing the service. Simulates an
    /// out-of-band mutation by another process.
    pub async fn put_raw(&self, category: Category) {
        self.rows.write().await.insert(category.id(), category);
    }
}

impl Default for InMemoryCategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn find_all(&self) -> Result<Vec<Category>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn add(&self, category: &Category) -> Result<CategoryId, StoreError> {
        let mut rows = self.rows.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        rows.insert(
            id,
            Category::restore(id, category.name(), category.description()),
        );
        Ok(id)
    }

    async fn save_changes(&self, category: &Category) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&category.id()) {
            Some(row) => {
                *row = category.clone();
                Ok(())
            }
            None => Err(StoreError::Conflict(format!(
                "category {} no longer exists",
                category.id()
            ))),
        }
    }

    async fn delete_where(&self, id: CategoryId) -> Result<u64, StoreError> {
        let removed = self.rows.write().await.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}
