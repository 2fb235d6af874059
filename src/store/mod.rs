//! Store Gateway
//!
//! Persistence port consumed by the category service, plus its adapters.

mod memory;
mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Category, CategoryId};

pub use memory::InMemoryCategoryStore;
pub use sqlite::SqliteCategoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Persistence error: {0}")]
    Persistence(String),
    /// A tracked entity no longer matches what is stored
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::from_persistence(err)
    }
}

/// Persistence operations over category rows.
///
/// Every write is committed in its own transaction before the returned future
/// resolves; callers rely on that to order cache invalidation after commit.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Category>, StoreError>;

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    /// Inserts a new category and commits. Returns the store-assigned id.
    async fn add(&self, category: &Category) -> Result<CategoryId, StoreError>;

    /// Commits in-place changes to a previously fetched category.
    ///
    /// Fails with [`StoreError::Conflict`] if the row vanished in the meantime.
    async fn save_changes(&self, category: &Category) -> Result<(), StoreError>;

    /// Deletes the row with the given id. Returns the number of rows affected.
    async fn delete_where(&self, id: CategoryId) -> Result<u64, StoreError>;
}
