//! Category Service
//!
//! Read-through caching for category reads and invalidate-on-write for
//! category mutations.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::keys::{category_key, CachedCategories, ALL_CATEGORIES_KEY};
use super::CategoryCache;
use crate::cache::CacheEntryOptions;
use crate::error::{AppError, Result};
use crate::models::category::validate_fields;
use crate::models::{
    Category, CategoryDetail, CategoryId, CategorySummary, CreateCategoryRequest, CreateResponse,
    MessageResponse, UpdateCategoryRequest,
};
use crate::store::{CategoryStore, StoreError};

// == Category Service ==
/// Orchestrates category reads and writes over the store and the cache.
///
/// Writes always commit to the store first and evict cache keys second. A
/// failed operation or a cancelled read leaves the cache exactly as it found
/// it. A write cancelled in flight evicts the keys it would have invalidated.
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    cache: Arc<CategoryCache>,
    policy: CacheEntryOptions,
}

impl CategoryService {
    pub fn new(
        store: Arc<dyn CategoryStore>,
        cache: Arc<CategoryCache>,
        policy: CacheEntryOptions,
    ) -> Self {
        Self {
            store,
            cache,
            policy,
        }
    }

    pub fn cache(&self) -> &Arc<CategoryCache> {
        &self.cache
    }

    // == List ==
    /// Returns every category as a summary.
    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<CategorySummary>> {
        if let Some(CachedCategories::All(items)) = self.cache.try_get(ALL_CATEGORIES_KEY) {
            debug!("Cache hit for {}", ALL_CATEGORIES_KEY);
            return Ok(items);
        }
        debug!("Cache miss for {}", ALL_CATEGORIES_KEY);

        let ticket = self.cache.ticket();
        let categories = until_cancelled(cancel, self.store.find_all()).await?;
        let items: Vec<CategorySummary> = categories.iter().map(CategorySummary::from).collect();

        if !self.cache.set_with_ticket(
            ALL_CATEGORIES_KEY,
            CachedCategories::All(items.clone()),
            &self.policy,
            ticket,
        ) {
            debug!("Skipped caching {}: invalidated during fetch", ALL_CATEGORIES_KEY);
        }
        Ok(items)
    }

    // == Get By Id ==
    /// Returns the detail view of one category.
    pub async fn get_by_id(
        &self,
        id: CategoryId,
        cancel: &CancellationToken,
    ) -> Result<CategoryDetail> {
        let key = category_key(id);
        if let Some(CachedCategories::One(detail)) = self.cache.try_get(&key) {
            debug!("Cache hit for {}", key);
            return Ok(detail);
        }
        debug!("Cache miss for {}", key);

        let ticket = self.cache.ticket();
        let category = until_cancelled(cancel, self.store.find_by_id(id))
            .await?
            .ok_or(AppError::NotFound(id))?;
        let detail = CategoryDetail::from(&category);

        if !self.cache.set_with_ticket(
            key.as_str(),
            CachedCategories::One(detail.clone()),
            &self.policy,
            ticket,
        ) {
            debug!("Skipped caching {}: invalidated during fetch", key);
        }
        Ok(detail)
    }

    // == Create ==
    /// Validates and persists a new category, then evicts the list key.
    pub async fn create(
        &self,
        request: CreateCategoryRequest,
        cancel: &CancellationToken,
    ) -> Result<CreateResponse> {
        let category = Category::create(
            request.name.unwrap_or_default(),
            request.description.unwrap_or_default(),
        )?;

        let added = until_cancelled(cancel, self.store.add(&category)).await;
        let id = self.settle_write(added, &[ALL_CATEGORIES_KEY])?;

        // A new id has no item key yet; only the aggregate embeds it.
        self.cache.remove(ALL_CATEGORIES_KEY);
        info!("Created category {}", id);

        Ok(CreateResponse::new(id))
    }

    // == Update ==
    /// Replaces name and description of an existing category.
    ///
    /// `id` is the addressed category; the request body must carry the same id.
    pub async fn update(
        &self,
        id: CategoryId,
        request: UpdateCategoryRequest,
        cancel: &CancellationToken,
    ) -> Result<MessageResponse> {
        if request.id != id {
            warn!("Rejected update: body id {} does not match {}", request.id, id);
            return Err(AppError::BadRequest(format!(
                "Body id {} does not match path id {}",
                request.id, id
            )));
        }
        let name = request.name.unwrap_or_default();
        let description = request.description.unwrap_or_default();
        validate_fields(&name, &description)?;

        let mut category = until_cancelled(cancel, self.store.find_by_id(id))
            .await?
            .ok_or(AppError::NotFound(id))?;
        category.update(name, description)?;

        let saved = until_cancelled(cancel, self.store.save_changes(&category)).await;
        self.settle_write(saved, &[ALL_CATEGORIES_KEY, category_key(id).as_str()])?;

        self.invalidate(id);
        info!("Updated category {}", id);

        Ok(MessageResponse::updated())
    }

    // == Delete ==
    /// Deletes a category. A miss is side-effect free.
    pub async fn delete(&self, id: CategoryId, cancel: &CancellationToken) -> Result<MessageResponse> {
        let deleted = until_cancelled(cancel, self.store.delete_where(id)).await;
        let affected =
            self.settle_write(deleted, &[ALL_CATEGORIES_KEY, category_key(id).as_str()])?;
        if affected == 0 {
            return Err(AppError::NotFound(id));
        }

        self.invalidate(id);
        info!("Deleted category {}", id);

        Ok(MessageResponse::deleted())
    }

    fn invalidate(&self, id: CategoryId) {
        self.cache.remove(ALL_CATEGORIES_KEY);
        self.cache.remove(&category_key(id));
    }

    /// Evicts `keys` when a write was cancelled while in flight.
    ///
    /// The store may have committed before the cancellation won, so the
    /// outcome is unknown and the cached views are dropped.
    fn settle_write<T>(&self, result: Result<T>, keys: &[&str]) -> Result<T> {
        if matches!(result, Err(AppError::Cancelled)) {
            warn!("Write cancelled in flight, evicting {:?}", keys);
            for key in keys {
                self.cache.remove(key);
            }
        }
        result
    }
}

/// Runs a store call unless `cancel` fires first.
async fn until_cancelled<T, F>(cancel: &CancellationToken, operation: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, StoreError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        result = operation => result.map_err(AppError::from),
    }
}
