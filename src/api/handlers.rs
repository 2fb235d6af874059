//! API Handlers
//!
//! HTTP request handlers for the category endpoints and the operational
//! endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tokio_util::sync::CancellationToken;

use crate::cache::CacheEntryOptions;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    CategoryDetail, CategoryId, CategorySummary, CreateCategoryRequest, CreateResponse,
    HealthResponse, MessageResponse, StatsResponse, UpdateCategoryRequest,
};
use crate::service::{CategoryCache, CategoryService};
use crate::store::CategoryStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Category operations
    pub categories: Arc<CategoryService>,
    /// Cache behind the category service, shared with the sweep task
    pub cache: Arc<CategoryCache>,
    /// Cancelled on shutdown; every request works under a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Creates a new AppState over the given store and cache.
    pub fn new(
        store: Arc<dyn CategoryStore>,
        cache: Arc<CategoryCache>,
        policy: CacheEntryOptions,
    ) -> Self {
        let categories = Arc::new(CategoryService::new(store, cache.clone(), policy));
        Self {
            categories,
            cache,
            shutdown: CancellationToken::new(),
        }
    }

    /// Creates a new AppState with a fresh cache using the configured policy.
    pub fn from_config(config: &Config, store: Arc<dyn CategoryStore>) -> Self {
        Self::new(store, Arc::new(CategoryCache::new()), config.cache_policy())
    }

    fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}

/// Handler for GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategorySummary>>> {
    let items = state.categories.list(&state.request_token()).await?;
    Ok(Json(items))
}

/// Handler for GET /api/categories/:id
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<CategoryDetail>> {
    let detail = state.categories.get_by_id(id, &state.request_token()).await?;
    Ok(Json(detail))
}

/// Handler for POST /api/categories
///
/// An unreadable body is answered with 400 like any other bad request.
pub async fn create_category(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<Json<CreateResponse>> {
    let Json(req) = payload?;
    let created = state.categories.create(req, &state.request_token()).await?;
    Ok(Json(created))
}

/// Handler for PUT /api/categories/:id
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    payload: std::result::Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(req) = payload?;
    let updated = state.categories.update(id, req, &state.request_token()).await?;
    Ok(Json(updated))
}

/// Handler for DELETE /api/categories/:id
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<MessageResponse>> {
    let deleted = state.categories.delete(id, &state.request_token()).await?;
    Ok(Json(deleted))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
