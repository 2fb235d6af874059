//! Cache keys and cached value shapes for categories.

use crate::models::{CategoryDetail, CategoryId, CategorySummary};

/// Key of the cached "all categories" list
pub const ALL_CATEGORIES_KEY: &str = "all-categories";

/// Prefix of per-category keys
pub const CATEGORY_KEY_PREFIX: &str = "category-";

/// Returns the cache key of a single category, e.g. `category-42`.
pub fn category_key(id: CategoryId) -> String {
    format!("{}{}", CATEGORY_KEY_PREFIX, id)
}

/// Payload stored in the category cache.
///
/// List and detail views share one keyspace; the variant records which shape
/// a key holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedCategories {
    All(Vec<CategorySummary>),
    One(CategoryDetail),
}
