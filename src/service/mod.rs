//! Service Module
//!
//! Category operations with read-through caching and invalidate-on-write.

mod categories;
pub mod keys;

use std::time::Duration;

use crate::cache::{CacheEntryOptions, CacheStore};

pub use categories::CategoryService;
pub use keys::{category_key, CachedCategories, ALL_CATEGORIES_KEY, CATEGORY_KEY_PREFIX};

/// Cache shared by all category operations.
pub type CategoryCache = CacheStore<CachedCategories>;

/// Idle window for cached category views
pub const DEFAULT_SLIDING_EXPIRATION: Duration = Duration::from_secs(10 * 60);

/// Hard lifetime for cached category views
pub const DEFAULT_ABSOLUTE_EXPIRATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Returns the default category cache policy: 10 minutes sliding, 24 hours absolute.
pub fn default_cache_policy() -> CacheEntryOptions {
    CacheEntryOptions::new()
        .with_sliding_expiration(DEFAULT_SLIDING_EXPIRATION)
        .with_absolute_expiration(DEFAULT_ABSOLUTE_EXPIRATION)
}
