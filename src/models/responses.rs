//! Response DTOs for the category API
//!
//! Defines the projected category views and the outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::models::{Category, CategoryId};

/// Resource name used in success messages
pub const RESOURCE_NAME: &str = "Category";

/// List view of a category (GET /api/categories)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_string(),
        }
    }
}

/// Detail view of a category (GET /api/categories/:id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
}

impl From<&Category> for CategoryDetail {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_string(),
            description: category.description().to_string(),
        }
    }
}

/// Response body for POST /api/categories
#[derive(Debug, Clone, Serialize)]
pub struct CreateResponse {
    /// Store-assigned id of the new category
    pub id: CategoryId,
    pub message: String,
}

impl CreateResponse {
    pub fn new(id: CategoryId) -> Self {
        Self {
            id,
            message: format!("{} created successfully", RESOURCE_NAME),
        }
    }
}

/// Response body for PUT and DELETE on /api/categories/:id
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn updated() -> Self {
        Self {
            message: format!("{} updated successfully", RESOURCE_NAME),
        }
    }

    pub fn deleted() -> Self {
        Self {
            message: format!("{} deleted successfully", RESOURCE_NAME),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub invalidations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
