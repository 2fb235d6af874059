//! Domain and transport models for the category API
//!
//! The [`Category`] entity plus the DTOs used for serializing and
//! deserializing HTTP request and response bodies.

pub mod category;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use category::{Category, CategoryId};
pub use requests::{CreateCategoryRequest, UpdateCategoryRequest};
pub use responses::{
    CategoryDetail, CategorySummary, CreateResponse, ErrorResponse, HealthResponse,
    MessageResponse, StatsResponse,
};
