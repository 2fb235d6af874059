//! Error types for the category API
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use thiserror::Error;

use crate::models::{CategoryId, ErrorResponse};
use crate::store::StoreError;

// == App Error Enum ==
/// Unified error type for the category API.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed input, e.g. an empty category name
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Request is inconsistent with itself, e.g. path and body ids differ
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No category at the requested id
    #[error("Category not found: {0}")]
    NotFound(CategoryId),

    /// Persistence failure, propagated without retry
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The caller cancelled the operation before it completed
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the category API.
pub type Result<T> = std::result::Result<T, AppError>;
