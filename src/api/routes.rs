//! API Routes
//!
//! Configures the Axum router with all category API endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_category, delete_category, get_category, health_handler, list_categories,
    stats_handler, update_category, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/categories` - List categories
/// - `POST /api/categories` - Create a category
/// - `GET /api/categories/:id` - Get one category
/// - `PUT /api/categories/:id` - Update a category
/// - `DELETE /api/categories/:id` - Delete a category
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
