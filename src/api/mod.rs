//! API Module
//!
//! HTTP handlers and routing for the category REST API.
//!
//! # Endpoints
//! - `GET /api/categories` - List categories
//! - `POST /api/categories` - Create a category
//! - `GET /api/categories/:id` - Get one category
//! - `PUT /api/categories/:id` - Update a category
//! - `DELETE /api/categories/:id` - Delete a category
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
