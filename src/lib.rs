//! Category API - CRUD over categories behind a read-through cache
//!
//! Reads are served from an in-memory cache with sliding and absolute
//! expiration; writes commit to the store and then invalidate affected keys.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
