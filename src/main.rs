//! Category API - CRUD over categories behind a read-through cache
//!
//! Serves the category endpoints over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use category_api::api::create_router;
use category_api::store::{CategoryStore, InMemoryCategoryStore, SqliteCategoryStore};
use category_api::{spawn_cleanup_task, AppState, Config};

/// Main entry point for the category API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the category store (SQLite when `DATABASE_URL` is set)
/// 4. Create the cache and category service
/// 5. Start background cache sweep task
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "category_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Category API server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cleanup_interval={}s, cache_sliding={}s, cache_absolute={}s",
        config.server_port,
        config.cleanup_interval,
        config.cache_sliding_secs,
        config.cache_absolute_secs
    );

    let store: Arc<dyn CategoryStore> = match &config.database_url {
        Some(url) => Arc::new(
            SqliteCategoryStore::connect(url)
                .await
                .with_context(|| format!("failed to open database {}", url))?,
        ),
        None => {
            warn!("DATABASE_URL not set, using in-memory category store");
            Arc::new(InMemoryCategoryStore::new())
        }
    };

    let state = AppState::from_config(&config, store);
    info!("Category cache initialized");

    let cleanup_handle = spawn_cleanup_task(state.cache.clone(), config.cleanup_interval);
    let shutdown = state.shutdown.clone();

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle, shutdown))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown, cancels in-flight store calls and aborts the sweep task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>, shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    shutdown.cancel();
    cleanup_handle.abort();
    warn!("Cache sweep task aborted");
}
