//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, service wiring, and the Axum server lifecycle.

use crate::application::services::ShortenerService;
use crate::config::Config;
use crate::domain::repositories::RecordStore;
use crate::infrastructure::store::{
    MemoryRecordStore, PgRecordStore, RedisRecordStore, StoreBackend,
};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

/// Opens the record store selected by `STORE_BACKEND`.
///
/// The PostgreSQL backend applies pending migrations before it is returned.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached within the configured
/// store timeout or a migration fails.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn RecordStore>> {
    let timeout = config.store_timeout();

    let store: Arc<dyn RecordStore> = match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, records are lost on restart");
            Arc::new(MemoryRecordStore::new())
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;
            let store = PgRecordStore::connect(url, config.db_max_connections, timeout)
                .await
                .context("Failed to connect to PostgreSQL")?;
            store.migrate().await.context("Failed to migrate")?;
            Arc::new(store)
        }
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis backend")?;
            let store = RedisRecordStore::connect(url, config.table_name.clone(), timeout)
                .await
                .context("Failed to connect to Redis")?;
            Arc::new(store)
        }
    };

    tracing::info!("Record store ready ({})", config.store_backend);
    Ok(store)
}

/// Builds the shortener service over an already connected store.
pub fn build_service(config: &Config, store: Arc<dyn RecordStore>) -> ShortenerService {
    ShortenerService::new(
        store,
        Arc::new(RandomCodeGenerator),
        config.base_url.clone(),
    )
    .with_click_failure_policy(config.click_failure_policy)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Record store (memory, PostgreSQL or Redis)
/// - Shortener service
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Store connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;
    let state = AppState::new(build_service(&config, store));

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
