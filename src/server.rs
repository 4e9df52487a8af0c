//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, worker spawning, and Axum server lifecycle.

use crate::application::services::{DispatchService, MetricsService, ShortUrlService};
use crate::config::{Config, StorageBackend};
use crate::domain::access_worker::run_access_worker;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::forwarder::Forwarder;
use crate::domain::repositories::{MetricsRepository, ShortUrlRepository};
use crate::infrastructure::memory::{MemoryMetricsRepository, MemoryShortUrlRepository};
use crate::infrastructure::outbound::HttpForwarder;
use crate::infrastructure::persistence::{PgMetricsRepository, PgShortUrlRepository};
use crate::infrastructure::redis_store::RedisMetricsRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Stores selected for the configured backend.
struct Stores {
    short_urls: Arc<dyn ShortUrlRepository>,
    metrics: Arc<dyn MetricsRepository>,
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Short URL and metrics stores (PostgreSQL with migrations, or in-memory)
/// - Redis metrics store (falls back to the primary backend on failure)
/// - Outbound forwarder
/// - Background access worker
/// - Axum HTTP server with graceful shutdown
///
/// After shutdown the access queue is closed and the worker drains the
/// events already accepted.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let stores = match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_postgres(&config).await?;
            let pool = Arc::new(pool);
            Stores {
                short_urls: Arc::new(PgShortUrlRepository::new(pool.clone())),
                metrics: Arc::new(PgMetricsRepository::new(pool)),
            }
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            Stores {
                short_urls: Arc::new(MemoryShortUrlRepository::new()),
                metrics: Arc::new(MemoryMetricsRepository::new()),
            }
        }
    };

    let metrics_repository: Arc<dyn MetricsRepository> = if let Some(redis_url) = &config.redis_url
    {
        match RedisMetricsRepository::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Access metrics stored in Redis");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Using {:?} metrics store.",
                    e,
                    config.storage_backend
                );
                stores.metrics
            }
        }
    } else {
        stores.metrics
    };

    let forwarder: Arc<dyn Forwarder> = Arc::new(
        HttpForwarder::new(Duration::from_secs(config.forward_timeout_seconds))
            .context("Failed to build outbound HTTP client")?,
    );
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let (access_tx, access_rx) = mpsc::channel(config.access_queue_capacity);

    let metrics_service = Arc::new(MetricsService::new(metrics_repository));
    let short_url_service = Arc::new(ShortUrlService::new(
        stores.short_urls.clone(),
        clock.clone(),
        config.default_ttl_seconds,
        config.base_url.clone(),
    ));
    let dispatch_service = Arc::new(DispatchService::new(
        stores.short_urls,
        forwarder,
        clock,
        access_tx.clone(),
    ));

    let worker = tokio::spawn(run_access_worker(
        access_rx,
        metrics_service.clone(),
        config.access_worker_concurrency,
    ));
    tracing::info!(
        concurrency = config.access_worker_concurrency,
        "Access worker started"
    );

    let state = AppState::new(short_url_service, dispatch_service, metrics_service, access_tx);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router and every sender clone are dropped at this point, closing the queue.
    if let Err(e) = worker.await {
        tracing::error!("Access worker panicked: {}", e);
    }

    tracing::info!("Server stopped");

    Ok(())
}

/// Opens the PostgreSQL pool and applies embedded migrations.
async fn connect_postgres(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres backend")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
