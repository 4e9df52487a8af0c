#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Bytes,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use url_dispatch::application::services::{DispatchService, MetricsService, ShortUrlService};
use url_dispatch::domain::access_event::AccessEvent;
use url_dispatch::domain::clock::{Clock, SystemClock};
use url_dispatch::domain::entities::{AccessMetric, HttpMethod, ShortUrl};
use url_dispatch::domain::forwarder::Forwarder;
use url_dispatch::domain::repositories::{MetricsRepository, ShortUrlRepository};
use url_dispatch::error::AppError;
use url_dispatch::infrastructure::memory::{MemoryMetricsRepository, MemoryShortUrlRepository};
use url_dispatch::infrastructure::outbound::HttpForwarder;
use url_dispatch::state::AppState;

pub const BASE_URL: &str = "http://s.test.com";

/// State over in-memory stores plus handles for assertions.
pub struct TestContext {
    pub state: AppState,
    pub access_rx: mpsc::Receiver<AccessEvent>,
    pub short_urls: Arc<MemoryShortUrlRepository>,
    pub metrics: Arc<MemoryMetricsRepository>,
}

pub fn create_test_state() -> TestContext {
    create_test_state_with_clock(Arc::new(SystemClock))
}

pub fn create_test_state_with_clock(clock: Arc<dyn Clock>) -> TestContext {
    let metrics = Arc::new(MemoryMetricsRepository::new());
    build(clock, metrics.clone(), metrics)
}

/// Uses `metrics_repository` for access counting instead of the memory store.
pub fn create_test_state_with_metrics(metrics_repository: Arc<dyn MetricsRepository>) -> TestContext {
    build(
        Arc::new(SystemClock),
        metrics_repository,
        Arc::new(MemoryMetricsRepository::new()),
    )
}

fn build(
    clock: Arc<dyn Clock>,
    metrics_repository: Arc<dyn MetricsRepository>,
    metrics: Arc<MemoryMetricsRepository>,
) -> TestContext {
    let (tx, rx) = mpsc::channel(100);

    let short_urls = Arc::new(MemoryShortUrlRepository::new());
    let short_url_repository: Arc<dyn ShortUrlRepository> = short_urls.clone();
    let forwarder: Arc<dyn Forwarder> =
        Arc::new(HttpForwarder::new(Duration::from_secs(5)).unwrap());

    let short_url_service = Arc::new(ShortUrlService::new(
        short_url_repository.clone(),
        clock.clone(),
        604_800,
        BASE_URL,
    ));
    let dispatch_service = Arc::new(DispatchService::new(
        short_url_repository,
        forwarder,
        clock,
        tx.clone(),
    ));
    let metrics_service = Arc::new(MetricsService::new(metrics_repository));

    TestContext {
        state: AppState::new(short_url_service, dispatch_service, metrics_service, tx),
        access_rx: rx,
        short_urls,
        metrics,
    }
}

pub async fn insert_short_url(
    repo: &MemoryShortUrlRepository,
    identifier: &str,
    original_url: &str,
    http_method: HttpMethod,
    created_at: i64,
    expires_at: i64,
) {
    repo.create(&ShortUrl::new(
        identifier.to_string(),
        original_url.to_string(),
        http_method,
        created_at,
        expires_at,
    ))
    .await
    .unwrap();
}

/// Inserts a short URL valid for the next hour.
pub async fn insert_active_short_url(
    repo: &MemoryShortUrlRepository,
    identifier: &str,
    original_url: &str,
    http_method: HttpMethod,
) {
    let now = Utc::now().timestamp();
    insert_short_url(repo, identifier, original_url, http_method, now, now + 3600).await;
}

/// Metrics store that fails every call.
pub struct FailingMetricsRepository;

#[async_trait]
impl MetricsRepository for FailingMetricsRepository {
    async fn increment_access(
        &self,
        _identifier: &str,
        _accessed_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        Err(AppError::internal("Metrics store unavailable", json!({})))
    }

    async fn find_by_identifier(&self, _identifier: &str) -> Result<Option<AccessMetric>, AppError> {
        Err(AppError::internal("Metrics store unavailable", json!({})))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Starts a local forward target and returns its address.
///
/// - `POST /hook` answers `201 {"success":true}`
/// - `POST /echo` answers `200` with the request body and content type
/// - `POST /fail` answers `503` with a plain text body
pub async fn spawn_target() -> SocketAddr {
    let app = Router::new()
        .route(
            "/hook",
            post(|| async { (StatusCode::CREATED, Json(json!({ "success": true }))) }),
        )
        .route(
            "/echo",
            post(|headers: HeaderMap, body: Bytes| async move {
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .cloned()
                    .unwrap_or(header::HeaderValue::from_static("application/octet-stream"));
                ([(header::CONTENT_TYPE, content_type)], body).into_response()
            }),
        )
        .route(
            "/fail",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "target down") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
