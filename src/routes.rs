//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /short-url`                       - Register a short URL (rate limited)
//! - `GET  /short-url/{identifier}/metrics`  - Access counter of a short URL
//! - `GET  /health`                          - Health check: stores, access queue
//! - `GET  /{identifier}`                    - Redirect (GET-bound short URLs)
//! - `POST /{identifier}`                    - Forward (POST-bound short URLs)
//!
//! Unknown paths answer with the JSON error envelope and `404`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin, `GET`/`POST`/`OPTIONS`
//! - **Rate limiting** - Per-IP token bucket on registration
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    create_short_url_handler, dispatch_handler, health_handler, metrics_handler,
};
use crate::api::middleware::{cors, rate_limit, tracing};
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::http::Uri;
use axum::routing::{get, post};
use serde_json::json;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Registration endpoint, without rate limiting.
pub fn registration_routes() -> Router<AppState> {
    Router::new().route("/short-url", post(create_short_url_handler))
}

/// Resolution, metrics and health endpoints.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/short-url/{identifier}/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .route("/{identifier}", get(dispatch_handler).post(dispatch_handler))
}

/// Router with every route and middleware except rate limiting and path
/// normalization. Requires no connection info, so it can be served directly.
pub fn router(state: AppState) -> Router {
    with_common_layers(registration_routes().merge(public_routes()), state)
}

/// Constructs the application router with all routes and middleware.
///
/// The returned service needs peer addresses for rate limiting and must be
/// served with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let routes = registration_routes()
        .layer(rate_limit::layer())
        .merge(public_routes());

    NormalizePathLayer::trim_trailing_slash().layer(with_common_layers(routes, state))
}

fn with_common_layers(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .fallback(fallback_handler)
        .with_state(state)
        .layer(cors::layer())
        .layer(tracing::layer())
}

async fn fallback_handler(uri: Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}
