//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Store**: Short URL store reachability
/// 2. **Metrics Store**: Access counter store reachability
/// 3. **Access Queue**: Checks if channel is open and reports free capacity
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "Connected" },
///     "metrics_store": { "status": "ok", "message": "Connected" },
///     "access_queue": { "status": "ok", "message": "Capacity: 10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (store_ok, metrics_ok) = tokio::join!(
        state.short_url_service.health_check(),
        state.metrics_service.health_check()
    );

    let store = connectivity(store_ok, "Short URL store unreachable");
    let metrics_store = connectivity(metrics_ok, "Metrics store unreachable");
    let access_queue = check_access_queue(&state);

    let all_healthy = store.is_ok() && metrics_store.is_ok() && access_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store,
            metrics_store,
            access_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        tracing::warn!("Health check degraded");
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn connectivity(ok: bool, failure: &str) -> CheckStatus {
    if ok {
        CheckStatus::ok("Connected")
    } else {
        CheckStatus::error(failure)
    }
}

/// Checks if the access event queue is still consumed.
fn check_access_queue(state: &AppState) -> CheckStatus {
    if state.access_sender.is_closed() {
        CheckStatus::error("Access queue is closed")
    } else {
        CheckStatus::ok(format!("Capacity: {}", state.access_sender.capacity()))
    }
}
