//! Handler for access metrics endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::metrics::MetricsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the access counter of a short URL.
///
/// # Endpoint
///
/// `GET /short-url/{identifier}/metrics`
///
/// # Response
///
/// ```json
/// {
///   "identifier": "9f86d081884c",
///   "access_count": 42,
///   "last_accessed": "2024-01-15T10:30:00Z"
/// }
/// ```
///
/// Metrics survive the expiry of the mapping they count.
///
/// # Errors
///
/// - **404 Not Found** - No access has been recorded for the identifier
/// - **500 Internal Server Error** - Metrics store failure
pub async fn metrics_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MetricsResponse>, AppError> {
    let metric = state.metrics_service.get_metrics(&identifier).await?;

    Ok(Json(metric.into()))
}
