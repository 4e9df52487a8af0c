//! Handler for short URL registration endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::short_url::{CreateShortUrlRequest, ShortUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a short URL.
///
/// # Endpoint
///
/// `POST /short-url`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/page",
///   "http_method": "get",
///   "ttl": 3600
/// }
/// ```
///
/// `ttl` is optional and defaults to 7 days.
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "identifier": "9f86d081884c",
///   "short_url": "https://s.example.com/9f86d081884c",
///   "original_url": "https://example.com/page",
///   "http_method": "GET",
///   "created_at": 1700000000,
///   "expires_at": 1700003600
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request** - Malformed JSON or invalid field values
/// - **500 Internal Server Error** - Storage failure
pub async fn create_short_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortUrlResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate()?;

    let short_url = state
        .short_url_service
        .create_short_url(&payload.original_url, &payload.http_method, payload.ttl)
        .await?;

    let public_url = state.short_url_service.short_url_for(&short_url.identifier);

    Ok((
        StatusCode::CREATED,
        Json(ShortUrlResponse::new(short_url, public_url)),
    ))
}
