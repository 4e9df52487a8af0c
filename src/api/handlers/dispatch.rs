//! Handler for short URL resolution.

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::dispatch::DispatchOutcome;
use crate::domain::forwarder::ForwardPayload;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short URL identifier.
///
/// # Endpoint
///
/// `GET /{identifier}` or `POST /{identifier}`
///
/// # Request Flow
///
/// 1. Look up the identifier
/// 2. Reject expired mappings
/// 3. Reject requests whose verb differs from the bound verb
/// 4. Enqueue an access event for the background worker
/// 5. GET-bound: `302 Found` to the original URL.
///    POST-bound: forward the request body to the original URL and relay
///    the target's status and body
///
/// # Errors
///
/// - **404 Not Found** - Unknown identifier
/// - **405 Method Not Allowed** - Verb mismatch, `Allow` names the bound verb
/// - **410 Gone** - Mapping has expired
/// - **500 Internal Server Error** - Lookup or forward failure
pub async fn dispatch_handler(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let outcome = state
        .dispatch_service
        .dispatch(
            &identifier,
            method.as_str(),
            ForwardPayload::new(body, content_type),
        )
        .await?;

    outcome_response(&identifier, outcome)
}

/// Maps a dispatch outcome to its HTTP response.
fn outcome_response(identifier: &str, outcome: DispatchOutcome) -> Result<Response, AppError> {
    match outcome {
        DispatchOutcome::NotFound => Err(AppError::not_found(
            "Short URL not found",
            json!({ "identifier": identifier }),
        )),
        DispatchOutcome::Expired => Err(AppError::gone(
            "Short URL has expired",
            json!({ "identifier": identifier }),
        )),
        DispatchOutcome::MethodMismatch { expected } => Err(AppError::method_not_allowed(
            expected,
            json!({ "identifier": identifier }),
        )),
        DispatchOutcome::Redirected { target_url } => {
            let location = HeaderValue::from_str(&target_url).map_err(|_| {
                AppError::internal(
                    "Stored URL is not a valid Location header",
                    json!({ "identifier": identifier }),
                )
            })?;
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        DispatchOutcome::Forwarded {
            status,
            body,
            content_type,
            ..
        } => {
            let mut response = Response::new(Body::from(body));
            *response.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);

            if let Some(value) = content_type.and_then(|ct| HeaderValue::from_str(&ct).ok()) {
                response.headers_mut().insert(header::CONTENT_TYPE, value);
            }

            Ok(response)
        }
    }
}
