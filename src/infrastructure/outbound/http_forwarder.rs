//! reqwest-based outbound forwarder.

use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::domain::forwarder::{ForwardPayload, ForwardResponse, Forwarder};
use crate::error::AppError;

/// Forwards POST bodies with a shared, pooled reqwest client.
///
/// The request timeout is the only time limit on a forward.
#[derive(Clone)]
pub struct HttpForwarder {
    client: Client,
}

impl HttpForwarder {
    /// Builds a forwarder whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::internal(
                    "Failed to build HTTP client",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        Ok(Self { client })
    }
}

fn forward_error(e: reqwest::Error) -> AppError {
    AppError::internal(
        "Failed to forward request",
        json!({ "reason": e.to_string(), "timeout": e.is_timeout() }),
    )
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn post(&self, url: &str, payload: ForwardPayload) -> Result<ForwardResponse, AppError> {
        let mut request = self.client.post(url).body(payload.body);

        if let Some(content_type) = payload.content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }

        let response = request.send().await.map_err(forward_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(forward_error)?;

        debug!(url, status, bytes = body.len(), "Outbound POST completed");

        Ok(ForwardResponse {
            status,
            body,
            content_type,
        })
    }
}
