//! Outbound transport used to relay requests to POST-bound short URLs.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::AppError;

/// Body and content type of an inbound request, relayed unmodified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardPayload {
    pub body: Bytes,
    pub content_type: Option<String>,
}

impl ForwardPayload {
    pub fn new(body: Bytes, content_type: Option<String>) -> Self {
        Self { body, content_type }
    }
}

/// What the outbound target answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardResponse {
    pub status: u16,
    pub body: Bytes,
    pub content_type: Option<String>,
}

/// Performs a single outbound POST.
///
/// # Implementations
///
/// - [`crate::infrastructure::outbound::HttpForwarder`] - reqwest-based client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Sends `payload` to `url` and returns the target's response as-is.
    ///
    /// Non-2xx responses are returned as `Ok`; only transport failures are errors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the request could not be sent or the
    /// response body could not be read.
    async fn post(&self, url: &str, payload: ForwardPayload) -> Result<ForwardResponse, AppError>;
}
