//! DTOs for short URL registration endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{HttpMethod, ShortUrl};

/// Compiled regex for accepted verbs, matched case-insensitively.
static HTTP_METHOD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(get|post)$").expect("valid regex"));

/// Request to register a short URL.
///
/// Missing string fields deserialize as empty and fail validation, so a body
/// without `original_url` is a 400 like any other invalid input.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortUrlRequest {
    /// Absolute `http`/`https` URL the identifier resolves to.
    #[serde(default)]
    #[validate(length(min = 1, message = "original_url is required"))]
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Verb the short URL is bound to: `get` or `post`, any case.
    #[serde(default)]
    #[validate(regex(path = "*HTTP_METHOD_REGEX", message = "http_method must be get or post"))]
    pub http_method: String,

    /// Lifetime in seconds (defaults to 7 days).
    #[validate(range(min = 1, message = "ttl must be a positive number of seconds"))]
    pub ttl: Option<i64>,
}

/// Registered short URL as returned to the client.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub identifier: String,
    pub short_url: String,
    pub original_url: String,
    pub http_method: HttpMethod,
    /// Unix timestamp in seconds.
    pub created_at: i64,
    /// Unix timestamp in seconds.
    pub expires_at: i64,
}

impl ShortUrlResponse {
    pub fn new(short_url: ShortUrl, public_url: String) -> Self {
        Self {
            identifier: short_url.identifier,
            short_url: public_url,
            original_url: short_url.original_url,
            http_method: short_url.http_method,
            created_at: short_url.created_at,
            expires_at: short_url.expires_at,
        }
    }
}
