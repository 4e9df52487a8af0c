//! Short URL entity and the HTTP verb a mapping is bound to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The single HTTP verb a short URL accepts.
///
/// Parsing is case-insensitive; the canonical form is upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a verb is neither GET nor POST.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnsupportedMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("get") {
            Ok(HttpMethod::Get)
        } else if s.eq_ignore_ascii_case("post") {
            Ok(HttpMethod::Post)
        } else {
            Err(UnsupportedMethod(s.to_string()))
        }
    }
}

/// A mapping from a generated identifier to its original URL.
///
/// Immutable once created. Timestamps are seconds since the Unix epoch and
/// `expires_at` is always `created_at + ttl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub identifier: String,
    pub original_url: String,
    pub http_method: HttpMethod,
    pub created_at: i64,
    pub expires_at: i64,
}

impl ShortUrl {
    pub fn new(
        identifier: String,
        original_url: String,
        http_method: HttpMethod,
        created_at: i64,
        expires_at: i64,
    ) -> Self {
        Self {
            identifier,
            original_url,
            http_method,
            created_at,
            expires_at,
        }
    }

    /// Remaining lifetime in seconds at `now`, zero once expired.
    pub fn remaining_ttl(&self, now: i64) -> i64 {
        (self.expires_at - now).max(0)
    }
}
