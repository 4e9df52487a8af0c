//! Access metric entity recorded for dispatched short URLs.

use chrono::{DateTime, Utc};

/// Access counter for a single identifier.
///
/// Exists independently of the short URL it counts: a metric outlives an
/// expired mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessMetric {
    pub identifier: String,
    pub access_count: i64,
    pub last_accessed: DateTime<Utc>,
}

impl AccessMetric {
    pub fn new(identifier: String, access_count: i64, last_accessed: DateTime<Utc>) -> Self {
        Self {
            identifier,
            access_count,
            last_accessed,
        }
    }
}
