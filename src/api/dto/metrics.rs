//! DTOs for access metrics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::AccessMetric;

/// Access counter of a single short URL.
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub identifier: String,
    pub access_count: i64,
    pub last_accessed: DateTime<Utc>,
}

impl From<AccessMetric> for MetricsResponse {
    fn from(metric: AccessMetric) -> Self {
        Self {
            identifier: metric.identifier,
            access_count: metric.access_count,
            last_accessed: metric.last_accessed,
        }
    }
}
