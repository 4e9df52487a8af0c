//! Access event model for asynchronous metrics recording.

use chrono::{DateTime, Utc};

/// A successful dispatch waiting to be counted.
///
/// Sent from the dispatch path to the background worker over a bounded
/// channel, so a slow or failing metrics store never delays a redirect.
/// `accessed_at` is captured at dispatch time, not when the worker runs.
///
/// # Usage Flow
///
/// 1. Created by [`crate::application::services::DispatchService`] once a mapping matched
/// 2. Sent to the channel with `try_send` (dropped if the queue is full)
/// 3. Processed by [`crate::domain::access_worker::run_access_worker`]
/// 4. Persisted via [`crate::domain::repositories::MetricsRepository::increment_access`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEvent {
    pub identifier: String,
    pub accessed_at: DateTime<Utc>,
}

impl AccessEvent {
    pub fn new(identifier: impl Into<String>, accessed_at: DateTime<Utc>) -> Self {
        Self {
            identifier: identifier.into(),
            accessed_at,
        }
    }
}
