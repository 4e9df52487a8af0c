//! In-memory metrics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::entities::AccessMetric;
use crate::domain::repositories::MetricsRepository;
use crate::error::AppError;

/// Access counters kept in process memory.
///
/// Each increment runs under a single lock, which makes it atomic with
/// respect to concurrent callers.
#[derive(Default)]
pub struct MemoryMetricsRepository {
    counters: Mutex<HashMap<String, AccessMetric>>,
}

impl MemoryMetricsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetricsRepository for MemoryMetricsRepository {
    async fn increment_access(
        &self,
        identifier: &str,
        accessed_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut counters = self.counters.lock().await;

        let metric = counters
            .entry(identifier.to_string())
            .or_insert_with(|| AccessMetric::new(identifier.to_string(), 0, accessed_at));
        metric.access_count += 1;
        metric.last_accessed = accessed_at;

        Ok(())
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<AccessMetric>, AppError> {
        Ok(self.counters.lock().await.get(identifier).cloned())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
