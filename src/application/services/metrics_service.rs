//! Access metrics recording and retrieval service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::access_event::AccessEvent;
use crate::domain::entities::AccessMetric;
use crate::domain::repositories::MetricsRepository;
use crate::error::AppError;

/// Service for recording and reading access counters.
///
/// [`MetricsService::record_access`] is the one place where metrics store
/// failures are absorbed: they are logged and counted, never returned.
pub struct MetricsService<M: MetricsRepository + ?Sized> {
    repository: Arc<M>,
}

impl<M: MetricsRepository + ?Sized> MetricsService<M> {
    /// Creates a new metrics service.
    pub fn new(repository: Arc<M>) -> Self {
        Self { repository }
    }

    /// Increments the access counter for the event's identifier.
    ///
    /// Best-effort: a store failure is reported through `tracing` and the
    /// `short_url_metrics_failures_total` counter, then discarded.
    pub async fn record_access(&self, event: &AccessEvent) {
        match self
            .repository
            .increment_access(&event.identifier, event.accessed_at)
            .await
        {
            Ok(()) => debug!(identifier = %event.identifier, "Access recorded"),
            Err(e) => {
                metrics::counter!("short_url_metrics_failures_total").increment(1);
                warn!(identifier = %event.identifier, error = %e, "Failed to record access");
            }
        }
    }

    /// Retrieves the access counter for an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no access was ever recorded.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_metrics(&self, identifier: &str) -> Result<AccessMetric, AppError> {
        self.repository
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "No metrics recorded for this identifier",
                    json!({ "identifier": identifier }),
                )
            })
    }

    /// Checks if the metrics store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}
