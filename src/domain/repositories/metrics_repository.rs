//! Repository trait for access metrics.

use crate::domain::entities::AccessMetric;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Per-identifier access counters.
///
/// Implementations must make [`MetricsRepository::increment_access`] safe to
/// call concurrently for the same identifier: the count is added atomically
/// by the store, never read-modify-written by the caller.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMetricsRepository`] - PostgreSQL upsert
/// - [`crate::infrastructure::redis_store::RedisMetricsRepository`] - Redis hash with `HINCRBY`
/// - [`crate::infrastructure::memory::MemoryMetricsRepository`] - In-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Adds one access, creating the counter at zero first if needed, and
    /// sets `last_accessed` to `accessed_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_access(
        &self,
        identifier: &str,
        accessed_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Reads the counter for an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_identifier(&self, identifier: &str)
    -> Result<Option<AccessMetric>, AppError>;

    /// Checks if the backing store is reachable.
    async fn health_check(&self) -> bool;
}
