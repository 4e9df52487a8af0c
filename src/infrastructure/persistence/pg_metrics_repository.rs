//! PostgreSQL implementation of the metrics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::AccessMetric;
use crate::domain::repositories::MetricsRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct AccessMetricRow {
    identifier: String,
    access_count: i64,
    last_accessed: DateTime<Utc>,
}

/// PostgreSQL repository for access counters.
///
/// Increments are a single upsert, so concurrent calls for the same
/// identifier never lose an update.
pub struct PgMetricsRepository {
    pool: Arc<PgPool>,
}

impl PgMetricsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricsRepository for PgMetricsRepository {
    async fn increment_access(
        &self,
        identifier: &str,
        accessed_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO access_metrics (identifier, access_count, last_accessed)
            VALUES ($1, 1, $2)
            ON CONFLICT (identifier) DO UPDATE
            SET access_count = access_metrics.access_count + 1,
                last_accessed = EXCLUDED.last_accessed
            "#,
        )
        .bind(identifier)
        .bind(accessed_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<AccessMetric>, AppError> {
        let row = sqlx::query_as::<_, AccessMetricRow>(
            r#"
            SELECT identifier, access_count, last_accessed
            FROM access_metrics
            WHERE identifier = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| AccessMetric::new(r.identifier, r.access_count, r.last_accessed)))
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
