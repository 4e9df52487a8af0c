//! Redis-backed metrics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde_json::json;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::domain::entities::AccessMetric;
use crate::domain::repositories::MetricsRepository;
use crate::error::AppError;

const ACCESS_COUNT_FIELD: &str = "access_count";
const LAST_ACCESSED_FIELD: &str = "last_accessed";

/// Access counters stored as one Redis hash per identifier.
///
/// An increment is a `MULTI`/`EXEC` pipeline of `HINCRBY` and `HSET`, so the
/// count is added server-side and a missing hash starts from zero.
pub struct RedisMetricsRepository {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisMetricsRepository {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        info!("Connecting to Redis for access metrics");

        let client = Client::open(redis_url).map_err(|e| redis_error("create client", &e))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| redis_error("connect", &e))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| redis_error("PING", &e))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "metrics:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, identifier: &str) -> String {
        format!("{}{}", self.key_prefix, identifier)
    }
}

fn redis_error(operation: &str, e: &redis::RedisError) -> AppError {
    warn!(operation, error = %e, "Redis error");
    AppError::internal(
        "Metrics store error",
        json!({ "operation": operation, "reason": e.to_string() }),
    )
}

#[async_trait]
impl MetricsRepository for RedisMetricsRepository {
    async fn increment_access(
        &self,
        identifier: &str,
        accessed_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let key = self.build_key(identifier);
        let mut conn = self.client.clone();

        redis::pipe()
            .atomic()
            .hincr(&key, ACCESS_COUNT_FIELD, 1)
            .ignore()
            .hset(&key, LAST_ACCESSED_FIELD, accessed_at.to_rfc3339())
            .ignore()
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| redis_error("HINCRBY", &e))
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<AccessMetric>, AppError> {
        let key = self.build_key(identifier);
        let mut conn = self.client.clone();

        let fields: HashMap<String, String> = conn
            .hgetall(&key)
            .await
            .map_err(|e| redis_error("HGETALL", &e))?;

        if fields.is_empty() {
            return Ok(None);
        }

        parse_metric(identifier, &fields).map(Some)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

/// Builds a metric from the fields of a Redis hash.
fn parse_metric(
    identifier: &str,
    fields: &HashMap<String, String>,
) -> Result<AccessMetric, AppError> {
    let corrupt = |field: &str| {
        AppError::internal(
            "Corrupt metrics record",
            json!({ "identifier": identifier, "field": field }),
        )
    };

    let access_count = fields
        .get(ACCESS_COUNT_FIELD)
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or_else(|| corrupt(ACCESS_COUNT_FIELD))?;

    let last_accessed = fields
        .get(LAST_ACCESSED_FIELD)
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| corrupt(LAST_ACCESSED_FIELD))?;

    Ok(AccessMetric::new(
        identifier.to_string(),
        access_count,
        last_accessed,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric() {
        let mut fields = HashMap::new();
        fields.insert("access_count".to_string(), "12".to_string());
        fields.insert(
            "last_accessed".to_string(),
            "2024-05-01T10:00:00+00:00".to_string(),
        );

        let metric = parse_metric("abc123def456", &fields).unwrap();
        assert_eq!(metric.access_count, 12);
        assert_eq!(metric.last_accessed.timestamp(), 1_714_557_600);
    }

    #[test]
    fn test_parse_metric_rejects_garbage() {
        let mut fields = HashMap::new();
        fields.insert("access_count".to_string(), "twelve".to_string());
        fields.insert(
            "last_accessed".to_string(),
            "2024-05-01T10:00:00+00:00".to_string(),
        );

        assert!(parse_metric("abc123def456", &fields).is_err());
    }
}
