//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{HttpMethod, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct ShortUrlRow {
    identifier: String,
    original_url: String,
    http_method: String,
    created_at: i64,
    expires_at: i64,
}

impl TryFrom<ShortUrlRow> for ShortUrl {
    type Error = AppError;

    fn try_from(row: ShortUrlRow) -> Result<Self, Self::Error> {
        let http_method = row.http_method.parse::<HttpMethod>().map_err(|e| {
            AppError::internal(
                "Corrupt short URL record",
                json!({ "identifier": row.identifier, "reason": e.to_string() }),
            )
        })?;

        Ok(ShortUrl::new(
            row.identifier,
            row.original_url,
            http_method,
            row.created_at,
            row.expires_at,
        ))
    }
}

/// PostgreSQL repository for short URLs.
///
/// Inserts use `ON CONFLICT DO NOTHING` so an existing identifier is never
/// overwritten.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn create(&self, short_url: &ShortUrl) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO short_urls (identifier, original_url, http_method, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (identifier) DO NOTHING
            "#,
        )
        .bind(&short_url.identifier)
        .bind(&short_url.original_url)
        .bind(short_url.http_method.as_str())
        .bind(short_url.created_at)
        .bind(short_url.expires_at)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(
                "Identifier already exists",
                json!({ "identifier": short_url.identifier }),
            ));
        }

        Ok(())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT identifier, original_url, http_method, created_at, expires_at
            FROM short_urls
            WHERE identifier = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ShortUrl::try_from).transpose()
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
