//! PostgreSQL repository tests.
//!
//! Run against the database named by `DATABASE_URL`; `#[sqlx::test]` creates
//! a fresh database per test and applies `migrations/`.

use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use url_dispatch::domain::entities::{HttpMethod, ShortUrl};
use url_dispatch::domain::repositories::{MetricsRepository, ShortUrlRepository};
use url_dispatch::error::AppError;
use url_dispatch::infrastructure::persistence::{PgMetricsRepository, PgShortUrlRepository};

fn short_url(identifier: &str, http_method: HttpMethod) -> ShortUrl {
    ShortUrl::new(
        identifier.to_string(),
        "https://example.com/page".to_string(),
        http_method,
        1_700_000_000,
        1_700_003_600,
    )
}

#[sqlx::test]
async fn test_create_and_find_short_url(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    repo.create(&short_url("abc123def456", HttpMethod::Post))
        .await
        .unwrap();

    let found = repo.find_by_identifier("abc123def456").await.unwrap();
    assert_eq!(found, Some(short_url("abc123def456", HttpMethod::Post)));
}

#[sqlx::test]
async fn test_find_short_url_not_found(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    let found = repo.find_by_identifier("missing00000").await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test]
async fn test_create_existing_identifier_conflicts(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    repo.create(&short_url("abc123def456", HttpMethod::Get))
        .await
        .unwrap();

    let mut other = short_url("abc123def456", HttpMethod::Post);
    other.original_url = "https://other.example.com".to_string();
    let result = repo.create(&other).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));

    let kept = repo
        .find_by_identifier("abc123def456")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.original_url, "https://example.com/page");
}

#[sqlx::test]
async fn test_short_url_health_check(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));
    assert!(repo.health_check().await);
}

#[sqlx::test]
async fn test_increment_access_initializes_and_counts(pool: PgPool) {
    let repo = PgMetricsRepository::new(Arc::new(pool));
    let first = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2024, 1, 15, 11, 0, 0).unwrap();

    assert!(repo.find_by_identifier("abc123def456").await.unwrap().is_none());

    repo.increment_access("abc123def456", first).await.unwrap();
    repo.increment_access("abc123def456", second).await.unwrap();

    let metric = repo
        .find_by_identifier("abc123def456")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(metric.access_count, 2);
    assert_eq!(metric.last_accessed, second);
}

#[sqlx::test]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let repo = Arc::new(PgMetricsRepository::new(Arc::new(pool)));

    let mut handles = Vec::new();
    for _ in 0..50 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.increment_access("abc123def456", Utc::now()).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let metric = repo
        .find_by_identifier("abc123def456")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(metric.access_count, 50);
}

#[sqlx::test]
async fn test_metrics_survive_without_short_url(pool: PgPool) {
    let repo = PgMetricsRepository::new(Arc::new(pool));

    repo.increment_access("gone00000000", Utc::now())
        .await
        .unwrap();

    let metric = repo.find_by_identifier("gone00000000").await.unwrap();
    assert_eq!(metric.unwrap().access_count, 1);
}
