//! Short URL registration and lookup service.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info};
use url::Url;

use crate::domain::clock::Clock;
use crate::domain::entities::{HttpMethod, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::utils::identifier::generate_identifier;

/// Default lifetime of a short URL: 7 days.
pub const DEFAULT_TTL_SECONDS: i64 = 60 * 60 * 24 * 7;

/// Service for registering short URLs.
///
/// Validates input before touching the store, generates the identifier, and
/// computes `created_at`/`expires_at` from a single clock reading.
pub struct ShortUrlService<R: ShortUrlRepository + ?Sized> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    default_ttl: i64,
    base_url: String,
}

impl<R: ShortUrlRepository + ?Sized> ShortUrlService<R> {
    /// Creates a new short URL service.
    pub fn new(
        repository: Arc<R>,
        clock: Arc<dyn Clock>,
        default_ttl: i64,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            clock,
            default_ttl,
            base_url: base_url.into(),
        }
    }

    /// Registers a new short URL.
    ///
    /// # Arguments
    ///
    /// - `original_url` - Absolute `http`/`https` URL to resolve to
    /// - `http_method` - `get` or `post`, case-insensitive
    /// - `ttl` - Lifetime in seconds; the configured default when `None`
    ///
    /// Exactly one store write is issued on success. Identifier collisions are
    /// rejected by the store and reported as a storage failure, not retried.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if any argument is invalid; the store is
    /// not contacted in that case.
    /// Returns [`AppError::Internal`] if the store write fails.
    pub async fn create_short_url(
        &self,
        original_url: &str,
        http_method: &str,
        ttl: Option<i64>,
    ) -> Result<ShortUrl, AppError> {
        let original_url = validate_original_url(original_url)?;

        let http_method = http_method.parse::<HttpMethod>().map_err(|_| {
            AppError::bad_request(
                "\"http_method\" must be either \"get\" or \"post\"",
                json!({ "http_method": http_method }),
            )
        })?;

        let ttl = match ttl {
            Some(ttl) if ttl <= 0 => {
                return Err(AppError::bad_request(
                    "\"ttl\" must be a positive number of seconds",
                    json!({ "ttl": ttl }),
                ));
            }
            Some(ttl) => ttl,
            None => self.default_ttl,
        };

        let identifier = generate_identifier()?;
        let created_at = self.clock.now().timestamp();
        let expires_at = created_at.checked_add(ttl).ok_or_else(|| {
            AppError::bad_request("\"ttl\" is too large", json!({ "ttl": ttl }))
        })?;

        let short_url = ShortUrl::new(
            identifier,
            original_url,
            http_method,
            created_at,
            expires_at,
        );

        match self.repository.create(&short_url).await {
            Ok(()) => {}
            Err(AppError::Conflict { .. }) => {
                error!(identifier = %short_url.identifier, "Identifier collision");
                return Err(AppError::internal(
                    "Failed to create short URL",
                    json!({ "reason": "Identifier collision" }),
                ));
            }
            Err(e) => {
                error!(error = %e, "Failed to store short URL");
                return Err(e);
            }
        }

        metrics::counter!("short_url_created_total").increment(1);
        info!(
            identifier = %short_url.identifier,
            http_method = %short_url.http_method,
            expires_at = short_url.expires_at,
            "Short URL created"
        );

        Ok(short_url)
    }

    /// Retrieves a short URL by identifier, regardless of expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping exists.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_short_url(&self, identifier: &str) -> Result<ShortUrl, AppError> {
        self.repository
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "identifier": identifier }))
            })
    }

    /// Builds the public short URL for an identifier.
    pub fn short_url_for(&self, identifier: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), identifier)
    }

    /// Checks if the short URL store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}

/// Ensures the URL is non-empty, absolute, and uses `http` or `https`.
///
/// Returns the serialized form of the parsed URL: stray tabs and newlines
/// are removed and non-ASCII characters are percent-encoded, so the result
/// is always a valid `Location` header value.
fn validate_original_url(original_url: &str) -> Result<String, AppError> {
    let trimmed = original_url.trim();

    if trimmed.is_empty() {
        return Err(AppError::bad_request(
            "\"original_url\" must be a non-empty string",
            json!({}),
        ));
    }

    let parsed = Url::parse(trimmed).map_err(|e| {
        AppError::bad_request(
            "\"original_url\" must be an absolute URL",
            json!({ "reason": e.to_string() }),
        )
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::bad_request(
            "\"original_url\" must use http or https",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    Ok(parsed.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::repositories::MockShortUrlRepository;

    const NOW: i64 = 1_700_000_000;

    fn service(mock_repo: MockShortUrlRepository) -> ShortUrlService<MockShortUrlRepository> {
        ShortUrlService::new(
            Arc::new(mock_repo),
            Arc::new(FixedClock::at(NOW)),
            DEFAULT_TTL_SECONDS,
            "https://s.example.com/",
        )
    }

    #[tokio::test]
    async fn test_create_short_url_with_ttl() {
        let mut mock_repo = MockShortUrlRepository::new();
        mock_repo
            .expect_create()
            .withf(|short_url| {
                short_url.created_at == NOW
                    && short_url.expires_at == NOW + 3600
                    && short_url.http_method == HttpMethod::Get
                    && short_url.original_url == "https://example.com/page"
            })
            .times(1)
            .returning(|_| Ok(()));

        let result = service(mock_repo)
            .create_short_url("https://example.com/page", "get", Some(3600))
            .await;

        let short_url = result.unwrap();
        assert_eq!(short_url.expires_at, short_url.created_at + 3600);
        assert_eq!(short_url.identifier.len(), 12);
    }

    #[tokio::test]
    async fn test_create_short_url_default_ttl() {
        let mut mock_repo = MockShortUrlRepository::new();
        mock_repo
            .expect_create()
            .withf(|short_url| short_url.expires_at == NOW + 604_800)
            .times(1)
            .returning(|_| Ok(()));

        let short_url = service(mock_repo)
            .create_short_url("https://example.com", "GET", None)
            .await
            .unwrap();

        assert_eq!(short_url.expires_at - short_url.created_at, 604_800);
    }

    #[tokio::test]
    async fn test_create_short_url_normalizes_method() {
        let mut mock_repo = MockShortUrlRepository::new();
        mock_repo
            .expect_create()
            .withf(|short_url| short_url.http_method == HttpMethod::Post)
            .times(1)
            .returning(|_| Ok(()));

        let short_url = service(mock_repo)
            .create_short_url("https://example.com/hook", "PoSt", None)
            .await
            .unwrap();

        assert_eq!(short_url.http_method, HttpMethod::Post);
    }

    #[tokio::test]
    async fn test_create_short_url_stores_serialized_url() {
        let mut mock_repo = MockShortUrlRepository::new();
        mock_repo
            .expect_create()
            .withf(|short_url| short_url.original_url == "https://example.com/ab")
            .times(1)
            .returning(|_| Ok(()));

        let short_url = service(mock_repo)
            .create_short_url("https://example.com/a\nb", "get", None)
            .await
            .unwrap();

        assert_eq!(short_url.original_url, "https://example.com/ab");
    }

    #[tokio::test]
    async fn test_create_short_url_missing_url() {
        let mut mock_repo = MockShortUrlRepository::new();
        mock_repo.expect_create().times(0);

        let result = service(mock_repo).create_short_url("", "get", None).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_short_url_relative_url() {
        let mut mock_repo = MockShortUrlRepository::new();
        mock_repo.expect_create().times(0);

        let result = service(mock_repo)
            .create_short_url("not-a-url", "get", None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_short_url_unsupported_scheme() {
        let mut mock_repo = MockShortUrlRepository::new();
        mock_repo.expect_create().times(0);

        let result = service(mock_repo)
            .create_short_url("ftp://example.com/file", "get", None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_short_url_invalid_method() {
        let mut mock_repo = MockShortUrlRepository::new();
        mock_repo.expect_create().times(0);

        let result = service(mock_repo)
            .create_short_url("https://example.com", "put", None)
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("http_method"));
    }

    #[tokio::test]
    async fn test_create_short_url_non_positive_ttl() {
        for ttl in [0, -60] {
            let mut mock_repo = MockShortUrlRepository::new();
            mock_repo.expect_create().times(0);

            let result = service(mock_repo)
                .create_short_url("https://example.com", "get", Some(ttl))
                .await;

            assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
        }
    }

    #[tokio::test]
    async fn test_create_short_url_overflowing_ttl() {
        let mut mock_repo = MockShortUrlRepository::new();
        mock_repo.expect_create().times(0);

        let result = service(mock_repo)
            .create_short_url("https://example.com", "get", Some(i64::MAX))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_short_url_storage_failure() {
        let mut mock_repo = MockShortUrlRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(mock_repo)
            .create_short_url("https://example.com", "get", None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_short_url_collision_is_storage_failure() {
        let mut mock_repo = MockShortUrlRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", json!({}))));

        let result = service(mock_repo)
            .create_short_url("https://example.com", "get", None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_get_short_url_not_found() {
        let mut mock_repo = MockShortUrlRepository::new();
        mock_repo
            .expect_find_by_identifier()
            .withf(|identifier| identifier == "missing00000")
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo).get_short_url("missing00000").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[test]
    fn test_short_url_for_trims_trailing_slash() {
        let service = service(MockShortUrlRepository::new());
        assert_eq!(
            service.short_url_for("abc123def456"),
            "https://s.example.com/abc123def456"
        );
    }
}
