//! Repository trait for short URL storage.

use crate::domain::entities::ShortUrl;
use crate::error::AppError;
use async_trait::async_trait;

/// Durable identifier → short URL mapping.
///
/// Records are written once and never updated.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryShortUrlRepository`] - In-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Stores a new short URL if its identifier is not taken yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a record with the same identifier exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, short_url: &ShortUrl) -> Result<(), AppError>;

    /// Point lookup by identifier, exactly as supplied.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortUrl))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Checks if the backing store is reachable.
    async fn health_check(&self) -> bool;
}
