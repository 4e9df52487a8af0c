//! Repository trait definitions for the domain layer.
//!
//! These traits are the storage contracts consumed by the application
//! services. Implementations live in `crate::infrastructure`.
//!
//! # Available Repositories
//!
//! - [`ShortUrlRepository`] - Create and point-lookup of short URLs
//! - [`MetricsRepository`] - Atomic access counters
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod metrics_repository;
pub mod short_url_repository;

pub use metrics_repository::MetricsRepository;
pub use short_url_repository::ShortUrlRepository;

#[cfg(test)]
pub use metrics_repository::MockMetricsRepository;
#[cfg(test)]
pub use short_url_repository::MockShortUrlRepository;
