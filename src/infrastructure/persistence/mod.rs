//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries. The schema lives in `migrations/` and is applied at startup.
//!
//! # Repositories
//!
//! - [`PgShortUrlRepository`] - Short URL storage and lookup
//! - [`PgMetricsRepository`] - Atomic access counters

pub mod pg_metrics_repository;
pub mod pg_short_url_repository;

pub use pg_metrics_repository::PgMetricsRepository;
pub use pg_short_url_repository::PgShortUrlRepository;
