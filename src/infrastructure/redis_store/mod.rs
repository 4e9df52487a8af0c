//! Redis integrations.
//!
//! - [`RedisMetricsRepository`] - Access counters in Redis hashes, enabled when
//!   `REDIS_URL` (or `REDIS_HOST`) is configured

mod redis_metrics_repository;

pub use redis_metrics_repository::RedisMetricsRepository;
