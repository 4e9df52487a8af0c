//! In-process repository implementations.
//!
//! Backed by `tokio::sync` locks around hash maps. Selected with
//! `STORAGE_BACKEND=memory`; also used by the HTTP tests.

pub mod memory_metrics_repository;
pub mod memory_short_url_repository;

pub use memory_metrics_repository::MemoryMetricsRepository;
pub use memory_short_url_repository::MemoryShortUrlRepository;
