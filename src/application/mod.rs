//! Application layer services implementing business logic.
//!
//! Services consume repository traits and are handed their collaborators
//! explicitly, so tests can substitute mocks or in-memory stores.
//!
//! # Available Services
//!
//! - [`services::short_url_service::ShortUrlService`] - Short URL registration and lookup
//! - [`services::dispatch_service::DispatchService`] - Resolution, redirect, and forward
//! - [`services::metrics_service::MetricsService`] - Best-effort access counting

pub mod services;
