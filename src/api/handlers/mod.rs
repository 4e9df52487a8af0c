//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod dispatch;
pub mod health;
pub mod metrics;
pub mod short_url;

pub use dispatch::dispatch_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use short_url::create_short_url_handler;
