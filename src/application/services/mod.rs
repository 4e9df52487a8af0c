//! Business logic services for the application layer.

pub mod dispatch_service;
pub mod metrics_service;
pub mod short_url_service;

pub use dispatch_service::DispatchService;
pub use metrics_service::MetricsService;
pub use short_url_service::{DEFAULT_TTL_SECONDS, ShortUrlService};
