//! Shared application state injected into all handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{DispatchService, MetricsService, ShortUrlService};
use crate::domain::access_event::AccessEvent;
use crate::domain::forwarder::Forwarder;
use crate::domain::repositories::{MetricsRepository, ShortUrlRepository};

pub type DynShortUrlService = ShortUrlService<dyn ShortUrlRepository>;
pub type DynDispatchService = DispatchService<dyn ShortUrlRepository, dyn Forwarder>;
pub type DynMetricsService = MetricsService<dyn MetricsRepository>;

/// Services and channels shared by every request.
///
/// Cloning is cheap: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<DynShortUrlService>,
    pub dispatch_service: Arc<DynDispatchService>,
    pub metrics_service: Arc<DynMetricsService>,
    /// Sender side of the access event queue, used by the health check.
    pub access_sender: mpsc::Sender<AccessEvent>,
}

impl AppState {
    pub fn new(
        short_url_service: Arc<DynShortUrlService>,
        dispatch_service: Arc<DynDispatchService>,
        metrics_service: Arc<DynMetricsService>,
        access_sender: mpsc::Sender<AccessEvent>,
    ) -> Self {
        Self {
            short_url_service,
            dispatch_service,
            metrics_service,
            access_sender,
        }
    }
}
