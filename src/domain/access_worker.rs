//! Background worker that turns access events into metric increments.

use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::application::services::MetricsService;
use crate::domain::access_event::AccessEvent;
use crate::domain::repositories::MetricsRepository;

/// Consumes access events until every sender is dropped.
///
/// At most `concurrency` increments are in flight at once. Failures are
/// absorbed by [`MetricsService::record_access`]; the worker itself never
/// stops on a store error. Pending increments are awaited before returning.
pub async fn run_access_worker<M>(
    mut rx: mpsc::Receiver<AccessEvent>,
    metrics_service: Arc<MetricsService<M>>,
    concurrency: usize,
) where
    M: MetricsRepository + ?Sized + 'static,
{
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let service = metrics_service.clone();
        tasks.spawn(async move {
            service.record_access(&event).await;
            drop(permit);
        });

        while tasks.try_join_next().is_some() {}
    }

    debug!(pending = tasks.len(), "Access queue closed, draining");
    while tasks.join_next().await.is_some() {}

    info!("Access worker stopped");
}
