//! Resolution and dispatch of short URLs.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, warn};

use crate::domain::access_event::AccessEvent;
use crate::domain::clock::Clock;
use crate::domain::dispatch::{Decision, DispatchOutcome, decide};
use crate::domain::entities::{HttpMethod, ShortUrl};
use crate::domain::forwarder::{ForwardPayload, Forwarder};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// Resolves identifiers and performs the terminal redirect or forward.
///
/// Each call runs two phases. The decision phase (lookup, expiry, verb check)
/// has no side effects. The effect phase enqueues an access event and then
/// redirects or forwards. Nothing is retried and no state is kept between
/// calls.
pub struct DispatchService<R, F>
where
    R: ShortUrlRepository + ?Sized,
    F: Forwarder + ?Sized,
{
    repository: Arc<R>,
    forwarder: Arc<F>,
    clock: Arc<dyn Clock>,
    access_sender: mpsc::Sender<AccessEvent>,
}

impl<R, F> DispatchService<R, F>
where
    R: ShortUrlRepository + ?Sized,
    F: Forwarder + ?Sized,
{
    /// Creates a new dispatch service.
    pub fn new(
        repository: Arc<R>,
        forwarder: Arc<F>,
        clock: Arc<dyn Clock>,
        access_sender: mpsc::Sender<AccessEvent>,
    ) -> Self {
        Self {
            repository,
            forwarder,
            clock,
            access_sender,
        }
    }

    /// Resolves `identifier` for a request made with `inbound_method`.
    ///
    /// `payload` is only used for POST-bound mappings, where it is sent to
    /// the original URL unmodified. Dropping the returned future cancels an
    /// in-flight forward; an already enqueued access event is kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store lookup fails or the
    /// outbound request cannot be completed. A non-2xx answer from the target
    /// is not an error and comes back as [`DispatchOutcome::Forwarded`].
    pub async fn dispatch(
        &self,
        identifier: &str,
        inbound_method: &str,
        payload: ForwardPayload,
    ) -> Result<DispatchOutcome, AppError> {
        let now = self.clock.now();

        let short_url = self
            .repository
            .find_by_identifier(identifier)
            .await
            .inspect_err(|e| error!(identifier, error = %e, "Short URL lookup failed"))?;

        let outcome = match decide(short_url, inbound_method, now.timestamp()) {
            Decision::Reject(outcome) => {
                debug!(identifier, outcome = outcome.label(), "Dispatch rejected");
                outcome
            }
            Decision::Dispatch(short_url) => {
                self.enqueue_access(AccessEvent::new(identifier, now));
                self.perform(short_url, payload).await?
            }
        };

        metrics::counter!("short_url_dispatch_total", "outcome" => outcome.label()).increment(1);

        Ok(outcome)
    }

    /// Performs the terminal action for a matched mapping.
    async fn perform(
        &self,
        short_url: ShortUrl,
        payload: ForwardPayload,
    ) -> Result<DispatchOutcome, AppError> {
        match short_url.http_method {
            HttpMethod::Get => {
                debug!(identifier = %short_url.identifier, "Redirecting");
                Ok(DispatchOutcome::Redirected {
                    target_url: short_url.original_url,
                })
            }
            HttpMethod::Post => {
                let response = self
                    .forwarder
                    .post(&short_url.original_url, payload)
                    .await
                    .inspect_err(|e| {
                        error!(identifier = %short_url.identifier, error = %e, "Forward failed")
                    })?;

                debug!(
                    identifier = %short_url.identifier,
                    status = response.status,
                    "Forwarded"
                );

                Ok(DispatchOutcome::Forwarded {
                    target_url: short_url.original_url,
                    status: response.status,
                    body: response.body,
                    content_type: response.content_type,
                })
            }
        }
    }

    /// Hands the access event to the background worker without waiting.
    fn enqueue_access(&self, event: AccessEvent) {
        match self.access_sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("short_url_access_dropped_total").increment(1);
                warn!(identifier = %event.identifier, "Access queue full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("short_url_access_dropped_total").increment(1);
                warn!(identifier = %event.identifier, "Access queue closed, dropping event");
            }
        }
    }
}
