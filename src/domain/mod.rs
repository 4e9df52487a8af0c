//! Domain layer: entities, storage contracts, and dispatch rules.
//!
//! Nothing here depends on the infrastructure or HTTP layers.
//!
//! # Modules
//!
//! - [`entities`] - Short URL and access metric data structures
//! - [`repositories`] - Storage trait definitions
//! - [`expiration`] - Expiry check
//! - [`dispatch`] - Dispatch outcomes and the pure decision step
//! - [`forwarder`] - Outbound POST transport contract
//! - [`clock`] - Injected time source
//! - [`access_event`] - Access event model
//! - [`access_worker`] - Asynchronous metrics recording worker
//!
//! # Access Recording Flow
//!
//! 1. A dispatch matches a mapping
//! 2. [`access_event::AccessEvent`] is sent to a bounded channel
//! 3. [`access_worker::run_access_worker`] consumes it
//! 4. The counter is incremented via [`repositories::MetricsRepository`]

pub mod access_event;
pub mod access_worker;
pub mod clock;
pub mod dispatch;
pub mod entities;
pub mod expiration;
pub mod forwarder;
pub mod repositories;
