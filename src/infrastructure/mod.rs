//! Infrastructure layer for external integrations.
//!
//! Implements the contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repositories
//! - [`memory`] - In-process repositories
//! - [`redis_store`] - Redis-backed access counters
//! - [`outbound`] - HTTP client used to forward POST requests

pub mod memory;
pub mod outbound;
pub mod persistence;
pub mod redis_store;
