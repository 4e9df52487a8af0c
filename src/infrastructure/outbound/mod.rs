//! Outbound HTTP transport.

mod http_forwarder;

pub use http_forwarder::HttpForwarder;
