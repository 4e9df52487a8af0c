//! Core domain entities.
//!
//! - [`ShortUrl`] - An immutable identifier → URL mapping bound to one verb
//! - [`HttpMethod`] - The verb a mapping accepts
//! - [`AccessMetric`] - Access counter kept per identifier

pub mod access_metric;
pub mod short_url;

pub use access_metric::AccessMetric;
pub use short_url::{HttpMethod, ShortUrl, UnsupportedMethod};
