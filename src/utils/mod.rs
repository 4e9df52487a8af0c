//! Utility helpers.
//!
//! - [`identifier`] - Random short URL identifier generation
//! - [`mask`] - Credential masking for logged connection strings

pub mod identifier;
pub mod mask;
