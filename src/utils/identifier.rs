//! Short URL identifier generation.

use crate::error::AppError;
use serde_json::json;

/// Number of random bytes behind an identifier.
const IDENTIFIER_LENGTH_BYTES: usize = 6;

/// Length of a generated identifier in characters.
pub const IDENTIFIER_LENGTH: usize = IDENTIFIER_LENGTH_BYTES * 2;

/// Generates a random identifier from the OS entropy source.
///
/// Produces 12 lowercase hex characters (48 bits of entropy).
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn generate_identifier() -> Result<String, AppError> {
    let mut buffer = [0u8; IDENTIFIER_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate identifier",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(hex::encode(buffer))
}
