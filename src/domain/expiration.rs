//! Expiration check for short URLs.

/// Returns `true` once `now` is strictly past `expires_at`.
///
/// A mapping whose `expires_at` equals `now` is still valid.
pub fn is_expired(expires_at: i64, now: i64) -> bool {
    expires_at < now
}
