//! Dispatch outcomes and the pure decision step that precedes any side effect.

use bytes::Bytes;

use crate::domain::entities::{HttpMethod, ShortUrl};
use crate::domain::expiration::is_expired;

/// Result of resolving an identifier against an inbound request.
///
/// Store and transport failures are not outcomes; they travel as
/// `Err(AppError)` next to this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No mapping exists for the identifier.
    NotFound,
    /// The mapping exists but its `expires_at` is in the past.
    Expired,
    /// The inbound verb differs from the mapping's bound verb.
    MethodMismatch { expected: HttpMethod },
    /// GET-bound match: the caller must answer with a 302 to `target_url`.
    Redirected { target_url: String },
    /// POST-bound match: the target's answer, to be relayed verbatim.
    Forwarded {
        target_url: String,
        status: u16,
        body: Bytes,
        content_type: Option<String>,
    },
}

impl DispatchOutcome {
    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            DispatchOutcome::NotFound => "not_found",
            DispatchOutcome::Expired => "expired",
            DispatchOutcome::MethodMismatch { .. } => "method_mismatch",
            DispatchOutcome::Redirected { .. } => "redirected",
            DispatchOutcome::Forwarded { .. } => "forwarded",
        }
    }
}

/// Outcome of the decision phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Terminal rejection; nothing may be recorded.
    Reject(DispatchOutcome),
    /// The mapping matched and may be dispatched.
    Dispatch(ShortUrl),
}

/// Applies lookup, expiry, and verb rules in that order.
///
/// `inbound_method` is compared case-insensitively; verbs other than GET and
/// POST never match. Pure and free of I/O.
pub fn decide(short_url: Option<ShortUrl>, inbound_method: &str, now: i64) -> Decision {
    let Some(short_url) = short_url else {
        return Decision::Reject(DispatchOutcome::NotFound);
    };

    if is_expired(short_url.expires_at, now) {
        return Decision::Reject(DispatchOutcome::Expired);
    }

    let matches = inbound_method
        .parse::<HttpMethod>()
        .is_ok_and(|method| method == short_url.http_method);

    if !matches {
        return Decision::Reject(DispatchOutcome::MethodMismatch {
            expected: short_url.http_method,
        });
    }

    Decision::Dispatch(short_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_url(method: HttpMethod, expires_at: i64) -> ShortUrl {
        ShortUrl::new(
            "abcdef012345".to_string(),
            "https://example.com/target".to_string(),
            method,
            expires_at - 3_600,
            expires_at,
        )
    }

    #[test]
    fn test_missing_mapping_is_not_found() {
        assert_eq!(
            decide(None, "GET", 1_000),
            Decision::Reject(DispatchOutcome::NotFound)
        );
    }

    #[test]
    fn test_expired_mapping() {
        let mapping = short_url(HttpMethod::Get, 900);
        assert_eq!(
            decide(Some(mapping), "GET", 1_000),
            Decision::Reject(DispatchOutcome::Expired)
        );
    }

    #[test]
    fn test_expiry_checked_before_method() {
        let mapping = short_url(HttpMethod::Post, 900);
        assert_eq!(
            decide(Some(mapping), "GET", 1_000),
            Decision::Reject(DispatchOutcome::Expired)
        );
    }

    #[test]
    fn test_method_mismatch_reports_bound_method() {
        let mapping = short_url(HttpMethod::Post, 5_000);
        assert_eq!(
            decide(Some(mapping), "GET", 1_000),
            Decision::Reject(DispatchOutcome::MethodMismatch {
                expected: HttpMethod::Post
            })
        );
    }

    #[test]
    fn test_unknown_verb_never_matches() {
        let mapping = short_url(HttpMethod::Get, 5_000);
        assert_eq!(
            decide(Some(mapping), "DELETE", 1_000),
            Decision::Reject(DispatchOutcome::MethodMismatch {
                expected: HttpMethod::Get
            })
        );
    }

    #[test]
    fn test_matching_method_is_case_insensitive() {
        let mapping = short_url(HttpMethod::Get, 5_000);
        assert_eq!(
            decide(Some(mapping.clone()), "get", 1_000),
            Decision::Dispatch(mapping)
        );
    }

    #[test]
    fn test_dispatch_at_exact_expiry() {
        let mapping = short_url(HttpMethod::Post, 1_000);
        assert_eq!(
            decide(Some(mapping.clone()), "POST", 1_000),
            Decision::Dispatch(mapping)
        );
    }
}
