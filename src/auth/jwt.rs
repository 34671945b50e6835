//! Unverified JWT payload decoding
//!
//! The client never holds the signing key, so it only reads the claims the
//! backend embeds (`sub`, `userId`, `role`, `exp`, `iat`) to drive expiry
//! checks and cache the user's identity. Signature checks stay server-side.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Allowed clock skew when checking `exp` and `iat`, in seconds
pub const CLOCK_SKEW_SECS: i64 = 10;

/// Claims issued by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject; the backend puts the login email here
    #[serde(default)]
    pub sub: Option<String>,
    /// Numeric user id
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Role name (`user`, `admin`)
    #[serde(default)]
    pub role: Option<String>,
    /// Subscription tier (`FREE`, `PLUS`, `PRO`)
    #[serde(default)]
    pub subscription: Option<String>,
    /// Expiry, seconds since the epoch
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at, seconds since the epoch
    #[serde(default)]
    pub iat: Option<i64>,
}

impl Claims {
    /// Whether the token is expired at `now`, allowing `leeway_secs` of skew
    /// in both directions.
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway_secs: i64) -> bool {
        let now = now.timestamp();
        if let Some(exp) = self.exp
            && now - leeway_secs > exp
        {
            return true;
        }
        if let Some(iat) = self.iat
            && now + leeway_secs < iat
        {
            return true;
        }
        false
    }
}

/// Decode the claims segment of a compact JWT. Returns `None` on any
/// structural problem.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut parts = token.trim().split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build an unsigned token around the given payload
    pub(crate) fn token_with(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS512"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.c2lnbmF0dXJl")
    }

    #[test]
    fn test_decode_backend_claims() {
        let token = token_with(&serde_json::json!({
            "sub": "cook@example.com",
            "role": "admin",
            "userId": 7,
            "subscription": "PRO",
            "expiry": null,
            "iat": 1_700_000_000,
            "exp": 1_700_086_400,
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("cook@example.com"));
        assert_eq!(claims.user_id, Some(7));
        assert_eq!(claims.role.as_deref(), Some("admin"));
        assert_eq!(claims.exp, Some(1_700_086_400));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_claims("").is_none());
        assert!(decode_claims("not-a-token").is_none());
        assert!(decode_claims("a.b").is_none());
        assert!(decode_claims("a.!!!.c").is_none());
        assert!(decode_claims("a.b.c.d").is_none());
    }

    #[test]
    fn test_expiry_with_skew() {
        let now = Utc::now();
        let claims = |exp: i64| Claims {
            exp: Some(exp),
            ..Claims::default()
        };

        assert!(claims(now.timestamp() - 11).is_expired_at(now, CLOCK_SKEW_SECS));
        assert!(!claims(now.timestamp() - 5).is_expired_at(now, CLOCK_SKEW_SECS));
        assert!(!claims(now.timestamp() + 3600).is_expired_at(now, CLOCK_SKEW_SECS));
        assert!(!Claims::default().is_expired_at(now, CLOCK_SKEW_SECS));
    }

    #[test]
    fn test_issued_in_future_is_expired() {
        let now = Utc::now();
        let claims = Claims {
            iat: Some(now.timestamp() + 60),
            exp: Some(now.timestamp() + 3600),
            ..Claims::default()
        };
        assert!(claims.is_expired_at(now, CLOCK_SKEW_SECS));
    }
}
