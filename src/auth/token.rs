//! JWT payload decoding
//!
//! Only the middle segment is read. Signatures are the backend's business.

use base64::{engine::general_purpose, Engine};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has no payload segment")]
    Format,
    #[error("token payload is not base64: {0}")]
    Encoding(String),
    #[error("token payload is not a JSON object: {0}")]
    Payload(String),
}

/// Claims the client cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: Option<String>,
    /// Expiry, seconds since the epoch
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    let trimmed = segment.trim_end_matches('=');
    general_purpose::URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| general_purpose::STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| TokenError::Encoding(e.to_string()))
}

pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenError::Format)?;

    let bytes = decode_segment(payload)?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|e| TokenError::Payload(e.to_string()))?;
    let Value::Object(claims) = value else {
        return Err(TokenError::Payload("not an object".to_string()));
    };

    // userId is a string for local accounts and may be numeric for social logins
    let user_id = match claims.get("userId") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let exp = claims.get("exp").and_then(|exp| {
        exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))
    });

    Ok(TokenClaims { user_id, exp })
}

/// The `userId` claim, or `None` if the token cannot be read
pub fn extract_user_id(token: &str) -> Option<String> {
    match decode_claims(token) {
        Ok(claims) => claims.user_id,
        Err(e) => {
            log::error!("Failed to extract user id from token: {}", e);
            None
        }
    }
}

/// True while `now` is before the token's `exp`. Unreadable tokens and
/// tokens without `exp` are invalid.
pub fn is_token_valid(token: &str, now: DateTime<Utc>) -> bool {
    match decode_claims(token) {
        Ok(claims) => match claims.exp {
            Some(exp) => now.timestamp_millis() < exp.saturating_mul(1000),
            None => false,
        },
        Err(e) => {
            log::error!("Token validation failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    /// Unsigned JWT carrying `claims`
    pub fn make_token(claims: Value) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.signature", header, payload)
    }

    /// Token for `user_id` expiring `ttl_secs` from now (negative for expired)
    pub fn token_for(user_id: &str, ttl_secs: i64) -> String {
        make_token(json!({ "userId": user_id, "exp": Utc::now().timestamp() + ttl_secs }))
    }

    #[test]
    fn test_extract_user_id() {
        assert_eq!(extract_user_id(&token_for("traveler01", 60)).as_deref(), Some("traveler01"));
        assert_eq!(
            extract_user_id(&make_token(json!({ "userId": 4242, "exp": 1 }))).as_deref(),
            Some("4242")
        );
        assert_eq!(extract_user_id(&make_token(json!({ "sub": "x" }))), None);
        assert_eq!(extract_user_id("not-a-token"), None);
    }

    #[test]
    fn test_validity_against_clock() {
        let now = Utc::now();
        assert!(is_token_valid(&token_for("a", 3600), now));
        assert!(!is_token_valid(&token_for("a", -1), now));

        let token = make_token(json!({ "exp": 1_700_000_000 }));
        let expiry = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert!(is_token_valid(&token, expiry - Duration::seconds(1)));
        assert!(!is_token_valid(&token, expiry));
    }

    #[test]
    fn test_missing_exp_is_invalid() {
        assert!(!is_token_valid(&make_token(json!({ "userId": "a" })), Utc::now()));
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode_claims("abc"), Err(TokenError::Format));
        assert!(matches!(decode_claims("a.!!!.c"), Err(TokenError::Encoding(_))));
        let not_json = general_purpose::URL_SAFE_NO_PAD.encode("hello");
        assert!(matches!(decode_claims(&format!("a.{}.c", not_json)), Err(TokenError::Payload(_))));
    }

    #[test]
    fn test_padded_payload_accepted() {
        let payload = general_purpose::STANDARD.encode(r#"{"userId":"kim","exp":99}"#);
        let claims = decode_claims(&format!("h.{}.s", payload)).unwrap();
        assert_eq!(claims.user_id.as_deref(), Some("kim"));
        assert_eq!(claims.exp, Some(99));
        assert_eq!(claims.expires_at().unwrap().timestamp(), 99);
    }
}
