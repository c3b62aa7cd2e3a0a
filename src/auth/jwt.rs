//! Minimal JWT claim reading for captured bearer tokens.
//!
//! Signatures are not verified; the token is only inspected to learn when the
//! provider will stop accepting it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::AuthError;

/// Timing claims carried in the token payload (epoch seconds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    pub iat: Option<i64>,
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn issued_at(&self) -> DateTime<Utc> {
        epoch_seconds(self.iat)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        epoch_seconds(self.exp)
    }
}

/// Decode the middle segment of a three-part token.
pub fn decode_claims(token: &str) -> Result<TokenClaims, AuthError> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::MalformedCredential(format!(
            "expected 3 token segments, found {}",
            parts.len()
        )));
    }
    let payload = parts[1].trim_end_matches('=');
    let decoded = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AuthError::MalformedCredential("invalid token payload encoding".into()))?;
    serde_json::from_slice(&decoded)
        .map_err(|_| AuthError::MalformedCredential("invalid token payload JSON".into()))
}

fn epoch_seconds(value: Option<i64>) -> DateTime<Utc> {
    value
        .and_then(|secs| secs.checked_mul(1000))
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
