use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::jwt;

/// Seconds a credential must still have left to count as valid.
pub const EXPIRY_BUFFER_SECS: i64 = 30;

/// Authenticated Garmin Connect web session captured from the browser.
///
/// `expires_at` always comes from the token's `exp` claim; use
/// [`Credential::from_captured`] to build one from a raw token.
///
/// # Example
/// ```no_run
/// use garmin_workouts::auth::Credential;
///
/// let credential = Credential::from_captured(
///     "header.payload.signature".to_string(),
///     "SESSIONID=abc".to_string(),
/// );
/// if !credential.is_valid() {
///     println!("token expired at {}", credential.expires_at);
/// }
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub bearer_token: String,
    pub cookie_header: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub issued_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Build a credential from a captured token, reading `iat`/`exp` from its claims.
    ///
    /// Undecodable tokens get epoch-zero timestamps and are therefore never valid.
    pub fn from_captured(bearer_token: String, cookie_header: String) -> Self {
        let (issued_at, expires_at) = match jwt::decode_claims(&bearer_token) {
            Ok(claims) => (claims.issued_at(), claims.expires_at()),
            Err(err) => {
                tracing::warn!(error = %err, "Could not decode bearer token claims");
                (DateTime::<Utc>::UNIX_EPOCH, DateTime::<Utc>::UNIX_EPOCH)
            }
        };
        Self {
            bearer_token,
            cookie_header,
            issued_at,
            expires_at,
        }
    }

    /// Whether the credential is still usable at `now`, keeping a 30 second buffer.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_BUFFER_SECS) < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// `Authorization` header value.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.bearer_token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("bearer_token", &"<redacted>")
            .field("cookie_header", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expiring_in(secs: i64, now: DateTime<Utc>) -> Credential {
        Credential {
            bearer_token: "secret-token".to_string(),
            cookie_header: "SESSION=secret-cookie".to_string(),
            issued_at: now,
            expires_at: now + Duration::seconds(secs),
        }
    }

    #[test]
    fn validity_boundary_is_thirty_seconds() {
        let now = Utc::now();
        assert!(!expiring_in(29, now).is_valid_at(now));
        assert!(!expiring_in(30, now).is_valid_at(now));
        assert!(expiring_in(31, now).is_valid_at(now));
    }

    #[test]
    fn past_expiry_is_invalid() {
        let now = Utc::now();
        assert!(!expiring_in(-60, now).is_valid_at(now));
    }

    #[test]
    fn undecodable_token_gets_epoch_zero() {
        let credential = Credential::from_captured("not-a-jwt".to_string(), String::new());
        assert_eq!(credential.issued_at, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(credential.expires_at, DateTime::<Utc>::UNIX_EPOCH);
        assert!(!credential.is_valid());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let credential = expiring_in(600, Utc::now());
        let debug = format!("{credential:?}");
        assert!(!debug.contains("secret-token"));
        assert!(!debug.contains("secret-cookie"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn timestamps_serialize_as_epoch_millis() {
        let issued = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_123).unwrap();
        let credential = Credential {
            bearer_token: "t".to_string(),
            cookie_header: "c".to_string(),
            issued_at: issued,
            expires_at: issued + Duration::hours(1),
        };
        let value = serde_json::to_value(&credential).unwrap();
        assert_eq!(value["issued_at"], 1_700_000_000_123_i64);
        assert_eq!(value["expires_at"], 1_700_003_600_123_i64);
    }
}
