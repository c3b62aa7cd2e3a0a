#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use garmin_workouts::auth::{
    AuthError, Credential, CredentialAcquirer, CredentialManager, CredentialStore,
};

#[derive(Default)]
pub struct InMemoryCredentialStore {
    credential: Mutex<Option<Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(credential: Credential) -> Self {
        Self {
            credential: Mutex::new(Some(credential)),
        }
    }

    pub fn get(&self) -> Option<Credential> {
        self.credential.lock().expect("store lock poisoned").clone()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>, AuthError> {
        Ok(self.get())
    }

    fn save(&self, credential: &Credential) -> Result<(), AuthError> {
        *self.credential.lock().expect("store lock poisoned") = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.credential.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}

/// Acquirer that hands out pre-built credentials and counts calls.
pub struct FakeAcquirer {
    credential: Option<Credential>,
    calls: AtomicUsize,
}

impl FakeAcquirer {
    pub fn returning(credential: Credential) -> Self {
        Self {
            credential: Some(credential),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            credential: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialAcquirer for FakeAcquirer {
    async fn acquire(&self) -> Result<Credential, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.credential.clone().ok_or(AuthError::TokenNotCaptured)
    }
}

/// Unsigned JWT with the given `iat`/`exp` claims.
pub fn jwt(iat: i64, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(format!(r#"{{"iat":{iat},"exp":{exp}}}"#));
    format!("{header}.{claims}.signature")
}

pub fn credential_expiring_in(secs: i64) -> Credential {
    let now = Utc::now();
    Credential {
        bearer_token: format!("token-{secs}"),
        cookie_header: "SESSIONID=abc; GARMIN-SSO=1".to_string(),
        issued_at: now - Duration::minutes(5),
        expires_at: now + Duration::seconds(secs),
    }
}

pub fn manager(
    store: Arc<InMemoryCredentialStore>,
    acquirer: Arc<FakeAcquirer>,
) -> CredentialManager {
    CredentialManager::new(store, acquirer)
}
