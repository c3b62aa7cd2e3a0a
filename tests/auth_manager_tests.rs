mod auth_support;

use std::sync::Arc;

use auth_support::{credential_expiring_in, jwt, manager, FakeAcquirer, InMemoryCredentialStore};
use chrono::{DateTime, Utc};
use garmin_workouts::auth::{
    AuthError, Credential, CredentialManager, CredentialStatus, CredentialStore,
    FileCredentialStore,
};

#[test]
fn valid_credential_is_returned_without_acquisition() {
    let stored = credential_expiring_in(3600);
    let store = Arc::new(InMemoryCredentialStore::seeded(stored.clone()));
    let acquirer = Arc::new(FakeAcquirer::failing());
    let manager = manager(store, acquirer.clone());

    assert_eq!(manager.get_valid_credential(), Some(stored));
    assert_eq!(acquirer.calls(), 0);
}

#[test]
fn credential_inside_expiry_buffer_is_not_returned() {
    let store = Arc::new(InMemoryCredentialStore::seeded(credential_expiring_in(29)));
    let manager = manager(store, Arc::new(FakeAcquirer::failing()));

    assert_eq!(manager.get_valid_credential(), None);
    assert!(matches!(manager.status(), CredentialStatus::Expired { .. }));
}

#[test]
fn missing_credential_reports_missing() {
    let manager = manager(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(FakeAcquirer::failing()),
    );
    assert_eq!(manager.status(), CredentialStatus::Missing);
    assert_eq!(manager.get_valid_credential(), None);
}

#[tokio::test]
async fn acquisition_persists_and_overwrites() {
    let fresh = credential_expiring_in(7200);
    let store = Arc::new(InMemoryCredentialStore::seeded(credential_expiring_in(-60)));
    let acquirer = Arc::new(FakeAcquirer::returning(fresh.clone()));
    let manager = manager(store.clone(), acquirer.clone());

    let acquired = manager.acquire_credential().await.expect("acquire");

    assert_eq!(acquired, fresh);
    assert_eq!(store.get(), Some(fresh));
    assert_eq!(acquirer.calls(), 1);
}

#[tokio::test]
async fn failed_acquisition_persists_nothing() {
    let store = Arc::new(InMemoryCredentialStore::new());
    let manager = manager(store.clone(), Arc::new(FakeAcquirer::failing()));

    let err = manager.acquire_credential().await.unwrap_err();

    assert!(matches!(err, AuthError::TokenNotCaptured));
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn ensure_credential_acquires_only_when_needed() {
    let fresh = credential_expiring_in(7200);
    let store = Arc::new(InMemoryCredentialStore::new());
    let acquirer = Arc::new(FakeAcquirer::returning(fresh.clone()));
    let manager = manager(store, acquirer.clone());

    assert_eq!(manager.ensure_credential().await.expect("first"), fresh);
    assert_eq!(manager.ensure_credential().await.expect("second"), fresh);
    assert_eq!(acquirer.calls(), 1);
}

#[tokio::test]
async fn ensure_credential_rejects_already_expired_capture() {
    let manager = manager(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(FakeAcquirer::returning(credential_expiring_in(-1))),
    );
    assert!(matches!(
        manager.ensure_credential().await,
        Err(AuthError::InvalidToken)
    ));
}

#[test]
fn invalidate_is_idempotent() {
    let store = Arc::new(InMemoryCredentialStore::seeded(credential_expiring_in(3600)));
    let manager = manager(store.clone(), Arc::new(FakeAcquirer::failing()));

    manager.invalidate_credential().expect("first clear");
    manager.invalidate_credential().expect("second clear");
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn credential_survives_restart_through_file_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("credential.json");
    let now = Utc::now().timestamp();
    let captured = Credential::from_captured(jwt(now, now + 3600), "SESSIONID=abc".to_string());

    let first = CredentialManager::new(
        Arc::new(FileCredentialStore::new(&path)),
        Arc::new(FakeAcquirer::returning(captured.clone())),
    );
    first.acquire_credential().await.expect("acquire");

    let second = CredentialManager::new(
        Arc::new(FileCredentialStore::new(&path)),
        Arc::new(FakeAcquirer::failing()),
    );
    let restored = second.get_valid_credential().expect("credential restored");
    assert_eq!(restored, captured);
    assert_eq!(
        restored.expires_at,
        DateTime::<Utc>::from_timestamp(now + 3600, 0).expect("timestamp")
    );

    second.invalidate_credential().expect("clear");
    assert!(!path.exists());
}

#[test]
fn corrupt_credential_file_reads_as_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("credential.json");
    std::fs::write(&path, "{ not json").expect("write");

    let store = FileCredentialStore::new(&path);
    assert!(store.load().expect("load").is_none());

    let manager = CredentialManager::new(Arc::new(store), Arc::new(FakeAcquirer::failing()));
    assert_eq!(manager.status(), CredentialStatus::Missing);
}

#[test]
fn undecodable_token_yields_expired_credential() {
    let credential = Credential::from_captured("opaque-token".to_string(), String::new());
    assert_eq!(credential.expires_at, DateTime::<Utc>::UNIX_EPOCH);
    assert_eq!(credential.issued_at, DateTime::<Utc>::UNIX_EPOCH);
    assert!(!credential.is_valid());
}
