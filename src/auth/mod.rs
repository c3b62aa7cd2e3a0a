//! Garmin Connect credentials: capture, validity, persistence.

pub mod browser;
pub mod credential;
pub mod error;
pub mod jwt;
pub mod manager;
pub mod store;

pub use credential::Credential;
pub use error::AuthError;
pub use manager::{CredentialAcquirer, CredentialManager, CredentialStatus};
pub use store::{CredentialStore, FileCredentialStore};
