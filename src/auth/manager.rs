use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::credential::Credential;
use super::error::AuthError;
use super::store::CredentialStore;

/// Obtains a fresh credential, typically through an interactive login.
#[async_trait]
pub trait CredentialAcquirer: Send + Sync {
    async fn acquire(&self) -> Result<Credential, AuthError>;
}

/// What the stored credential looks like right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    Missing,
    Expired { expires_at: DateTime<Utc> },
    Valid { expires_at: DateTime<Utc> },
}

/// Owns the credential lifecycle: read-check, acquisition, persistence, invalidation.
///
/// Acquisitions through one manager are serialized, so two callers racing to
/// log in share a single browser session instead of opening two.
///
/// # Example
/// ```no_run
/// # #[cfg(feature = "browser")]
/// # async fn example() -> Result<(), garmin_workouts::auth::AuthError> {
/// use std::sync::Arc;
/// use garmin_workouts::auth::browser::{BrowserLogin, ChromiumLauncher};
/// use garmin_workouts::auth::{CredentialManager, FileCredentialStore};
/// use garmin_workouts::config::GarminConfig;
///
/// let config = GarminConfig::load();
/// let manager = CredentialManager::new(
///     Arc::new(FileCredentialStore::new(config.credential_path.clone())),
///     Arc::new(BrowserLogin::new(ChromiumLauncher::from_config(&config), (&config).into())),
/// );
/// let credential = manager.ensure_credential().await?;
/// # Ok(())
/// # }
/// ```
pub struct CredentialManager {
    store: Arc<dyn CredentialStore>,
    acquirer: Arc<dyn CredentialAcquirer>,
    acquire_lock: Mutex<()>,
}

impl CredentialManager {
    pub fn new(store: Arc<dyn CredentialStore>, acquirer: Arc<dyn CredentialAcquirer>) -> Self {
        Self {
            store,
            acquirer,
            acquire_lock: Mutex::new(()),
        }
    }

    /// Stored credential, if it is still valid. Never touches the network.
    pub fn get_valid_credential(&self) -> Option<Credential> {
        self.load().filter(Credential::is_valid)
    }

    pub fn status(&self) -> CredentialStatus {
        match self.load() {
            None => CredentialStatus::Missing,
            Some(credential) if credential.is_valid() => CredentialStatus::Valid {
                expires_at: credential.expires_at,
            },
            Some(credential) => CredentialStatus::Expired {
                expires_at: credential.expires_at,
            },
        }
    }

    /// Run the interactive acquisition and persist its result.
    ///
    /// Nothing is written when acquisition fails.
    pub async fn acquire_credential(&self) -> Result<Credential, AuthError> {
        let _guard = self.acquire_lock.lock().await;
        self.acquire_locked().await
    }

    /// Stored credential when valid, otherwise a freshly acquired one.
    ///
    /// A caller that waited on another acquisition reuses its result.
    pub async fn ensure_credential(&self) -> Result<Credential, AuthError> {
        if let Some(credential) = self.get_valid_credential() {
            return Ok(credential);
        }
        let _guard = self.acquire_lock.lock().await;
        if let Some(credential) = self.get_valid_credential() {
            return Ok(credential);
        }
        let credential = self.acquire_locked().await?;
        if !credential.is_valid() {
            return Err(AuthError::InvalidToken);
        }
        Ok(credential)
    }

    /// Forget the stored credential. Idempotent.
    pub fn invalidate_credential(&self) -> Result<(), AuthError> {
        self.store.clear()?;
        tracing::info!("Stored Garmin credential cleared");
        Ok(())
    }

    async fn acquire_locked(&self) -> Result<Credential, AuthError> {
        let credential = match self.acquirer.acquire().await {
            Ok(credential) => credential,
            Err(err) => {
                tracing::warn!(error = %err, "Credential acquisition failed");
                return Err(err);
            }
        };
        self.store.save(&credential)?;
        tracing::info!(expires_at = %credential.expires_at, "Garmin credential stored");
        Ok(credential)
    }

    fn load(&self) -> Option<Credential> {
        match self.store.load() {
            Ok(credential) => credential,
            Err(err) => {
                tracing::warn!(error = %err, "Treating unreadable credential store as empty");
                None
            }
        }
    }
}
