use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::credential::Credential;
use super::error::AuthError;

const CREDENTIAL_FILE_VERSION: u32 = 1;

/// Single-slot storage for the persisted credential.
pub trait CredentialStore: Send + Sync {
    /// Read the stored credential. Absent, empty and unparseable records are `Ok(None)`.
    fn load(&self) -> Result<Option<Credential>, AuthError>;
    /// Replace the stored credential.
    fn save(&self, credential: &Credential) -> Result<(), AuthError>;
    /// Remove the stored credential. Succeeds when nothing is stored.
    fn clear(&self) -> Result<(), AuthError>;
}

/// File-backed credential store writing one JSON document.
///
/// # Example
/// ```no_run
/// use garmin_workouts::auth::{CredentialStore, FileCredentialStore};
///
/// let store = FileCredentialStore::new_default();
/// if let Some(credential) = store.load()? {
///     println!("expires at {}", credential.expires_at);
/// }
/// # Ok::<(), garmin_workouts::auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn new_default() -> Self {
        Self::new(crate::config::default_credential_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>, AuthError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AuthError::Io(err.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<CredentialFile>(&raw) {
            Ok(file) if file.version == CREDENTIAL_FILE_VERSION => Ok(Some(file.credential)),
            Ok(file) => {
                tracing::warn!(
                    version = file.version,
                    path = %self.path.display(),
                    "Ignoring credential file with unsupported version"
                );
                Ok(None)
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    path = %self.path.display(),
                    "Ignoring unreadable credential file"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, credential: &Credential) -> Result<(), AuthError> {
        let file = CredentialFile {
            version: CREDENTIAL_FILE_VERSION,
            credential: credential.clone(),
            saved_at: Utc::now(),
        };
        let serialized = serde_json::to_vec_pretty(&file)?;
        atomic_write(&self.path, &serialized)
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::Io(err.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialFile {
    version: u32,
    credential: Credential,
    saved_at: DateTime<Utc>,
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path.file_name().ok_or_else(|| {
        AuthError::Io(format!("Credential path {} has no file name", path.display()))
    })?;

    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let temp_path = path.with_file_name(format!(
        ".{}.tmp-{}-{nonce}",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let write_result = (|| -> std::io::Result<()> {
        let mut temp_file = options.open(&temp_path)?;
        temp_file.write_all(data)?;
        temp_file.sync_all()?;
        Ok(())
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }

    #[cfg(unix)]
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;

    Ok(())
}
