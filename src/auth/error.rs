use thiserror::Error;

use crate::error::ErrorCategory;

/// Normalized failures of the credential component.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Login was not completed within {secs} seconds")]
    LoginTimeout { secs: u64 },
    #[error("No bearer token was observed during login")]
    TokenNotCaptured,
    #[error("Captured token is already expired or carries no expiry claim")]
    InvalidToken,
    #[error("Browser error: {0}")]
    Browser(String),
    #[error("Stored credential is malformed: {0}")]
    MalformedCredential(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AuthError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedCredential(_) => ErrorCategory::NoCredential,
            Self::LoginTimeout { .. } => ErrorCategory::AcquisitionTimeout,
            Self::TokenNotCaptured | Self::InvalidToken | Self::Browser(_) => {
                ErrorCategory::AcquisitionFailure
            }
            Self::Io(_) => ErrorCategory::Io,
            Self::Serialization(_) => ErrorCategory::Serialization,
        }
    }
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

#[cfg(feature = "browser")]
impl From<chromiumoxide::error::CdpError> for AuthError {
    fn from(error: chromiumoxide::error::CdpError) -> Self {
        Self::Browser(error.to_string())
    }
}
