//! Error types for garmin-workouts.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

use crate::auth::AuthError;

/// Primary error type for library operations outside the credential boundary.
#[derive(Error, Debug)]
pub enum GarminError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl GarminError {
    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Network(_) => ErrorCategory::Network,
            Self::Io(_) => ErrorCategory::Io,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Authentication(err) => err.category(),
            Self::InvalidArgument(_) => ErrorCategory::InvalidInput,
        }
    }

    /// Suggest the operator action for this error.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::NoCredential
            | ErrorCategory::AuthExpired
            | ErrorCategory::AcquisitionTimeout => RecoverySuggestion::Reauthenticate,
            ErrorCategory::AcquisitionFailure
            | ErrorCategory::Configuration
            | ErrorCategory::Io => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::Network => RecoverySuggestion::CheckConnectivity,
            ErrorCategory::InvalidInput => RecoverySuggestion::CheckInput,
            ErrorCategory::Http | ErrorCategory::Serialization => {
                RecoverySuggestion::ReportToProvider
            }
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GarminError>;
