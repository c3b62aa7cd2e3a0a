//! Error classification and recovery hints.

use serde::{Deserialize, Serialize};

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// No stored credential, or the stored one is unusable.
    NoCredential,
    /// Interactive login did not finish in time.
    AcquisitionTimeout,
    /// Browser launch, automation or token capture failed.
    AcquisitionFailure,
    /// Provider rejected the bearer token (HTTP 401).
    AuthExpired,
    /// Provider answered with a non-success status.
    Http,
    /// Transport-level failure before a response arrived.
    Network,
    Configuration,
    InvalidInput,
    Io,
    Serialization,
}

/// Suggested operator action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    Reauthenticate,
    CheckInput,
    CheckConfiguration,
    CheckConnectivity,
    ReportToProvider,
}

impl RecoverySuggestion {
    /// One-line instruction suitable for an operator.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Reauthenticate => "Run the Garmin authentication step and try again.",
            Self::CheckInput => "Check the workout description and try again.",
            Self::CheckConfiguration => "Check the garmin-workouts configuration and file permissions.",
            Self::CheckConnectivity => "Check the network connection and try again.",
            Self::ReportToProvider => "Garmin Connect returned an unexpected response.",
        }
    }
}
