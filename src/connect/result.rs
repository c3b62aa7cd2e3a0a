use std::fmt;

use serde::Serialize;

use crate::error::{ErrorCategory, RecoverySuggestion};

/// Outcome of one workout submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionResult {
    Success(CreatedWorkout),
    Failure(SubmissionFailure),
}

impl SubmissionResult {
    pub fn failure(reason: FailureReason, detail: impl Into<String>) -> Self {
        Self::Failure(SubmissionFailure {
            reason,
            detail: detail.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether the caller should drop the credential and log in again.
    pub fn needs_reauthentication(&self) -> bool {
        matches!(
            self,
            Self::Failure(SubmissionFailure {
                reason: FailureReason::AuthExpired,
                ..
            })
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedWorkout {
    pub workout_id: String,
    pub name: String,
    pub view_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    AuthExpired,
    HttpError,
    NetworkError,
}

impl FailureReason {
    pub fn category(self) -> ErrorCategory {
        match self {
            FailureReason::AuthExpired => ErrorCategory::AuthExpired,
            FailureReason::HttpError => ErrorCategory::Http,
            FailureReason::NetworkError => ErrorCategory::Network,
        }
    }

    pub fn recovery_suggestion(self) -> RecoverySuggestion {
        match self {
            FailureReason::AuthExpired => RecoverySuggestion::Reauthenticate,
            FailureReason::HttpError => RecoverySuggestion::ReportToProvider,
            FailureReason::NetworkError => RecoverySuggestion::CheckConnectivity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionFailure {
    pub reason: FailureReason,
    pub detail: String,
}

impl fmt::Display for SubmissionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            FailureReason::AuthExpired => write!(f, "Garmin session expired: {}", self.detail),
            FailureReason::HttpError => write!(f, "Garmin API error: {}", self.detail),
            FailureReason::NetworkError => write!(f, "Network error: {}", self.detail),
        }
    }
}
