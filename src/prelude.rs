//! Convenience re-exports for common use.

pub use crate::auth::{Credential, CredentialManager, CredentialStatus, FileCredentialStore};
pub use crate::config::GarminConfig;
pub use crate::connect::{ConnectClient, SubmissionResult};
pub use crate::error::{GarminError, Result};
pub use crate::tools::{Tool, ToolOutput, WorkoutContext};
pub use crate::workout::{build_payload, Intensity, Sport, WorkoutDescription, WorkoutStep};
