//! Tool trait and the shared context Garmin tools run against.

use std::sync::Arc;

use async_trait::async_trait;

use super::types::{ToolOutput, ToolParameters};
use crate::auth::CredentialManager;
use crate::connect::ConnectClient;

/// State shared by every Garmin tool.
#[derive(Clone)]
pub struct WorkoutContext {
    pub credentials: Arc<CredentialManager>,
    pub client: ConnectClient,
}

impl WorkoutContext {
    pub fn new(credentials: Arc<CredentialManager>, client: ConnectClient) -> Self {
        Self {
            credentials,
            client,
        }
    }
}

impl std::fmt::Debug for WorkoutContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutContext")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

/// Core tool trait. Implementations never fail outright: every outcome,
/// including bad arguments, comes back as a [`ToolOutput`] summary.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the caller invokes).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema parameters.
    fn parameters(&self) -> &ToolParameters;

    /// Execute the tool with raw JSON arguments.
    async fn execute(&self, args: &serde_json::Value) -> ToolOutput;
}

impl std::fmt::Debug for dyn Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool").field("name", &self.name()).finish()
    }
}
