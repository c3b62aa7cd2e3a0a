//! Garmin tools: credential status, interactive login and workout creation.
//!
//! Each tool shares one [`WorkoutContext`] and reports every outcome as a
//! human-readable [`ToolOutput`].
//!
//! # Usage
//!
//! ```rust,no_run
//! # fn example(ctx: garmin_workouts::tools::WorkoutContext) {
//! use garmin_workouts::tools::all_tools;
//!
//! let tools = all_tools(ctx);
//! assert_eq!(tools.len(), 3);
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::tool::{Tool, WorkoutContext};
use super::types::{ToolOutput, ToolParameters};
use crate::auth::CredentialStatus;
use crate::connect::{FailureReason, SubmissionResult};
use crate::error::GarminError;
use crate::workout::{build_payload, WorkoutDescription};

pub const AUTH_STATUS_TOOL: &str = "garmin_auth_status";
pub const AUTHENTICATE_TOOL: &str = "garmin_authenticate";
pub const CREATE_WORKOUT_TOOL: &str = "garmin_create_workout";

const SPORTS: &[&str] = &["running", "cycling", "swimming"];
const INTENSITIES: &[&str] = &["warmup", "active", "rest", "cooldown"];

/// All Garmin tools bound to one context.
pub fn all_tools(ctx: WorkoutContext) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(AuthStatusTool::new(ctx.clone())),
        Arc::new(AuthenticateTool::new(ctx.clone())),
        Arc::new(CreateWorkoutTool::new(ctx)),
    ]
}

/// Reports whether a usable credential is stored.
pub struct AuthStatusTool {
    ctx: WorkoutContext,
    parameters: ToolParameters,
}

impl AuthStatusTool {
    pub fn new(ctx: WorkoutContext) -> Self {
        Self {
            ctx,
            parameters: ToolParameters::empty(),
        }
    }
}

#[async_trait]
impl Tool for AuthStatusTool {
    fn name(&self) -> &str {
        AUTH_STATUS_TOOL
    }

    fn description(&self) -> &str {
        "Check whether a valid Garmin Connect session is stored"
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(&self, _args: &serde_json::Value) -> ToolOutput {
        match self.ctx.credentials.status() {
            CredentialStatus::Valid { expires_at } => ToolOutput::success(format!(
                "Authenticated with Garmin Connect. Session expires at {}.",
                format_time(expires_at)
            )),
            CredentialStatus::Expired { expires_at } => ToolOutput::failure(format!(
                "Garmin Connect session expired at {}. Run {AUTHENTICATE_TOOL} to log in again.",
                format_time(expires_at)
            )),
            CredentialStatus::Missing => ToolOutput::failure(format!(
                "Not authenticated with Garmin Connect. Run {AUTHENTICATE_TOOL} to log in."
            )),
        }
    }
}

/// Opens a browser so the operator can log in, then stores the captured session.
pub struct AuthenticateTool {
    ctx: WorkoutContext,
    parameters: ToolParameters,
}

impl AuthenticateTool {
    pub fn new(ctx: WorkoutContext) -> Self {
        Self {
            ctx,
            parameters: ToolParameters::empty(),
        }
    }
}

#[async_trait]
impl Tool for AuthenticateTool {
    fn name(&self) -> &str {
        AUTHENTICATE_TOOL
    }

    fn description(&self) -> &str {
        "Open a browser window to log in to Garmin Connect and store the session"
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(&self, _args: &serde_json::Value) -> ToolOutput {
        match self.ctx.credentials.acquire_credential().await {
            Ok(credential) => ToolOutput::success(format!(
                "Logged in to Garmin Connect. Session expires at {}.",
                format_time(credential.expires_at)
            )),
            Err(err) => failure_output("Garmin login failed", &GarminError::from(err)),
        }
    }
}

/// Translates a structured workout and creates it in Garmin Connect.
pub struct CreateWorkoutTool {
    ctx: WorkoutContext,
    parameters: ToolParameters,
}

impl CreateWorkoutTool {
    pub fn new(ctx: WorkoutContext) -> Self {
        let step = ToolParameters::object()
            .string("name", "Optional step label", false)
            .string(
                "duration",
                "\"Open\", \"MM:SS\", \"HH:MM:SS\", or a distance like \"1.0 km\" / \"400 m\"",
                true,
            )
            .string(
                "target",
                "\"Open\", \"Zone <n>\", \"<n> BPM\", or a pace like \"4:30/km\"",
                true,
            )
            .string_enum("intensity", "Step intensity", INTENSITIES, true);
        let parameters = ToolParameters::object()
            .string("name", "Workout name shown in Garmin Connect", true)
            .string_enum("sport", "Sport of the workout", SPORTS, true)
            .array("steps", "Ordered workout steps", step, true)
            .build();
        Self { ctx, parameters }
    }

    async fn create(&self, args: &serde_json::Value) -> Result<ToolOutput, GarminError> {
        let description = parse_workout(args)?;
        let credential = self.ctx.credentials.ensure_credential().await?;
        let payload = build_payload(&description);

        match self.ctx.client.submit(&payload, &credential).await {
            SubmissionResult::Success(created) => Ok(ToolOutput::success(format!(
                "Created workout \"{}\" ({} steps) in Garmin Connect: {}",
                created.name,
                description.steps.len(),
                created.view_url
            ))),
            SubmissionResult::Failure(failure) if failure.reason == FailureReason::AuthExpired => {
                if let Err(err) = self.ctx.credentials.invalidate_credential() {
                    tracing::warn!(error = %err, "Failed to clear rejected credential");
                }
                Ok(ToolOutput::failure(format!(
                    "Garmin Connect rejected the stored session. Run {AUTHENTICATE_TOOL} to log in again, then retry."
                )))
            }
            SubmissionResult::Failure(failure) => Ok(ToolOutput::failure(format!(
                "Failed to create workout: {failure}. {}",
                failure.reason.recovery_suggestion().hint()
            ))),
        }
    }
}

#[async_trait]
impl Tool for CreateWorkoutTool {
    fn name(&self) -> &str {
        CREATE_WORKOUT_TOOL
    }

    fn description(&self) -> &str {
        "Create a structured workout in Garmin Connect from a name, sport and ordered steps"
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(&self, args: &serde_json::Value) -> ToolOutput {
        match self.create(args).await {
            Ok(output) => output,
            Err(err) => failure_output("Failed to create workout", &err),
        }
    }
}

fn parse_workout(args: &serde_json::Value) -> Result<WorkoutDescription, GarminError> {
    let workout: WorkoutDescription = serde_json::from_value(args.clone())
        .map_err(|err| GarminError::InvalidArgument(err.to_string()))?;
    if workout.name.trim().is_empty() {
        return Err(GarminError::InvalidArgument(
            "workout name must not be empty".into(),
        ));
    }
    if workout.steps.is_empty() {
        return Err(GarminError::InvalidArgument(
            "workout needs at least one step".into(),
        ));
    }
    Ok(workout)
}

fn failure_output(context: &str, err: &GarminError) -> ToolOutput {
    ToolOutput::failure(format!(
        "{context}: {err}. {}",
        err.recovery_suggestion().hint()
    ))
}

fn format_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
