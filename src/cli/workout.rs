//! CLI workout command handlers.

use std::path::Path;

use super::auth::report;
use crate::error::GarminError;
use crate::tools::{CreateWorkoutTool, Tool, WorkoutContext};
use crate::workout::{build_payload, WorkoutDescription};

/// Handle `garmin-workouts workout preview <file>`. No network access.
pub fn handle_preview(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let description: WorkoutDescription = serde_json::from_value(read_workout(file)?)?;
    let payload = build_payload(&description);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// Handle `garmin-workouts workout create <file>`.
pub async fn handle_create(
    ctx: WorkoutContext,
    file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let args = read_workout(file)?;
    report(CreateWorkoutTool::new(ctx).execute(&args).await)
}

fn read_workout(file: &Path) -> Result<serde_json::Value, GarminError> {
    let raw = std::fs::read_to_string(file).map_err(|err| {
        GarminError::InvalidArgument(format!("cannot read {}: {err}", file.display()))
    })?;
    Ok(serde_json::from_str(&raw)?)
}
