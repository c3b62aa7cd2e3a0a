//! CLI auth command handlers for login, status, and logout.

use crate::tools::{AuthStatusTool, AuthenticateTool, Tool, ToolOutput, WorkoutContext};

/// Handle `garmin-workouts auth login`.
pub async fn handle_login(ctx: WorkoutContext) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔗 A browser window will open. Log in to Garmin Connect there.");
    println!("⏳ Waiting for login...");
    report(AuthenticateTool::new(ctx).execute(&serde_json::Value::Null).await)
}

/// Handle `garmin-workouts auth status`.
pub async fn handle_status(ctx: WorkoutContext) -> Result<(), Box<dyn std::error::Error>> {
    report(AuthStatusTool::new(ctx).execute(&serde_json::Value::Null).await)
}

/// Handle `garmin-workouts auth logout`.
pub async fn handle_logout(ctx: WorkoutContext) -> Result<(), Box<dyn std::error::Error>> {
    ctx.credentials.invalidate_credential()?;
    println!("✅ Garmin Connect session removed");
    Ok(())
}

pub(crate) fn report(output: ToolOutput) -> Result<(), Box<dyn std::error::Error>> {
    if output.success {
        println!("✅ {}", output.summary);
        Ok(())
    } else {
        Err(output.summary.into())
    }
}
