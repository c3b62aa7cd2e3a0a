//! Caller-facing tool surface for orchestration layers.

pub mod garmin;
pub mod tool;
pub mod types;

pub use garmin::{all_tools, AuthStatusTool, AuthenticateTool, CreateWorkoutTool};
pub use tool::{Tool, WorkoutContext};
pub use types::{ParameterBuilder, ToolOutput, ToolParameters};
