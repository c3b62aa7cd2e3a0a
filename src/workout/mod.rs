//! Structured workouts and their translation into Garmin Connect payloads.

pub mod codes;
pub mod parse;
pub mod payload;

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub use parse::{parse_duration, parse_target, ParsedDuration, StepTarget};
pub use payload::{build_payload, ExecutableStep, GarminWorkoutPayload, WorkoutSegment};

/// Sport of a workout. Unknown labels fall back to running.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase", from = "String")]
#[strum(ascii_case_insensitive)]
pub enum Sport {
    #[default]
    #[strum(to_string = "running", serialize = "run")]
    Running,
    #[strum(to_string = "cycling", serialize = "bike", serialize = "ride")]
    Cycling,
    #[strum(to_string = "swimming", serialize = "swim")]
    Swimming,
}

impl From<String> for Sport {
    fn from(label: String) -> Self {
        label.trim().parse().unwrap_or_default()
    }
}

/// Intensity of a step. Unknown labels fall back to active.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase", from = "String")]
#[strum(ascii_case_insensitive)]
pub enum Intensity {
    #[strum(to_string = "warmup", serialize = "warm-up", serialize = "warm up")]
    Warmup,
    #[default]
    #[strum(to_string = "active", serialize = "interval")]
    Active,
    #[strum(to_string = "rest", serialize = "recovery")]
    Rest,
    #[strum(to_string = "cooldown", serialize = "cool-down", serialize = "cool down")]
    Cooldown,
}

impl From<String> for Intensity {
    fn from(label: String) -> Self {
        label.trim().parse().unwrap_or_default()
    }
}

/// One step as described by the caller.
///
/// `duration` and `target` stay free-form; see [`parse_duration`] and
/// [`parse_target`] for the accepted shapes.
///
/// # Example
/// ```
/// use garmin_workouts::workout::{Intensity, WorkoutStep};
///
/// let step = WorkoutStep::builder()
///     .name("Threshold")
///     .duration("1.0 km")
///     .target("Zone 4")
///     .intensity(Intensity::Active)
///     .build();
/// assert_eq!(step.duration, "1.0 km");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct WorkoutStep {
    #[builder(into, default)]
    #[serde(default)]
    pub name: String,
    #[builder(into)]
    #[serde(default = "open")]
    pub duration: String,
    #[builder(into)]
    #[serde(default = "open")]
    pub target: String,
    #[builder(default)]
    #[serde(default)]
    pub intensity: Intensity,
}

/// A whole workout: name, sport and ordered steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDescription {
    pub name: String,
    #[serde(default)]
    pub sport: Sport,
    pub steps: Vec<WorkoutStep>,
}

fn open() -> String {
    "Open".to_string()
}
