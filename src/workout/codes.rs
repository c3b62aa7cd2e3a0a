//! Garmin Connect type codes.
//!
//! Each code is an `{id, key, displayOrder}` triple exactly as the Connect
//! web client sends it.

use serde::Serialize;

use super::{Intensity, Sport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SportType {
    pub sport_type_id: u32,
    pub sport_type_key: &'static str,
    pub display_order: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepType {
    pub step_type_id: u32,
    pub step_type_key: &'static str,
    pub display_order: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionType {
    pub condition_type_id: u32,
    pub condition_type_key: &'static str,
    pub display_order: u32,
    pub displayable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetType {
    pub workout_target_type_id: u32,
    pub workout_target_type_key: &'static str,
    pub display_order: u32,
}

impl Sport {
    pub fn sport_type(self) -> SportType {
        let (sport_type_id, sport_type_key, display_order) = match self {
            Sport::Running => (1, "running", 1),
            Sport::Cycling => (2, "cycling", 2),
            Sport::Swimming => (4, "swimming", 3),
        };
        SportType {
            sport_type_id,
            sport_type_key,
            display_order,
        }
    }
}

/// Step type a workout step is sent as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Warmup,
    Cooldown,
    Interval,
    Recovery,
}

impl From<Intensity> for StepKind {
    fn from(intensity: Intensity) -> Self {
        match intensity {
            Intensity::Warmup => StepKind::Warmup,
            Intensity::Cooldown => StepKind::Cooldown,
            Intensity::Active => StepKind::Interval,
            Intensity::Rest => StepKind::Recovery,
        }
    }
}

impl StepKind {
    pub fn step_type(self) -> StepType {
        let (step_type_id, step_type_key, display_order) = match self {
            StepKind::Warmup => (1, "warmup", 1),
            StepKind::Cooldown => (2, "cooldown", 2),
            StepKind::Interval => (3, "interval", 3),
            StepKind::Recovery => (4, "recovery", 4),
        };
        StepType {
            step_type_id,
            step_type_key,
            display_order,
        }
    }
}

/// What ends a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCondition {
    LapButton,
    Time,
    Distance,
}

impl EndCondition {
    pub fn condition_type(self) -> ConditionType {
        let (condition_type_id, condition_type_key, display_order) = match self {
            EndCondition::LapButton => (1, "lap.button", 1),
            EndCondition::Time => (2, "time", 2),
            EndCondition::Distance => (3, "distance", 3),
        };
        ConditionType {
            condition_type_id,
            condition_type_key,
            display_order,
            displayable: true,
        }
    }
}

/// Guidance attached to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    NoTarget,
    HeartRateZone,
    /// Custom heart-rate range; Connect files it under the heart-rate target
    /// code with explicit bounds instead of a zone number.
    HeartRateBpm,
    PaceZone,
}

impl TargetKind {
    pub fn target_type(self) -> TargetType {
        let (workout_target_type_id, workout_target_type_key, display_order) = match self {
            TargetKind::NoTarget => (1, "no.target", 1),
            TargetKind::HeartRateZone | TargetKind::HeartRateBpm => (4, "heart.rate.zone", 4),
            TargetKind::PaceZone => (6, "pace.zone", 6),
        };
        TargetType {
            workout_target_type_id,
            workout_target_type_key,
            display_order,
        }
    }
}
