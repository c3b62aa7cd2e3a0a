//! Garmin Connect workout payload and the translation that builds it.

use serde::Serialize;

use super::codes::{ConditionType, SportType, StepKind, StepType, TargetType};
use super::parse::{parse_duration, parse_target};
use super::{WorkoutDescription, WorkoutStep};

/// Discriminator Connect uses for plain (non-repeat) steps.
pub const EXECUTABLE_STEP: &str = "ExecutableStepDTO";

/// Body of `POST /workout-service/workout`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminWorkoutPayload {
    pub sport_type: SportType,
    pub workout_name: String,
    pub workout_segments: Vec<WorkoutSegment>,
}

impl GarminWorkoutPayload {
    pub fn sport_key(&self) -> &'static str {
        self.sport_type.sport_type_key
    }

    pub fn steps(&self) -> impl Iterator<Item = &ExecutableStep> {
        self.workout_segments
            .iter()
            .flat_map(|segment| segment.workout_steps.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSegment {
    pub segment_order: u32,
    pub sport_type: SportType,
    pub workout_steps: Vec<ExecutableStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableStep {
    #[serde(rename = "type")]
    pub step_dto: &'static str,
    pub step_id: u32,
    pub step_order: u32,
    pub step_type: StepType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub end_condition: ConditionType,
    pub end_condition_value: f64,
    pub target_type: TargetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value_one: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value_two: Option<f64>,
}

/// Translate a workout into the Connect payload. Pure and deterministic.
///
/// # Example
/// ```
/// use garmin_workouts::workout::{build_payload, Intensity, Sport, WorkoutDescription, WorkoutStep};
///
/// let workout = WorkoutDescription {
///     name: "Intervals".to_string(),
///     sport: Sport::Running,
///     steps: vec![WorkoutStep::builder()
///         .duration("10:00")
///         .target("Zone 2")
///         .intensity(Intensity::Warmup)
///         .build()],
/// };
/// let payload = build_payload(&workout);
/// assert_eq!(payload.steps().next().unwrap().end_condition_value, 600.0);
/// ```
pub fn build_payload(description: &WorkoutDescription) -> GarminWorkoutPayload {
    let sport_type = description.sport.sport_type();
    let workout_steps = description
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| build_step(index as u32 + 1, step))
        .collect();

    GarminWorkoutPayload {
        sport_type,
        workout_name: description.name.clone(),
        workout_segments: vec![WorkoutSegment {
            segment_order: 1,
            sport_type,
            workout_steps,
        }],
    }
}

fn build_step(order: u32, step: &WorkoutStep) -> ExecutableStep {
    let duration = parse_duration(&step.duration);
    let target = parse_target(&step.target);
    let values = target.target_values();
    let name = step.name.trim();

    ExecutableStep {
        step_dto: EXECUTABLE_STEP,
        step_id: order,
        step_order: order,
        step_type: StepKind::from(step.intensity).step_type(),
        description: (!name.is_empty()).then(|| name.to_string()),
        end_condition: duration.condition.condition_type(),
        end_condition_value: duration.value,
        target_type: target.kind().target_type(),
        zone_number: target.zone_number(),
        target_value_one: values.map(|(low, _)| low),
        target_value_two: values.map(|(_, high)| high),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::{Intensity, Sport};

    fn step(duration: &str, target: &str, intensity: Intensity) -> WorkoutStep {
        WorkoutStep::builder()
            .duration(duration)
            .target(target)
            .intensity(intensity)
            .build()
    }

    fn interval_session() -> WorkoutDescription {
        WorkoutDescription {
            name: "4x1k".to_string(),
            sport: Sport::Running,
            steps: vec![
                step("10:00", "Zone 2", Intensity::Warmup),
                step("1.0 km", "Zone 4", Intensity::Active),
                step("2:00", "Open", Intensity::Rest),
                step("10:00", "Zone 2", Intensity::Cooldown),
            ],
        }
    }

    #[test]
    fn interval_session_translates_step_by_step() {
        let payload = build_payload(&interval_session());
        let steps: Vec<_> = payload.steps().collect();

        assert_eq!(steps.len(), 4);
        let values: Vec<f64> = steps.iter().map(|s| s.end_condition_value).collect();
        assert_eq!(values, vec![600.0, 1000.0, 120.0, 600.0]);

        let conditions: Vec<_> = steps
            .iter()
            .map(|s| s.end_condition.condition_type_key)
            .collect();
        assert_eq!(conditions, vec!["time", "distance", "time", "time"]);

        let targets: Vec<_> = steps
            .iter()
            .map(|s| (s.target_type.workout_target_type_key, s.zone_number))
            .collect();
        assert_eq!(
            targets,
            vec![
                ("heart.rate.zone", Some(2)),
                ("heart.rate.zone", Some(4)),
                ("no.target", None),
                ("heart.rate.zone", Some(2)),
            ]
        );

        let kinds: Vec<_> = steps.iter().map(|s| s.step_type.step_type_key).collect();
        assert_eq!(kinds, vec!["warmup", "interval", "recovery", "cooldown"]);
    }

    #[test]
    fn step_ids_follow_input_order() {
        let payload = build_payload(&interval_session());
        for (index, step) in payload.steps().enumerate() {
            assert_eq!(step.step_order, index as u32 + 1);
            assert_eq!(step.step_id, step.step_order);
            assert_eq!(step.step_dto, EXECUTABLE_STEP);
        }
    }

    #[test]
    fn single_segment_repeats_sport() {
        let mut workout = interval_session();
        workout.sport = Sport::Cycling;
        let payload = build_payload(&workout);

        assert_eq!(payload.workout_segments.len(), 1);
        assert_eq!(payload.workout_segments[0].segment_order, 1);
        assert_eq!(payload.workout_segments[0].sport_type, payload.sport_type);
        assert_eq!(payload.sport_key(), "cycling");
        assert_eq!(payload.workout_name, "4x1k");
    }

    #[test]
    fn build_is_deterministic() {
        let first = serde_json::to_string(&build_payload(&interval_session())).unwrap();
        let second = serde_json::to_string(&build_payload(&interval_session())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn zone_number_is_omitted_unless_zone_target() {
        let workout = WorkoutDescription {
            name: "Targets".to_string(),
            sport: Sport::Running,
            steps: vec![
                step("5:00", "138 BPM", Intensity::Active),
                step("5:00", "4:30/km", Intensity::Active),
                step("Open", "Zone 3", Intensity::Active),
            ],
        };
        let value = serde_json::to_value(build_payload(&workout)).unwrap();
        let steps = value["workoutSegments"][0]["workoutSteps"].as_array().unwrap();

        assert!(steps[0].get("zoneNumber").is_none());
        assert_eq!(steps[0]["targetValueOne"], 138.0);
        assert!(steps[1].get("zoneNumber").is_none());
        assert_eq!(steps[1]["targetType"]["workoutTargetTypeKey"], "pace.zone");
        assert_eq!(steps[2]["zoneNumber"], 3);
        assert!(steps[2].get("targetValueOne").is_none());
        assert_eq!(steps[2]["endCondition"]["conditionTypeKey"], "lap.button");
    }

    #[test]
    fn step_names_become_descriptions() {
        let workout = WorkoutDescription {
            name: "Named".to_string(),
            sport: Sport::Swimming,
            steps: vec![
                WorkoutStep::builder()
                    .name("Main set")
                    .duration("400 m")
                    .target("Open")
                    .build(),
                step("100 m", "Open", Intensity::Rest),
            ],
        };
        let payload = build_payload(&workout);
        let steps: Vec<_> = payload.steps().collect();
        assert_eq!(steps[0].description.as_deref(), Some("Main set"));
        assert_eq!(steps[0].step_type.step_type_key, "interval");
        assert_eq!(steps[1].description, None);
        assert_eq!(payload.sport_type.sport_type_id, 4);
    }

    #[test]
    fn empty_workout_has_one_empty_segment() {
        let workout = WorkoutDescription {
            name: "Nothing".to_string(),
            sport: Sport::Running,
            steps: Vec::new(),
        };
        let payload = build_payload(&workout);
        assert_eq!(payload.workout_segments.len(), 1);
        assert!(payload.workout_segments[0].workout_steps.is_empty());
    }
}
