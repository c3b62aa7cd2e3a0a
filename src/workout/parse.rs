//! Lenient parsing of free-form step durations and targets.
//!
//! Nothing here rejects input: anything unrecognised degrades to a
//! lap-button step or to no target.

use std::sync::OnceLock;

use regex::Regex;

use super::codes::{EndCondition, TargetKind};

/// `endConditionValue` sent with lap-button steps, which have no real limit.
pub const LAP_BUTTON_VALUE: f64 = 0.0;

/// End condition and its magnitude (seconds for time, meters for distance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedDuration {
    pub condition: EndCondition,
    pub value: f64,
}

impl ParsedDuration {
    pub const LAP_BUTTON: Self = Self {
        condition: EndCondition::LapButton,
        value: LAP_BUTTON_VALUE,
    };

    fn time(seconds: u64) -> Self {
        Self {
            condition: EndCondition::Time,
            value: seconds as f64,
        }
    }

    fn distance(meters: f64) -> Self {
        Self {
            condition: EndCondition::Distance,
            value: meters,
        }
    }
}

/// Parsed step target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTarget {
    NoTarget,
    HeartRateZone { zone: u32 },
    HeartRateBpm { bpm: u32 },
    Pace { seconds_per_km: u32 },
}

impl StepTarget {
    pub fn kind(&self) -> TargetKind {
        match self {
            StepTarget::NoTarget => TargetKind::NoTarget,
            StepTarget::HeartRateZone { .. } => TargetKind::HeartRateZone,
            StepTarget::HeartRateBpm { .. } => TargetKind::HeartRateBpm,
            StepTarget::Pace { .. } => TargetKind::PaceZone,
        }
    }

    /// Zone number; only heart-rate zone targets carry one.
    pub fn zone_number(&self) -> Option<u32> {
        match self {
            StepTarget::HeartRateZone { zone } => Some(*zone),
            _ => None,
        }
    }

    /// Explicit `(low, high)` bounds: beats per minute, or meters per second for pace.
    pub fn target_values(&self) -> Option<(f64, f64)> {
        match self {
            StepTarget::HeartRateBpm { bpm } => Some((f64::from(*bpm), f64::from(*bpm))),
            StepTarget::Pace { seconds_per_km } if *seconds_per_km > 0 => {
                let speed = round_to(1000.0 / f64::from(*seconds_per_km), 3);
                Some((speed, speed))
            }
            _ => None,
        }
    }
}

/// Parse a step duration.
///
/// - `"Open"` → lap button
/// - `"<n> km"` / `"<n> m"` → distance in meters
/// - `"MM:SS"` / `"HH:MM:SS"` → time in seconds
/// - anything else → lap button
pub fn parse_duration(input: &str) -> ParsedDuration {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("open") {
        return ParsedDuration::LAP_BUTTON;
    }

    if let Some(captures) = distance_regex().captures(input) {
        if let Ok(amount) = captures[1].parse::<f64>() {
            let meters = if captures[2].eq_ignore_ascii_case("km") {
                amount * 1000.0
            } else {
                amount
            };
            return ParsedDuration::distance(round_to(meters, 3));
        }
    }

    if let Some(seconds) = parse_clock(input) {
        return ParsedDuration::time(seconds);
    }

    ParsedDuration::LAP_BUTTON
}

/// Parse a step target. Rules are tried in order zone, BPM, pace; first match wins.
pub fn parse_target(input: &str) -> StepTarget {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("open") {
        return StepTarget::NoTarget;
    }

    if let Some(zone) = first_number(zone_regex(), input) {
        return StepTarget::HeartRateZone { zone };
    }
    if let Some(bpm) = first_number(bpm_regex(), input) {
        return StepTarget::HeartRateBpm { bpm };
    }
    if let Some(captures) = pace_regex().captures(input) {
        if let (Ok(minutes), Ok(seconds)) = (captures[1].parse::<u32>(), captures[2].parse::<u32>()) {
            return StepTarget::Pace {
                seconds_per_km: minutes * 60 + seconds,
            };
        }
    }

    StepTarget::NoTarget
}

fn parse_clock(input: &str) -> Option<u64> {
    let parts: Vec<&str> = input.split(':').collect();
    if !parts
        .iter()
        .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }
    let numbers: Vec<u64> = parts
        .iter()
        .map(|part| part.parse::<u64>())
        .collect::<Result<_, _>>()
        .ok()?;
    match numbers.as_slice() {
        [minutes, seconds] => minutes.checked_mul(60)?.checked_add(*seconds),
        [hours, minutes, seconds] => hours
            .checked_mul(3600)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(*seconds),
        _ => None,
    }
}

fn first_number(regex: &Regex, input: &str) -> Option<u32> {
    regex
        .captures(input)
        .and_then(|captures| captures[1].parse().ok())
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn distance_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*(km|m)$").expect("valid distance regex"))
}

fn zone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bzone\s*(\d+)").expect("valid zone regex"))
}

fn bpm_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)\s*bpm\b").expect("valid bpm regex"))
}

fn pace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(\d{1,2}):([0-5]\d)\s*/\s*km\b").expect("valid pace regex"))
}
