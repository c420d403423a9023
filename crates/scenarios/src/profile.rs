//! Execution profiles describing the load shape of a scenario
//!
//! A profile is handed to the runner's scheduler as-is: a single iteration,
//! a constant number of virtual users for a fixed time, or a staged ramp
//! where each stage moves linearly to a target VU count.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Invalid duration '{0}': expected forms like 30s, 1m or 1h30m")]
    InvalidDuration(String),

    #[error("Invalid stage '{0}': expected <target>:<duration>, e.g. 50:30s")]
    InvalidStage(String),

    #[error("Invalid profile: {0}")]
    Invalid(String),
}

/// One step of a staged ramp
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub duration: Duration,
    pub target: usize,
}

impl Stage {
    pub fn new(target: usize, duration: Duration) -> Self {
        Self { duration, target }
    }
}

/// Load shape of a scenario
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionProfile {
    /// One virtual user, one iteration
    #[default]
    SingleIteration,
    /// Fixed number of VUs looping for a fixed time
    Constant { vus: usize, duration: Duration },
    /// Ordered stages, each ramping towards its target
    Ramp(Vec<Stage>),
}

impl ExecutionProfile {
    pub fn constant(vus: usize, duration: Duration) -> Self {
        ExecutionProfile::Constant { vus, duration }
    }

    pub fn ramp(stages: Vec<Stage>) -> Self {
        ExecutionProfile::Ramp(stages)
    }

    /// Total wall-clock time of the profile, `None` for a single iteration
    pub fn total_duration(&self) -> Option<Duration> {
        match self {
            ExecutionProfile::SingleIteration => None,
            ExecutionProfile::Constant { duration, .. } => Some(*duration),
            ExecutionProfile::Ramp(stages) => Some(stages.iter().map(|s| s.duration).sum()),
        }
    }

    /// Highest number of concurrent virtual users the profile reaches
    pub fn peak_vus(&self) -> usize {
        match self {
            ExecutionProfile::SingleIteration => 1,
            ExecutionProfile::Constant { vus, .. } => *vus,
            ExecutionProfile::Ramp(stages) => stages.iter().map(|s| s.target).max().unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        match self {
            ExecutionProfile::SingleIteration => Ok(()),
            ExecutionProfile::Constant { vus, duration } => {
                if *vus == 0 {
                    return Err(ProfileError::Invalid(
                        "constant load needs at least one VU".to_string(),
                    ));
                }
                if duration.as_secs() == 0 {
                    return Err(ProfileError::Invalid(
                        "constant load needs a duration of at least 1s".to_string(),
                    ));
                }
                Ok(())
            }
            ExecutionProfile::Ramp(stages) => {
                if stages.is_empty() {
                    return Err(ProfileError::Invalid(
                        "a ramp needs at least one stage".to_string(),
                    ));
                }
                if self.total_duration().map_or(0, |d| d.as_secs()) == 0 {
                    return Err(ProfileError::Invalid(
                        "a ramp needs a total duration of at least 1s".to_string(),
                    ));
                }
                if self.peak_vus() == 0 {
                    return Err(ProfileError::Invalid(
                        "a ramp needs at least one stage targeting a VU".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Options object consumed by the runner's scheduler:
    /// `{}`, `{vus, duration}` or `{stages: [{duration, target}, ...]}`
    pub fn options(&self) -> Value {
        match self {
            ExecutionProfile::SingleIteration => json!({}),
            ExecutionProfile::Constant { vus, duration } => json!({
                "vus": vus,
                "duration": format_duration(*duration),
            }),
            ExecutionProfile::Ramp(stages) => {
                let stages: Vec<Value> = stages
                    .iter()
                    .map(|s| json!({"duration": format_duration(s.duration), "target": s.target}))
                    .collect();
                json!({ "stages": stages })
            }
        }
    }
}

impl fmt::Display for ExecutionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionProfile::SingleIteration => write!(f, "1 VU, 1 iteration"),
            ExecutionProfile::Constant { vus, duration } => {
                write!(f, "{} VUs for {}", vus, format_duration(*duration))
            }
            ExecutionProfile::Ramp(stages) => {
                let targets: Vec<String> = stages.iter().map(|s| s.target.to_string()).collect();
                let total = self.total_duration().unwrap_or_default();
                write!(
                    f,
                    "ramp {} VUs over {}",
                    targets.join(" -> "),
                    format_duration(total)
                )
            }
        }
    }
}

/// Format whole seconds compactly: `30s`, `1m`, `1h30m`, `0s`
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    if total == 0 {
        return "0s".to_string();
    }

    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if minutes > 0 {
        out.push_str(&format!("{}m", minutes));
    }
    if seconds > 0 {
        out.push_str(&format!("{}s", seconds));
    }
    out
}

/// Parse the compact form produced by [`format_duration`]
pub fn parse_duration(input: &str) -> Result<Duration, ProfileError> {
    let invalid = || ProfileError::InvalidDuration(input.to_string());
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let unit = match ch {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(invalid()),
        };
        let value: u64 = digits.parse().map_err(|_| invalid())?;
        total = value
            .checked_mul(unit)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(invalid)?;
        digits.clear();
    }

    // Trailing digits without a unit
    if !digits.is_empty() {
        return Err(invalid());
    }

    Ok(Duration::from_secs(total))
}

/// Parse `target:duration` pairs separated by commas, e.g. `10:30s,0:30s`
pub fn parse_stages(input: &str) -> Result<Vec<Stage>, ProfileError> {
    input
        .split(',')
        .map(|raw| {
            let (target, duration) = raw
                .trim()
                .split_once(':')
                .ok_or_else(|| ProfileError::InvalidStage(raw.to_string()))?;
            let target = target
                .trim()
                .parse()
                .map_err(|_| ProfileError::InvalidStage(raw.to_string()))?;
            Ok(Stage::new(target, parse_duration(duration)?))
        })
        .collect()
}
