//! Request bodies for the generate endpoint

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Shortest workout the service accepts, in minutes
pub const MIN_DURATION_MIN: i64 = 15;
/// Longest workout the service accepts, in minutes
pub const MAX_DURATION_MIN: i64 = 120;

/// Training level accepted by the service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        };
        f.write_str(name)
    }
}

/// Body of `POST /api/v1/wod/generate`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub level: Level,
    pub duration_min: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

impl Payload {
    /// The fixed valid payload used by the load and stress scenarios
    pub fn example() -> Self {
        Self {
            level: Level::Beginner,
            duration_min: 30,
            equipment: vec!["rower".to_string()],
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn to_json(&self) -> Value {
        // A struct of strings, integers and a string list always serializes.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// True when the service's own validation would accept this payload
    pub fn is_within_service_limits(&self) -> bool {
        (MIN_DURATION_MIN..=MAX_DURATION_MIN).contains(&self.duration_min)
    }
}

static EXAMPLE_JSON: Lazy<String> = Lazy::new(|| Payload::example().to_json().to_string());

/// The example payload serialized once, as sent on the wire
pub fn example_json() -> &'static str {
    &EXAMPLE_JSON
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_example_payload_shape() {
        let value = Payload::example().to_json();
        assert_eq!(
            value,
            json!({"level": "beginner", "duration_min": 30, "equipment": ["rower"]})
        );
        assert!(Payload::example().is_within_service_limits());
    }

    #[test]
    fn test_example_json_parses_back() {
        let parsed: Payload = serde_json::from_str(example_json()).unwrap();
        assert_eq!(parsed, Payload::example());
    }

    #[test]
    fn test_seed_is_optional_on_the_wire() {
        let seeded = Payload::example().with_seed("abc");
        assert_eq!(seeded.to_json()["seed"], json!("abc"));
        assert!(Payload::example().to_json().get("seed").is_none());
    }

    #[test]
    fn test_service_limits() {
        let mut payload = Payload::example();
        payload.duration_min = MIN_DURATION_MIN - 1;
        assert!(!payload.is_within_service_limits());
        payload.duration_min = MAX_DURATION_MIN;
        assert!(payload.is_within_service_limits());
        payload.duration_min = MAX_DURATION_MIN + 1;
        assert!(!payload.is_within_service_limits());
    }

    #[test]
    fn test_level_names() {
        assert_eq!(Level::Intermediate.to_string(), "intermediate");
        let level: Level = serde_json::from_str("\"advanced\"").unwrap();
        assert_eq!(level, Level::Advanced);
        assert!(serde_json::from_str::<Level>("\"invalid\"").is_err());
    }
}
