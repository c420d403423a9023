//! Load-test scenario definitions for the wod-gen service
//!
//! This crate describes what to run, never how: the base URL and credential
//! are resolved once into a [`Config`], each [`TestScenario`] pairs request
//! steps and their checks with an [`ExecutionProfile`], and an external
//! runner takes care of virtual users, scheduling and HTTP transport.

pub mod builder;
pub mod check;
pub mod config;
pub mod negative;
pub mod payload;
pub mod presets;
pub mod profile;
pub mod scenario;
pub mod step;

pub use builder::ScenarioBuilder;
pub use check::{Check, CheckOutcome, ResponseView};
pub use config::{AuthMode, Config, ConfigError, Credential, Endpoint, Endpoints};
pub use negative::NegativeCase;
pub use payload::{Level, Payload};
pub use presets::Presets;
pub use profile::{ExecutionProfile, ProfileError, Stage};
pub use scenario::{ScenarioError, ScenarioPlan, TestScenario};
pub use step::{Method, PlannedRequest, RequestStep};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_scenario_builder() {
        let scenario = ScenarioBuilder::new("custom")
            .description("Generate with a seed")
            .profile(ExecutionProfile::constant(2, Duration::from_secs(10)))
            .pacing(Duration::from_millis(500))
            .step(
                RequestStep::post(
                    "seeded",
                    Endpoint::Generate,
                    Payload::example().with_seed("s1").to_json(),
                )
                .expect_status(200),
            )
            .metadata("type", "unit_test")
            .build();

        assert_eq!(scenario.name, "custom");
        assert_eq!(scenario.pacing, Some(Duration::from_millis(500)));
        assert_eq!(scenario.steps.len(), 1);
        assert_eq!(scenario.metadata.get("type"), Some(&"unit_test".to_string()));
        assert_eq!(scenario.steps[0].body.as_ref().unwrap()["seed"], json!("s1"));
    }

    #[test]
    fn test_builder_defaults_to_single_iteration() {
        let scenario = ScenarioBuilder::new("bare").build();
        assert_eq!(scenario.profile, ExecutionProfile::SingleIteration);
        assert!(scenario.pacing.is_none());
        assert!(scenario.description.is_empty());
    }

    #[test]
    fn test_presets() {
        let functional = Presets::functional_scenarios();
        let performance = Presets::performance_scenarios();
        let all = Presets::all_scenarios();

        assert_eq!(all.len(), functional.len() + performance.len());
        assert!(functional
            .iter()
            .all(|s| s.profile == ExecutionProfile::SingleIteration));
        assert!(performance.iter().all(|s| s.profile.peak_vus() > 1));
    }

    #[test]
    fn test_every_preset_resolves_by_name() {
        for name in Presets::names() {
            let scenario = Presets::by_name(&name).expect("preset should resolve");
            assert_eq!(scenario.name, name);
            assert!(!scenario.steps.is_empty());
        }
        assert!(Presets::by_name("soak").is_none());
    }
}
