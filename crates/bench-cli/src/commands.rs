//! CLI command implementations for the wod-gen load-test harness
//!
//! This module contains the implementations of all CLI commands,
//! kept out of main.rs so they can be unit tested.

use crate::runner::{self, RunOptions};
use crate::token;
use anyhow::{bail, Result};
use scenarios::profile::{parse_duration, parse_stages};
use scenarios::scenario::DEFAULT_LIST_LIMIT;
use scenarios::{Config, ExecutionProfile, Presets, TestScenario};
use tracing::{debug, info};

/// Load-shape overrides given on the command line
#[derive(Debug, Clone, Default)]
pub struct ProfileOverride {
    pub vus: Option<usize>,
    pub duration: Option<String>,
    pub stages: Option<String>,
}

impl ProfileOverride {
    /// Profile replacing the scenario's own, if any override was given
    pub fn resolve(&self) -> Result<Option<ExecutionProfile>> {
        match (self.vus, self.duration.as_deref(), self.stages.as_deref()) {
            (None, None, None) => Ok(None),
            (Some(vus), Some(duration), None) => Ok(Some(ExecutionProfile::constant(
                vus,
                parse_duration(duration)?,
            ))),
            (None, None, Some(stages)) => Ok(Some(ExecutionProfile::ramp(parse_stages(stages)?))),
            (_, _, Some(_)) => bail!("--stages cannot be combined with --vus or --duration"),
            _ => bail!("--vus and --duration must be given together"),
        }
    }
}

/// Implementation of the 'list' command - shows available scenarios
pub async fn cmd_list() -> Result<()> {
    println!("Available scenarios:");
    println!("====================");

    println!("\nFunctional scenarios:");
    for scenario in Presets::functional_scenarios() {
        print_scenario(&scenario);
    }

    println!("\nPerformance scenarios:");
    for scenario in Presets::performance_scenarios() {
        print_scenario(&scenario);
    }

    Ok(())
}

fn print_scenario(scenario: &TestScenario) {
    println!(
        "  {:<10} - {} [{}]",
        scenario.name, scenario.description, scenario.profile
    );
}

/// Implementation of the 'profile' command - prints the runner options object
pub async fn cmd_profile(scenario: String, overrides: ProfileOverride) -> Result<()> {
    let scenario = apply_overrides(resolve_scenario(&scenario, None, None)?, &overrides)?;
    scenario.profile.validate()?;

    println!("{}", serde_json::to_string_pretty(&scenario.profile.options())?);
    Ok(())
}

/// Implementation of the 'run' command - executes a scenario through goose
pub async fn cmd_run(
    scenario: String,
    base_url: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
    overrides: ProfileOverride,
    report_file: Option<String>,
) -> Result<()> {
    let scenario = apply_overrides(resolve_scenario(&scenario, limit, offset)?, &overrides)?;

    let mut config = Config::from_env()?;
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url)?;
    }
    debug!("Resolved configuration: base URL {}", config.base_url());

    let plan = scenario.plan(&config)?;
    info!(
        "Running scenario '{}' against {} ({} request(s) per iteration)",
        plan.name,
        config.base_url(),
        plan.requests.len()
    );

    runner::run(plan, config.base_url(), &RunOptions { report_file }).await
}

/// Implementation of the 'token' command - prints a signed bearer token
pub async fn cmd_token(subject: Option<String>, ttl_hours: i64) -> Result<()> {
    let secret = token::secret_from_env()?;
    let subject = subject.unwrap_or_else(|| token::DEFAULT_SUBJECT.to_string());

    let ttl = token::ttl_from_hours(ttl_hours)?;
    let token = token::mint(&secret, &subject, ttl)?;
    debug!("Minted token for '{}' valid for {}h", subject, ttl_hours);

    println!("{}", token);
    Ok(())
}

/// Look up a scenario by name, applying pagination to the list scenario
pub fn resolve_scenario(
    name: &str,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<TestScenario> {
    if name == "list" {
        return Ok(TestScenario::list_page(
            limit.unwrap_or(DEFAULT_LIST_LIMIT),
            offset.unwrap_or(0),
        ));
    }

    if limit.is_some() || offset.is_some() {
        bail!("--limit and --offset only apply to the 'list' scenario");
    }

    match Presets::by_name(name) {
        Some(scenario) => Ok(scenario),
        None => bail!(
            "Unknown scenario: {} (available: {})",
            name,
            Presets::names().join(", ")
        ),
    }
}

fn apply_overrides(mut scenario: TestScenario, overrides: &ProfileOverride) -> Result<TestScenario> {
    if let Some(profile) = overrides.resolve()? {
        info!("Overriding profile of '{}' with {}", scenario.name, profile);
        scenario.profile = profile;
    }
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_resolve_scenario() {
        for name in ["smoke", "list", "load", "stress", "negative"] {
            let scenario = resolve_scenario(name, None, None).unwrap();
            assert_eq!(scenario.name, name);
        }

        let err = resolve_scenario("soak", None, None).unwrap_err();
        assert!(err.to_string().contains("Unknown scenario: soak"));
    }

    #[test]
    fn test_resolve_list_with_pagination() {
        let scenario = resolve_scenario("list", Some(2), Some(4)).unwrap();
        assert_eq!(scenario.metadata.get("limit").map(String::as_str), Some("2"));
        assert_eq!(scenario.metadata.get("offset").map(String::as_str), Some("4"));

        let default = resolve_scenario("list", None, None).unwrap();
        assert_eq!(default.metadata.get("limit").map(String::as_str), Some("5"));
    }

    #[test]
    fn test_pagination_rejected_for_other_scenarios() {
        assert!(resolve_scenario("load", Some(2), None).is_err());
        assert!(resolve_scenario("smoke", None, Some(1)).is_err());
    }

    #[test]
    fn test_profile_override() {
        assert_eq!(ProfileOverride::default().resolve().unwrap(), None);

        let constant = ProfileOverride {
            vus: Some(5),
            duration: Some("30s".to_string()),
            stages: None,
        };
        assert_eq!(
            constant.resolve().unwrap(),
            Some(ExecutionProfile::constant(5, Duration::from_secs(30)))
        );

        let ramp = ProfileOverride {
            stages: Some("10:30s,0:10s".to_string()),
            ..Default::default()
        };
        match ramp.resolve().unwrap() {
            Some(ExecutionProfile::Ramp(stages)) => assert_eq!(stages.len(), 2),
            other => panic!("expected ramp, got {:?}", other),
        }
    }

    #[test]
    fn test_profile_override_rejects_partial_input() {
        let vus_only = ProfileOverride {
            vus: Some(5),
            ..Default::default()
        };
        assert!(vus_only.resolve().is_err());

        let mixed = ProfileOverride {
            vus: Some(5),
            duration: Some("30s".to_string()),
            stages: Some("10:30s".to_string()),
        };
        assert!(mixed.resolve().is_err());

        let bad_duration = ProfileOverride {
            vus: Some(5),
            duration: Some("thirty".to_string()),
            stages: None,
        };
        assert!(bad_duration.resolve().is_err());
    }

    #[test]
    fn test_apply_overrides_replaces_profile() {
        let overrides = ProfileOverride {
            vus: Some(3),
            duration: Some("1m".to_string()),
            stages: None,
        };
        let scenario = apply_overrides(TestScenario::smoke(), &overrides).unwrap();
        assert_eq!(scenario.profile.peak_vus(), 3);
        assert_eq!(scenario.steps.len(), 1);
    }
}
