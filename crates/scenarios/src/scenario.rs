//! Test scenario definitions with preset implementations
//!
//! This module provides TestScenario for combining request steps with an
//! execution profile, plus the presets run against the wod-gen service.

use crate::check::Check;
use crate::config::{AuthMode, Config, ConfigError, Endpoint};
use crate::negative::{self, NegativeCase};
use crate::payload::Payload;
use crate::profile::{ExecutionProfile, ProfileError, Stage};
use crate::step::{PlannedRequest, RequestStep};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Page size requested by the list scenario
pub const DEFAULT_LIST_LIMIT: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Scenario '{0}' has no request steps")]
    NoSteps(String),
}

/// Named, stateless unit of requests and checks plus its load shape
#[derive(Clone, Debug)]
pub struct TestScenario {
    pub name: String,
    pub description: String,
    pub profile: ExecutionProfile,
    /// Pause after each iteration, per virtual user
    pub pacing: Option<Duration>,
    pub steps: Vec<RequestStep>,
    pub metadata: HashMap<String, String>,
}

/// A scenario resolved against a configuration, ready for the runner
#[derive(Clone, Debug)]
pub struct ScenarioPlan {
    pub name: String,
    pub profile: ExecutionProfile,
    pub pacing: Option<Duration>,
    pub requests: Vec<PlannedRequest>,
}

impl TestScenario {
    /// Unauthenticated health check
    pub fn smoke() -> Self {
        Self {
            name: "smoke".to_string(),
            description: "Single unauthenticated health check".to_string(),
            profile: ExecutionProfile::SingleIteration,
            pacing: None,
            steps: vec![RequestStep::get("health", Endpoint::Health)
                .auth(AuthMode::Anonymous)
                .expect_status(200)],
            metadata: HashMap::new(),
        }
    }

    /// Paginated listing with the default page size
    pub fn list() -> Self {
        Self::list_page(DEFAULT_LIST_LIMIT, 0)
    }

    /// Paginated listing; the returned page may not exceed `limit`
    pub fn list_page(limit: usize, offset: usize) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert("limit".to_string(), limit.to_string());
        metadata.insert("offset".to_string(), offset.to_string());

        Self {
            name: "list".to_string(),
            description: "Authenticated listing with pagination bounds".to_string(),
            profile: ExecutionProfile::SingleIteration,
            pacing: None,
            steps: vec![RequestStep::get("list wods", Endpoint::List)
                .query("limit", limit)
                .query("offset", offset)
                .expect_status(200)
                .check(Check::is_array("has wods", "wods"))
                .check(Check::max_len("pagination respected", "wods", limit))],
            metadata,
        }
    }

    /// Sustained throughput at moderate concurrency
    pub fn load() -> Self {
        let mut metadata = HashMap::new();
        metadata.insert("test_type".to_string(), "throughput".to_string());

        Self {
            name: "load".to_string(),
            description: "20 VUs generating workouts for 1 minute".to_string(),
            profile: ExecutionProfile::constant(20, Duration::from_secs(60)),
            pacing: Some(Duration::from_secs(1)),
            steps: vec![generate_step()
                .check(Check::non_empty_array("has blocks", "blocks"))],
            metadata,
        }
    }

    /// Ramp to 100 VUs and back to find the breaking point
    pub fn stress() -> Self {
        let mut metadata = HashMap::new();
        metadata.insert("test_type".to_string(), "breaking_point".to_string());

        Self {
            name: "stress".to_string(),
            description: "Staged ramp to 100 VUs and back down".to_string(),
            profile: ExecutionProfile::ramp(vec![
                Stage::new(10, Duration::from_secs(30)),
                Stage::new(50, Duration::from_secs(30)),
                Stage::new(100, Duration::from_secs(30)),
                Stage::new(0, Duration::from_secs(30)),
            ]),
            pacing: None,
            steps: vec![generate_step()],
            metadata,
        }
    }

    /// Validation and authentication failure paths
    pub fn negative() -> Self {
        Self::negative_with(negative::default_cases())
    }

    /// Negative scenario over a caller-supplied case list
    pub fn negative_with(cases: Vec<NegativeCase>) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert("test_type".to_string(), "negative".to_string());
        metadata.insert("cases".to_string(), cases.len().to_string());

        Self {
            name: "negative".to_string(),
            description: "Invalid input and bad credentials are rejected".to_string(),
            profile: ExecutionProfile::SingleIteration,
            pacing: None,
            steps: cases.into_iter().map(NegativeCase::into_step).collect(),
            metadata,
        }
    }

    pub fn requires_credential(&self) -> bool {
        self.steps.iter().any(RequestStep::requires_credential)
    }

    /// Resolve every step against the configuration.
    ///
    /// Fails when the profile is invalid or when a step needs the
    /// configured token and none is set.
    pub fn plan(&self, config: &Config) -> Result<ScenarioPlan, ScenarioError> {
        if self.steps.is_empty() {
            return Err(ScenarioError::NoSteps(self.name.clone()));
        }
        self.profile.validate()?;

        let requests = self
            .steps
            .iter()
            .map(|step| step.plan(config))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScenarioPlan {
            name: self.name.clone(),
            profile: self.profile.clone(),
            pacing: self.pacing,
            requests,
        })
    }
}

/// Authenticated POST of the example payload expecting 200
fn generate_step() -> RequestStep {
    RequestStep::post("generate wod", Endpoint::Generate, Payload::example().to_json())
        .expect_status(200)
}
