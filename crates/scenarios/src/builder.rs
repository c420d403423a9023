//! Builder pattern for creating custom test scenarios
//!
//! This module provides ScenarioBuilder for constructing TestScenario
//! instances with a fluent API.

use crate::profile::ExecutionProfile;
use crate::scenario::TestScenario;
use crate::step::RequestStep;
use std::collections::HashMap;
use std::time::Duration;

/// Scenario builder for creating custom scenarios
pub struct ScenarioBuilder {
    name: String,
    description: String,
    profile: ExecutionProfile,
    pacing: Option<Duration>,
    steps: Vec<RequestStep>,
    metadata: HashMap<String, String>,
}

impl ScenarioBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            profile: ExecutionProfile::default(),
            pacing: None,
            steps: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn profile(mut self, profile: ExecutionProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn pacing(mut self, pause: Duration) -> Self {
        self.pacing = Some(pause);
        self
    }

    pub fn step(mut self, step: RequestStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> TestScenario {
        TestScenario {
            name: self.name,
            description: self.description,
            profile: self.profile,
            pacing: self.pacing,
            steps: self.steps,
            metadata: self.metadata,
        }
    }
}
