//! Preset collections for common testing scenarios
//!
//! This module provides organized collections of the pre-built scenarios
//! and lookup by name.

use crate::scenario::TestScenario;

/// Preset collections for common testing scenarios
pub struct Presets;

impl Presets {
    /// Single-iteration scenarios that verify behaviour, not capacity
    pub fn functional_scenarios() -> Vec<TestScenario> {
        vec![
            TestScenario::smoke(),
            TestScenario::list(),
            TestScenario::negative(),
        ]
    }

    /// Scenarios that apply sustained or increasing concurrency
    pub fn performance_scenarios() -> Vec<TestScenario> {
        vec![TestScenario::load(), TestScenario::stress()]
    }

    /// Get all available scenarios
    pub fn all_scenarios() -> Vec<TestScenario> {
        let mut scenarios = Self::functional_scenarios();
        scenarios.extend(Self::performance_scenarios());
        scenarios
    }

    /// Names accepted by [`Presets::by_name`]
    pub fn names() -> Vec<String> {
        Self::all_scenarios().into_iter().map(|s| s.name).collect()
    }

    pub fn by_name(name: &str) -> Option<TestScenario> {
        match name {
            "smoke" => Some(TestScenario::smoke()),
            "list" => Some(TestScenario::list()),
            "load" => Some(TestScenario::load()),
            "stress" => Some(TestScenario::stress()),
            "negative" => Some(TestScenario::negative()),
            _ => None,
        }
    }
}
