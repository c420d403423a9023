//! Hands planned scenarios to the goose load-test runner
//!
//! Goose owns virtual users, scheduling, HTTP transport and metrics. This
//! module only translates an execution profile into goose defaults and a
//! planned scenario into a single goose transaction.

use anyhow::Result;
use goose::config::GooseConfiguration;
use goose::goose::{GooseMethod, GooseRequest, GooseUser, TransactionFunction};
use goose::prelude::*;
use scenarios::profile::format_duration;
use scenarios::{ExecutionProfile, Method, PlannedRequest, ResponseView, ScenarioPlan, Stage};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Goose settings derived from an execution profile
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttackPlan {
    /// One user running exactly one iteration
    Single,
    /// All users started within the first second, then run for `run_time_secs`
    Constant {
        users: usize,
        hatch_rate: String,
        run_time_secs: usize,
    },
    /// Goose test plan, e.g. `10,30s;50,30s;0,30s`
    TestPlan(String),
}

impl AttackPlan {
    pub fn from_profile(profile: &ExecutionProfile) -> Self {
        match profile {
            ExecutionProfile::SingleIteration => AttackPlan::Single,
            ExecutionProfile::Constant { vus, duration } => AttackPlan::Constant {
                users: *vus,
                hatch_rate: vus.to_string(),
                run_time_secs: duration.as_secs() as usize,
            },
            ExecutionProfile::Ramp(stages) => AttackPlan::TestPlan(test_plan(stages)),
        }
    }
}

/// Render ramp stages in goose's `users,duration;...` test plan syntax
pub fn test_plan(stages: &[Stage]) -> String {
    stages
        .iter()
        .map(|s| format!("{},{}", s.target, format_duration(s.duration)))
        .collect::<Vec<_>>()
        .join(";")
}

/// Settings for one run that do not come from the scenario itself
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Goose report path; the extension picks HTML, JSON or Markdown
    pub report_file: Option<String>,
}

/// Execute a planned scenario through goose and wait for it to finish
pub async fn run(plan: ScenarioPlan, host: &str, options: &RunOptions) -> Result<()> {
    let attack_plan = AttackPlan::from_profile(&plan.profile);
    info!("Scenario '{}': {}", plan.name, plan.profile);
    debug!("Goose plan: {:?}", attack_plan);

    let scenario = build_scenario(&plan)?;

    let attack = GooseAttack::initialize_with_config(goose_configuration(&attack_plan))?
        .register_scenario(scenario)
        .set_default(GooseDefault::Host, host)?;

    let attack = match &options.report_file {
        Some(path) => attack.set_default(GooseDefault::ReportFile, path.as_str())?,
        None => attack,
    };

    let attack = match &attack_plan {
        // Already fixed in the configuration
        AttackPlan::Single => attack,
        AttackPlan::Constant {
            users,
            hatch_rate,
            run_time_secs,
        } => attack
            .set_default(GooseDefault::Users, *users)?
            .set_default(GooseDefault::HatchRate, hatch_rate.as_str())?
            .set_default(GooseDefault::RunTime, *run_time_secs)?,
        AttackPlan::TestPlan(test_plan) => {
            attack.set_default(GooseDefault::TestPlan, test_plan.as_str())?
        }
    };

    attack.execute().await?;
    info!("Scenario '{}' finished", plan.name);

    Ok(())
}

/// Base goose configuration for a plan.
///
/// Goose reads `iterations` from the configuration before any default, so
/// a single-iteration plan is set here rather than through `set_default`.
/// The telnet and WebSocket controllers are never started.
pub fn goose_configuration(plan: &AttackPlan) -> GooseConfiguration {
    let mut configuration = GooseConfiguration::default();
    configuration.no_telnet = true;
    configuration.no_websocket = true;

    if let AttackPlan::Single = plan {
        configuration.users = Some(1);
        configuration.hatch_rate = Some("1".to_string());
        configuration.iterations = 1;
    }

    configuration
}

/// One goose scenario with one transaction running every planned request
fn build_scenario(plan: &ScenarioPlan) -> Result<Scenario, GooseError> {
    let requests = Arc::new(plan.requests.clone());
    let iteration: TransactionFunction = Arc::new(move |user| {
        let requests = Arc::clone(&requests);
        Box::pin(async move { run_iteration(user, &requests).await })
    });

    let scenario =
        Scenario::new(&plan.name).register_transaction(Transaction::new(iteration).set_name(&plan.name));

    match plan.pacing {
        Some(pause) => scenario.set_wait_time(pause, pause),
        None => Ok(scenario),
    }
}

/// Issue each request in order and record every check.
///
/// A failed check marks the request as failed in goose's metrics but never
/// stops the iteration.
async fn run_iteration(user: &mut GooseUser, requests: &[PlannedRequest]) -> TransactionResult {
    for planned in requests {
        let method = goose_method(planned.method);
        let mut builder = user.get_request_builder(&method, &planned.url)?;
        for (name, value) in &planned.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &planned.body {
            builder = builder.body(body.clone());
        }

        let request = GooseRequest::builder()
            .method(method)
            .path(planned.url.as_str())
            .name(planned.label.as_str())
            .expect_status_code(planned.expected_status)
            .set_request_builder(builder)
            .build();

        let mut goose = user.request(request).await?;
        let (status, body) = match goose.response {
            Ok(response) => {
                let status = response.status().as_u16();
                (Some(status), response.text().await.ok())
            }
            Err(e) => {
                warn!("{} {}: request failed: {}", planned.method, planned.url, e);
                (None, None)
            }
        };

        let view = ResponseView::from_raw(status, body.as_deref());
        for outcome in planned.evaluate(&view) {
            if outcome.passed {
                debug!("✓ {} / {}", planned.label, outcome.name);
                continue;
            }
            warn!(
                "✗ {} / {} (status {:?})",
                planned.label, outcome.name, status
            );
            let _ = user.set_failure(&outcome.name, &mut goose.request, None, body.as_deref());
        }
    }

    Ok(())
}

fn goose_method(method: Method) -> GooseMethod {
    match method {
        Method::Get => GooseMethod::Get,
        Method::Post => GooseMethod::Post,
    }
}
