//! Parameterised negative cases for the generate endpoint
//!
//! Each case is an independent request with the status the service must
//! answer with. Validation cases carry raw JSON so they can express values
//! the typed [`Payload`] cannot, such as an unknown level.

use crate::check::Check;
use crate::config::{AuthMode, Endpoint};
use crate::payload::{Level, Payload, MIN_DURATION_MIN};
use crate::step::RequestStep;
use serde_json::{json, Value};

/// Bearer value that is well formed but never issued by the service
pub const WRONG_TOKEN: &str = "wrongtoken";

#[derive(Clone, Debug, PartialEq)]
pub struct NegativeCase {
    pub label: String,
    pub body: Value,
    pub auth: AuthMode,
    pub expected_status: u16,
}

impl NegativeCase {
    pub fn new(
        label: impl Into<String>,
        body: Value,
        auth: AuthMode,
        expected_status: u16,
    ) -> Self {
        Self {
            label: label.into(),
            body,
            auth,
            expected_status,
        }
    }

    /// Unknown level with an otherwise acceptable duration
    pub fn invalid_level(duration_min: i64) -> Self {
        Self::new(
            "invalid level → 400",
            json!({"level": "invalid", "duration_min": duration_min}),
            AuthMode::Configured,
            400,
        )
    }

    /// Valid level with a duration the service rejects
    pub fn invalid_duration(level: Level, duration_min: i64) -> Self {
        Self::new(
            "invalid duration → 400",
            json!({"level": level, "duration_min": duration_min}),
            AuthMode::Configured,
            400,
        )
    }

    /// Valid payload without any Authorization header
    pub fn no_token() -> Self {
        Self::new(
            "no token → 401",
            Payload::example().to_json(),
            AuthMode::Anonymous,
            401,
        )
    }

    /// Valid payload with a well-formed but wrong bearer token
    pub fn bad_token() -> Self {
        Self::new(
            "bad token → 401",
            Payload::example().to_json(),
            AuthMode::Bearer(WRONG_TOKEN.to_string()),
            401,
        )
    }

    /// A POST to the generate endpoint whose single check carries the label
    pub fn into_step(self) -> RequestStep {
        let check = Check::status_named(self.label.clone(), self.expected_status);
        RequestStep::post(self.label, Endpoint::Generate, self.body)
            .auth(self.auth)
            .expecting(self.expected_status)
            .check(check)
    }
}

/// The four cases run by the negative scenario, in order
pub fn default_cases() -> Vec<NegativeCase> {
    vec![
        NegativeCase::invalid_level(30),
        NegativeCase::invalid_duration(Level::Beginner, MIN_DURATION_MIN - 10),
        NegativeCase::no_token(),
        NegativeCase::bad_token(),
    ]
}
