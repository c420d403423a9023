//! A single request/assertion pair and its planned, concrete form

use crate::check::{evaluate_all, Check, CheckOutcome, ResponseView};
use crate::config::{AuthMode, Config, ConfigError, Endpoint};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// Declarative description of one HTTP call and what to assert on it
#[derive(Clone, Debug)]
pub struct RequestStep {
    pub label: String,
    pub method: Method,
    pub endpoint: Endpoint,
    pub query: Vec<(String, String)>,
    pub auth: AuthMode,
    pub body: Option<Value>,
    /// Status the runner should count as a successful request
    pub expected_status: u16,
    pub checks: Vec<Check>,
}

impl RequestStep {
    pub fn get(label: impl Into<String>, endpoint: Endpoint) -> Self {
        Self::new(label, Method::Get, endpoint)
    }

    pub fn post(label: impl Into<String>, endpoint: Endpoint, body: Value) -> Self {
        let mut step = Self::new(label, Method::Post, endpoint);
        step.body = Some(body);
        step
    }

    fn new(label: impl Into<String>, method: Method, endpoint: Endpoint) -> Self {
        Self {
            label: label.into(),
            method,
            endpoint,
            query: Vec::new(),
            auth: AuthMode::Configured,
            body: None,
            expected_status: 200,
            checks: Vec::new(),
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    /// Count `status` as a successful request without adding a check
    pub fn expecting(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    /// Expect `status` and add the matching `status is <status>` check
    pub fn expect_status(self, status: u16) -> Self {
        self.expecting(status).check(Check::status(status))
    }

    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    pub fn requires_credential(&self) -> bool {
        self.auth == AuthMode::Configured
    }

    /// Resolve the step against a configuration into a concrete request
    pub fn plan(&self, config: &Config) -> Result<PlannedRequest, ConfigError> {
        let headers = config.headers(&self.auth, &self.label)?;

        let mut url = config.url(self.endpoint);
        if !self.query.is_empty() {
            let query: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }

        Ok(PlannedRequest {
            label: self.label.clone(),
            method: self.method,
            url,
            headers,
            body: self.body.as_ref().map(Value::to_string),
            expected_status: self.expected_status,
            checks: self.checks.clone(),
        })
    }
}

/// A request ready to hand to the HTTP client
#[derive(Clone, Debug)]
pub struct PlannedRequest {
    pub label: String,
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    pub expected_status: u16,
    pub checks: Vec<Check>,
}

impl PlannedRequest {
    pub fn evaluate(&self, response: &ResponseView) -> Vec<CheckOutcome> {
        evaluate_all(&self.checks, response)
    }
}
