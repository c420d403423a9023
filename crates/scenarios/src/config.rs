//! Target configuration for the wod-gen service
//!
//! This module resolves the base URL, bearer credential and endpoint paths
//! once from the environment into an immutable [`Config`] that is passed
//! explicitly to every scenario when its requests are planned.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use url::Url;

/// Base URL used when `BASE_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub const ENV_BASE_URL: &str = "BASE_URL";
pub const ENV_TOKEN: &str = "TOKEN";
pub const ENV_HEALTH_PATH: &str = "HEALTH_PATH";
pub const ENV_GENERATE_PATH: &str = "GENERATE_PATH";
pub const ENV_LIST_PATH: &str = "LIST_PATH";

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("No bearer token configured (set TOKEN) but '{0}' requires one")]
    MissingToken(String),

    #[error("Endpoint path '{0}' must start with '/'")]
    InvalidPath(String),
}

/// Bearer credential resolved from the environment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Credential {
    Bearer(String),
    Missing,
}

impl Credential {
    /// An unset or empty value is treated as no credential at all.
    pub fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(token) if !token.is_empty() => Credential::Bearer(token),
            _ => Credential::Missing,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Credential::Bearer(_))
    }
}

/// How a single request authenticates
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthMode {
    /// Use the configured credential; planning fails if it is missing
    Configured,
    /// Send no Authorization header
    Anonymous,
    /// Send this bearer value instead of the configured one
    Bearer(String),
}

/// Endpoint paths on the target service, composed with the base URL
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub health: String,
    pub generate: String,
    pub list: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            health: "/healthz".to_string(),
            generate: "/api/v1/wod/generate".to_string(),
            list: "/api/v1/wod/list".to_string(),
        }
    }
}

/// Named endpoint a request step targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    Health,
    Generate,
    List,
}

/// Immutable run configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    base_url: String,
    credential: Credential,
    endpoints: Endpoints,
}

impl Config {
    pub fn new(
        base_url: impl Into<String>,
        credential: Credential,
        endpoints: Endpoints,
    ) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(base_url.into())?;
        for path in [&endpoints.health, &endpoints.generate, &endpoints.list] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidPath(path.clone()));
            }
        }

        Ok(Self {
            base_url,
            credential,
            endpoints,
        })
    }

    /// Resolve configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let credential = Credential::from_env_value(lookup(ENV_TOKEN));

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            health: lookup(ENV_HEALTH_PATH).unwrap_or(defaults.health),
            generate: lookup(ENV_GENERATE_PATH).unwrap_or(defaults.generate),
            list: lookup(ENV_LIST_PATH).unwrap_or(defaults.list),
        };

        Self::new(base_url, credential, endpoints)
    }

    /// Replace the base URL, keeping credential and endpoints
    pub fn with_base_url(self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(base_url, self.credential, self.endpoints)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn path(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Health => &self.endpoints.health,
            Endpoint::Generate => &self.endpoints.generate,
            Endpoint::List => &self.endpoints.list,
        }
    }

    /// Absolute URL for an endpoint
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, self.path(endpoint))
    }

    /// Build request headers for the given auth mode.
    ///
    /// `Content-Type: application/json` is always present. The configured
    /// token is used verbatim; `context` names the caller in the error when
    /// no token is configured.
    pub fn headers(
        &self,
        auth: &AuthMode,
        context: &str,
    ) -> Result<BTreeMap<String, String>, ConfigError> {
        let mut headers = BTreeMap::new();
        headers.insert(
            HEADER_CONTENT_TYPE.to_string(),
            CONTENT_TYPE_JSON.to_string(),
        );

        match auth {
            AuthMode::Configured => match &self.credential {
                Credential::Bearer(token) => {
                    headers.insert(HEADER_AUTHORIZATION.to_string(), bearer(token));
                }
                Credential::Missing => {
                    return Err(ConfigError::MissingToken(context.to_string()));
                }
            },
            AuthMode::Anonymous => {}
            AuthMode::Bearer(token) => {
                headers.insert(HEADER_AUTHORIZATION.to_string(), bearer(token));
            }
        }

        Ok(headers)
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

fn normalize_base_url(raw: String) -> Result<String, ConfigError> {
    let parsed = Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.clone(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw,
            reason: "expected an absolute http(s) URL".to_string(),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}
