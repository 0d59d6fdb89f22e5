//! Environment-backed harness configuration.
//!
//! # Design
//! Values are read once through a lookup function so parsing can be unit
//! tested without mutating the process environment. Unset variables fall
//! back to defaults; set-but-invalid variables are errors, never silently
//! ignored.

use std::time::Duration;

use reqwest::Url;

use crate::error::{ApiError, Result};

pub const BASE_URL_ENV: &str = "HARNESS_BASE_URL";
pub const TIMEOUT_MS_ENV: &str = "HARNESS_TIMEOUT_MS";
pub const USER_AGENT_ENV: &str = "HARNESS_USER_AGENT";

const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Settings handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Live service to target. `None` means the caller supplies its own
    /// endpoint (the scenario suite starts a replay server).
    pub base_url: Option<String>,
    /// Whole-request timeout applied by the transport.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

impl HarnessConfig {
    /// Load from `HARNESS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| -> Result<Option<String>> {
            match lookup(name) {
                Some(value) if value.trim().is_empty() => {
                    Err(ApiError::Config(format!("{name} must not be empty")))
                }
                Some(value) => Ok(Some(value.trim().to_string())),
                None => Ok(None),
            }
        };

        let base_url = read(BASE_URL_ENV)?
            .map(|raw| normalize_base_url(&raw))
            .transpose()?;
        let timeout = read(TIMEOUT_MS_ENV)?
            .map(|raw| parse_timeout_ms(&raw))
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT);
        let user_agent = read(USER_AGENT_ENV)?.unwrap_or_else(default_user_agent);

        Ok(Self {
            base_url,
            timeout,
            user_agent,
        })
    }
}

fn default_user_agent() -> String {
    format!("api-harness/{}", env!("CARGO_PKG_VERSION"))
}

/// Validate an absolute http(s) URL and strip any trailing slash so that
/// joining it with a `/`-prefixed path never doubles the separator.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw)
        .map_err(|e| ApiError::Config(format!("{BASE_URL_ENV} is not a valid URL: {e}")))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ApiError::Config(format!(
            "{BASE_URL_ENV} must use http or https, got {}",
            url.scheme()
        )));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ApiError::Config(format!(
            "{BASE_URL_ENV} must not carry a query or fragment"
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_timeout_ms(raw: &str) -> Result<Duration> {
    let millis: u64 = raw.parse().map_err(|_| {
        ApiError::Config(format!("{TIMEOUT_MS_ENV} must be a positive integer"))
    })?;
    if millis == 0 {
        return Err(ApiError::Config(format!(
            "{TIMEOUT_MS_ENV} must be greater than zero"
        )));
    }
    Ok(Duration::from_millis(millis))
}
