//! Client configuration loaded from environment

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

pub const API_URL_VAR: &str = "QUIRKVERSE_API_URL";
pub const REQUEST_TIMEOUT_MS_VAR: &str = "QUIRKVERSE_REQUEST_TIMEOUT_MS";
pub const MAX_ATTEMPTS_VAR: &str = "QUIRKVERSE_MAX_ATTEMPTS";
pub const RETRY_BASE_DELAY_MS_VAR: &str = "QUIRKVERSE_RETRY_BASE_DELAY_MS";
pub const STORAGE_PATH_VAR: &str = "QUIRKVERSE_STORAGE_PATH";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 120_000;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },

    #[error("{var} must use http or https, got {scheme}")]
    UnsupportedScheme { var: &'static str, scheme: String },

    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base URL, without trailing slash
    pub api_url: String,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Attempts per request, initial try included (at least 1)
    pub max_attempts: u32,
    pub retry_base_delay_ms: u64,
    /// Storage file override; the platform config dir is used otherwise
    pub storage_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Some(Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS)),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            storage_path: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment (and `.env`, if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = parse_api_url(get(API_URL_VAR).as_deref().unwrap_or(DEFAULT_API_URL))?;

        let timeout_ms = parse_number(REQUEST_TIMEOUT_MS_VAR, get(REQUEST_TIMEOUT_MS_VAR))?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        let max_attempts = parse_number(MAX_ATTEMPTS_VAR, get(MAX_ATTEMPTS_VAR))?
            .map_or(DEFAULT_MAX_ATTEMPTS, |n| u32::try_from(n).unwrap_or(u32::MAX))
            .max(1);
        let retry_base_delay_ms = parse_number(RETRY_BASE_DELAY_MS_VAR, get(RETRY_BASE_DELAY_MS_VAR))?
            .unwrap_or(DEFAULT_RETRY_BASE_DELAY_MS);

        Ok(Self {
            api_url,
            request_timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
            max_attempts,
            retry_base_delay_ms,
            storage_path: get(STORAGE_PATH_VAR).map(PathBuf::from),
        })
    }
}

#[cfg(not(test))]
fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }
}

#[cfg(test)]
fn load_dotenv() {}

fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        var: API_URL_VAR,
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(ConfigError::UnsupportedScheme {
            var: API_URL_VAR,
            scheme: other.to_string(),
        }),
    }
}

fn parse_number(var: &'static str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    value
        .map(|v| {
            v.parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber { var, value: v })
        })
        .transpose()
}
