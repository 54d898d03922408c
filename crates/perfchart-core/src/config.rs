//! Backend connection settings.

use std::env;

use crate::ValidationError;

pub const BACKEND_URL_ENV: &str = "PERFCHART_BACKEND_URL";
pub const TIMEOUT_MS_ENV: &str = "PERFCHART_TIMEOUT_MS";

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Where the performance backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BACKEND_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl BackendConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `PERFCHART_BACKEND_URL`: backend origin, e.g. `https://perf.example.com`
    /// - `PERFCHART_TIMEOUT_MS`: per-request timeout in milliseconds
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ValidationError> {
        let defaults = Self::default();
        let base_url = env::var(BACKEND_URL_ENV).unwrap_or(defaults.base_url);
        let timeout_ms = match env::var(TIMEOUT_MS_ENV) {
            Ok(raw) => parse_timeout_ms(&raw)?,
            Err(_) => defaults.timeout_ms,
        };

        Self {
            base_url,
            timeout_ms,
        }
        .validate()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Check the url scheme and timeout, trimming trailing slashes from the url.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(trimmed).map_err(|_| ValidationError::InvalidBackendUrl {
            value: self.base_url.clone(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ValidationError::InvalidBackendUrl {
                value: self.base_url.clone(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout {
                value: String::from("0"),
            });
        }

        self.base_url = trimmed.to_owned();
        Ok(self)
    }
}

fn parse_timeout_ms(raw: &str) -> Result<u64, ValidationError> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ValidationError::InvalidTimeout {
            value: raw.to_owned(),
        }),
    }
}
