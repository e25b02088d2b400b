//! Client configuration
//!
//! Where the API lives and how hard to retry it.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Server used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Environment variable overriding the server URL
pub const SERVER_URL_ENV: &str = "CLIENT_API_URL";

const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the API, without trailing slash
    pub server_url: String,
    /// Total attempts for retryable requests (at least 1)
    pub retry_attempts: u32,
    /// Base delay; attempt `n` waits `n * retry_delay`
    pub retry_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Defaults, with the server URL taken from `CLIENT_API_URL` when set
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            builder = builder.server_url(url);
        }
        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url(&self.server_url)?;
        if self.retry_attempts == 0 {
            return Err(ConfigError::MissingValue("retry_attempts"));
        }
        Ok(())
    }

    /// Absolute URL for an API path such as `/api/health`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.server_url, path.trim_start_matches('/'))
    }
}

fn validate_url(url: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidUrl(url.to_string());
    let parsed = Url::parse(url).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
        return Err(invalid());
    }
    Ok(())
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    retry_attempts: Option<u32>,
    retry_delay: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = Some(attempts);
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let server_url = match self.server_url {
            Some(url) => {
                let url = url.trim();
                validate_url(url)?;
                url.strip_suffix('/').unwrap_or(url).to_string()
            }
            None => defaults.server_url,
        };
        let config = AppConfig {
            server_url,
            retry_attempts: self.retry_attempts.unwrap_or(defaults.retry_attempts),
            retry_delay: self.retry_delay.unwrap_or(defaults.retry_delay),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
