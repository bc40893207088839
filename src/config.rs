// Client configuration, loaded from the environment (and a `.env` file)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::types::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://restful-booker.herokuapp.com";
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "password123";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

// Retry settings for token acquisition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRetryConfig {
    pub max_attempts: u32,
    pub backoff_step_ms: u64,
}

impl Default for AuthRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step_ms: 500,
        }
    }
}

impl AuthRetryConfig {
    pub fn backoff_step(&self) -> Duration {
        Duration::from_millis(self.backoff_step_ms)
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub credentials: Credentials,
    // None leaves the transport's own default in place
    pub timeout_ms: Option<u64>,
    pub ignore_https_errors: bool,
    pub auth_retry: AuthRetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::new(DEFAULT_USERNAME, DEFAULT_PASSWORD),
            timeout_ms: None,
            ignore_https_errors: true,
            auth_retry: AuthRetryConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    // Loads `.env` if one exists, then reads `API_*` variables.
    pub fn from_env() -> Result<Self, ClientError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Builds a config from an arbitrary key lookup; missing keys fall back
    // to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let config = Self {
            base_url: text("API_BASE_URL").unwrap_or(defaults.base_url),
            credentials: Credentials {
                username: text("API_USERNAME").unwrap_or(defaults.credentials.username),
                password: text("API_PASSWORD").unwrap_or(defaults.credentials.password),
            },
            timeout_ms: parse_var(&lookup, "API_TIMEOUT_MS")?,
            ignore_https_errors: parse_var(&lookup, "API_IGNORE_HTTPS_ERRORS")?
                .unwrap_or(defaults.ignore_https_errors),
            auth_retry: AuthRetryConfig {
                max_attempts: parse_var(&lookup, "API_AUTH_MAX_ATTEMPTS")?
                    .unwrap_or(defaults.auth_retry.max_attempts),
                backoff_step_ms: parse_var(&lookup, "API_AUTH_BACKOFF_MS")?
                    .unwrap_or(defaults.auth_retry.backoff_step_ms),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        self.validate_base_url()?;
        if self.auth_retry.max_attempts == 0 {
            return Err(ClientError::ConfigError(
                "auth max attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    // The only setting the HTTP transport itself depends on
    pub fn validate_base_url(&self) -> Result<(), ClientError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::ConfigError(format!(
                "base url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }

        pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ClientError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            ClientError::ConfigError(format!("{} has an invalid value: {:?}", key, raw))
        }),
    }
}
