//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges `.env`, environment and explicit values.
//! - Validate and build the final `Config`.
//!
//! Invariants / Assumptions:
//! - Builder methods called after `from_env()` override environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.
//! - An API token takes precedence over username/password when both are present.

use secrecy::SecretString;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_JOB_POLL_INTERVAL_MS, DEFAULT_PREVIEW_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_SECS,
    MAX_POLL_INTERVAL_MS, MAX_TIMEOUT_SECS,
};
use crate::types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, SearchConfig};

/// Configuration loader that builds config from environment variables and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    api_token: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    job_poll_interval: Option<Duration>,
    preview_poll_interval: Option<Duration>,
    web_base_url: Option<String>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file exists but has invalid syntax
    /// (`ConfigError::DotenvParse`) or cannot be read (`ConfigError::DotenvIo`).
    /// Missing `.env` files are silently ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set the API token.
    pub fn with_api_token(mut self, token: String) -> Self {
        self.api_token = Some(SecretString::new(token.into()));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the delay between job status polls.
    pub fn with_job_poll_interval(mut self, interval: Duration) -> Self {
        self.job_poll_interval = Some(interval);
        self
    }

    /// Set the delay before re-requesting a preview page.
    pub fn with_preview_poll_interval(mut self, interval: Duration) -> Self {
        self.preview_poll_interval = Some(interval);
        self
    }

    /// Set the Splunk Web base URL used for browser links.
    pub fn with_web_base_url(mut self, url: String) -> Self {
        self.web_base_url = Some(url);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .as_deref()
            .map(validate_and_normalize_base_url)
            .transpose()?
            .ok_or(ConfigError::MissingBaseUrl)?;

        let strategy = if let Some(token) = self.api_token {
            AuthStrategy::ApiToken { token }
        } else if let (Some(username), Some(password)) = (self.username, self.password) {
            AuthStrategy::Basic { username, password }
        } else {
            return Err(ConfigError::MissingAuth);
        };

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        };
        Self::validate_timeout(&connection)?;

        let web_base_url = self
            .web_base_url
            .as_deref()
            .map(|raw| {
                validate_and_normalize_base_url(raw).map_err(|e| match e {
                    ConfigError::InvalidValue { message, .. } => ConfigError::InvalidValue {
                        var: "web_base_url".into(),
                        message,
                    },
                    other => other,
                })
            })
            .transpose()?;

        let search = SearchConfig {
            job_poll_interval: self
                .job_poll_interval
                .unwrap_or(Duration::from_millis(DEFAULT_JOB_POLL_INTERVAL_MS)),
            preview_poll_interval: self
                .preview_poll_interval
                .unwrap_or(Duration::from_millis(DEFAULT_PREVIEW_POLL_INTERVAL_MS)),
            web_base_url,
        };
        Self::validate_poll_interval("job_poll_interval", search.job_poll_interval)?;
        Self::validate_poll_interval("preview_poll_interval", search.preview_poll_interval)?;

        Ok(Config {
            connection,
            auth: AuthConfig { strategy },
            search,
        })
    }

    fn validate_timeout(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }

    // Zero disables the delay.
    fn validate_poll_interval(name: &str, interval: Duration) -> Result<(), ConfigError> {
        if interval.as_millis() > u128::from(MAX_POLL_INTERVAL_MS) {
            return Err(ConfigError::InvalidPollInterval {
                message: format!(
                    "{} exceeds maximum allowed value of {} ms",
                    name, MAX_POLL_INTERVAL_MS
                ),
            });
        }
        Ok(())
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_api_token(&mut self, token: Option<SecretString>) {
        self.api_token = token;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_job_poll_interval(&mut self, interval: Option<Duration>) {
        self.job_poll_interval = interval;
    }

    pub(crate) fn set_preview_poll_interval(&mut self, interval: Option<Duration>) {
        self.preview_poll_interval = interval;
    }

    pub(crate) fn set_web_base_url(&mut self, url: Option<String>) {
        self.web_base_url = url;
    }
}

/// Validates and normalizes a base URL string.
///
/// Validation rules:
/// - Trim surrounding whitespace
/// - Treat blank/whitespace-only as missing (returns Err(ConfigError::MissingBaseUrl))
/// - Parse as an absolute URL
/// - Require scheme is http or https
/// - Require host is present
/// - Normalize by stripping trailing slash
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://localhost:8089): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!(
                "scheme must be http or https (e.g. https://localhost:8089), got: {scheme}"
            ),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. https://localhost:8089)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
