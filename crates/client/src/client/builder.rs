//! Client builder for constructing [`SplunkClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url, auth_strategy)
//! - Normalizing the base URL (removing trailing slashes)
//! - Computing the `Authorization` header once
//! - Configuring the underlying HTTP client (timeouts, redirects, TLS verification)
//! - Verifying the credentials with one round trip before handing out a client
//!
//! # What this module does NOT handle:
//! - Actual job operations (handled by [`SplunkClient`] methods)
//!
//! # Invariants
//! - `base_url` and `auth_strategy` are required and checked before any network I/O
//! - The base URL is always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use crate::auth::AuthStrategy;
use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use splunk_search_config::{
    AuthStrategy as ConfigAuthStrategy, Config,
    constants::{
        DEFAULT_JOB_POLL_INTERVAL_MS, DEFAULT_MAX_REDIRECTS, DEFAULT_PREVIEW_POLL_INTERVAL_MS,
        DEFAULT_TIMEOUT_SECS,
    },
};

/// Builder for creating a new [`SplunkClient`].
///
/// ```rust,ignore
/// use splunk_search_client::{SplunkClient, AuthStrategy};
/// use secrecy::SecretString;
///
/// let client = SplunkClient::builder()
///     .base_url("https://localhost:8089".to_string())
///     .auth_strategy(AuthStrategy::ApiToken {
///         token: SecretString::new("my-token".to_string().into()),
///     })
///     .timeout(Duration::from_secs(60))
///     .build()
///     .await?;
/// ```
#[derive(Debug)]
pub struct SplunkClientBuilder {
    base_url: Option<String>,
    auth_strategy: Option<AuthStrategy>,
    skip_verify: bool,
    timeout: Duration,
    job_poll_interval: Duration,
    preview_poll_interval: Duration,
    metrics: Option<MetricsCollector>,
}

impl Default for SplunkClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_strategy: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            job_poll_interval: Duration::from_millis(DEFAULT_JOB_POLL_INTERVAL_MS),
            preview_poll_interval: Duration::from_millis(DEFAULT_PREVIEW_POLL_INTERVAL_MS),
            metrics: None,
        }
    }
}

impl SplunkClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the Splunk management port, e.g. `https://localhost:8089`.
    ///
    /// Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the authentication strategy.
    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = Some(strategy);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this against development instances with self-signed certificates.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the per-request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the delay between status polls while waiting for a job. Default is 3 seconds.
    pub fn job_poll_interval(mut self, interval: Duration) -> Self {
        self.job_poll_interval = interval;
        self
    }

    /// Set the delay after a preview page before the next page request. Default is 1 second.
    pub fn preview_poll_interval(mut self, interval: Duration) -> Self {
        self.preview_poll_interval = interval;
        self
    }

    /// Set the metrics collector for request and stream metrics.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Create a client builder from configuration.
    ///
    /// Converts config crate types into client crate types; the metrics
    /// collector is left untouched.
    pub fn from_config(mut self, config: &Config) -> Self {
        let auth_strategy = match &config.auth.strategy {
            ConfigAuthStrategy::Basic { username, password } => AuthStrategy::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            ConfigAuthStrategy::ApiToken { token } => AuthStrategy::ApiToken {
                token: token.clone(),
            },
        };

        self.base_url = Some(config.connection.base_url.clone());
        self.auth_strategy = Some(auth_strategy);
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.job_poll_interval = config.search.job_poll_interval;
        self.preview_poll_interval = config.search.preview_poll_interval;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// - `"https://localhost:8089/"` -> `"https://localhost:8089"`
    /// - `"https://example.com:8089//"` -> `"https://example.com:8089"`
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`SplunkClient`] and verify its credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided or is empty.
    /// Returns [`ClientError::AuthFailed`] if `auth_strategy` was not provided or the
    /// server rejects the credentials.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build or the
    /// verification request cannot be sent.
    pub async fn build(self) -> Result<SplunkClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("base_url is empty".to_string()));
        }

        let auth_strategy = self
            .auth_strategy
            .ok_or_else(|| ClientError::AuthFailed("auth_strategy is required".to_string()))?;
        let auth_header = auth_strategy.authorization_header()?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        endpoints::verify_credentials(&http, &base_url, &auth_header, self.metrics.as_ref())
            .await?;
        tracing::info!(base_url = %base_url, "Connected to Splunk");

        Ok(SplunkClient {
            http,
            base_url,
            auth_header,
            api_token_auth: auth_strategy.is_api_token(),
            job_poll_interval: self.job_poll_interval,
            preview_poll_interval: self.preview_poll_interval,
            metrics: self.metrics,
        })
    }
}
