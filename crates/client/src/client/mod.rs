//! Main Splunk search client.
//!
//! This module provides [`SplunkClient`], the transport gateway every job
//! operation goes through.
//!
//! # Submodules
//! - [`builder`]: Client construction, credential header and verification
//! - `search`: Job submission
//! - `jobs`: Status, waiting, control, deletion and result paging
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - The result paging loop (see [`crate::stream`])
//!
//! # Invariants
//! - The `Authorization` header is computed once in [`builder::SplunkClientBuilder::build`]
//!   and never changes afterwards
//! - No method mutates the client; clones share one connection pool and can be
//!   used from any number of tasks at once
//! - No request is ever retried

pub mod builder;
mod jobs;
mod search;

use std::time::Duration;

use reqwest::header::HeaderValue;

use crate::metrics::MetricsCollector;

pub use search::{JobParams, build_search_params};

/// Splunk search REST API client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use splunk_search_client::{AuthStrategy, SplunkClient};
/// use secrecy::SecretString;
///
/// let client = SplunkClient::builder()
///     .base_url("https://localhost:8089".to_string())
///     .auth_strategy(AuthStrategy::ApiToken {
///         token: SecretString::new("my-token".to_string().into()),
///     })
///     .build()
///     .await?;
/// ```
///
/// `build()` performs one request to verify the credentials and fails with
/// [`crate::ClientError::AuthFailed`] if they are rejected.
#[derive(Debug, Clone)]
pub struct SplunkClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) auth_header: HeaderValue,
    pub(crate) api_token_auth: bool,
    pub(crate) job_poll_interval: Duration,
    pub(crate) preview_poll_interval: Duration,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl SplunkClient {
    /// Create a new client builder.
    pub fn builder() -> builder::SplunkClientBuilder {
        builder::SplunkClientBuilder::new()
    }

    /// Get the base URL (without trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the client authenticates with an API token.
    pub fn is_api_token_auth(&self) -> bool {
        self.api_token_auth
    }

    /// Delay between status polls in [`SplunkClient::wait_for_job`].
    pub fn job_poll_interval(&self) -> Duration {
        self.job_poll_interval
    }

    /// Delay before re-requesting after a preview page.
    pub fn preview_poll_interval(&self) -> Duration {
        self.preview_poll_interval
    }

    fn metrics(&self) -> Option<&MetricsCollector> {
        self.metrics.as_ref()
    }
}
