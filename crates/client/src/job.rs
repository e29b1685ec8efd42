//! Handle to a remote search job.
//!
//! A [`SearchJob`] is a sid plus the client that created it. It holds no job
//! state of its own; every call asks the server.

use std::fmt;

use splunk_search_config::constants::SEARCH_VIEW_PATH;
use url::Url;

use crate::cancellation::CancellationToken;
use crate::client::SplunkClient;
use crate::error::{ClientError, Result};
use crate::models::{ControlCommand, JobStatusResponse, WaitOutcome};
use crate::stream::ResultStream;

/// A search job on a Splunk server.
#[derive(Debug, Clone)]
pub struct SearchJob {
    sid: String,
    client: SplunkClient,
}

impl SearchJob {
    /// Wrap an existing sid.
    pub fn attach(client: SplunkClient, sid: impl Into<String>) -> Self {
        Self {
            sid: sid.into(),
            client,
        }
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn client(&self) -> &SplunkClient {
        &self.client
    }

    /// Fetch the job's status document.
    pub async fn status(&self) -> Result<JobStatusResponse> {
        self.client.get_search_job(&self.sid).await
    }

    /// Wait until the job is done; see [`SplunkClient::wait_for_job`].
    pub async fn wait(&self, cancel: &CancellationToken) -> Result<WaitOutcome> {
        self.client.wait_for_job(&self.sid, cancel).await
    }

    /// Stream the job's result records.
    pub fn results(&self, cancel: CancellationToken) -> ResultStream {
        self.client.stream_results(&self.sid, cancel)
    }

    pub async fn delete(&self) -> Result<()> {
        self.client.delete_search_job(&self.sid).await
    }

    pub async fn control(&self, command: ControlCommand) -> Result<()> {
        self.client.control_job(&self.sid, command).await
    }

    /// Stop the search and keep the results gathered so far.
    pub async fn stop_and_finalize(&self) -> Result<()> {
        self.control(ControlCommand::Finalize).await
    }

    /// Change the job's time-to-live, in seconds.
    pub async fn set_ttl(&self, ttl_secs: u64) -> Result<()> {
        let ttl = ttl_secs.to_string();
        self.client
            .control_job_with(&self.sid, ControlCommand::SetTtl, &[("ttl", &ttl)])
            .await
    }

    /// Change the job's priority (0 to 10).
    pub async fn set_priority(&self, priority: u8) -> Result<()> {
        let priority = priority.to_string();
        self.client
            .control_job_with(
                &self.sid,
                ControlCommand::SetPriority,
                &[("priority", &priority)],
            )
            .await
    }

    /// Move the job to another workload pool.
    pub async fn set_workload_pool(&self, pool: &str) -> Result<()> {
        self.client
            .control_job_with(
                &self.sid,
                ControlCommand::SetWorkloadPool,
                &[("workload_pool", pool)],
            )
            .await
    }

    /// Browser URL for the job; see [`job_browser_url`].
    pub fn url(&self, custom_base: Option<&str>) -> Result<String> {
        job_browser_url(self.client.base_url(), &self.sid, custom_base)
    }
}

impl fmt::Display for SearchJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sid)
    }
}

/// Build the Splunk Web URL that shows a job's results.
///
/// Without `custom_base` the management URL is reused with its port removed;
/// with it, `custom_base` is used as given (minus trailing slashes).
///
/// ```
/// use splunk_search_client::job_browser_url;
///
/// assert_eq!(
///     job_browser_url("http://localhost:8090", "TestID", None).unwrap(),
///     "http://localhost/en-US/app/search/search?sid=TestID"
/// );
/// assert_eq!(
///     job_browser_url("http://localhost:8090", "TestID", Some("http://localhost:81")).unwrap(),
///     "http://localhost:81/en-US/app/search/search?sid=TestID"
/// );
/// ```
pub fn job_browser_url(api_base_url: &str, sid: &str, custom_base: Option<&str>) -> Result<String> {
    let base = match custom_base.map(str::trim).filter(|s| !s.is_empty()) {
        Some(custom) => custom.trim_end_matches('/').to_string(),
        None => {
            let mut url = Url::parse(api_base_url)
                .map_err(|e| ClientError::InvalidUrl(format!("{api_base_url}: {e}")))?;
            url.set_port(None).map_err(|()| {
                ClientError::InvalidUrl(format!("{api_base_url}: URL has no host"))
            })?;
            url.as_str().trim_end_matches('/').to_string()
        }
    };

    let sid: String = url::form_urlencoded::byte_serialize(sid.as_bytes()).collect();
    Ok(format!("{base}{SEARCH_VIEW_PATH}?sid={sid}"))
}
