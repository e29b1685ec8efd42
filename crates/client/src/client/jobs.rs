//! Job status polling, control, deletion and result paging.
//!
//! # Invariants
//! - `wait_for_job` sleeps a fixed interval between polls; there is no backoff
//! - Every failure is returned on the first occurrence
//! - Cancellation wins over any in-flight request or sleep

use tracing::{debug, info};

use crate::cancellation::CancellationToken;
use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{
    ConcurrencySettings, ControlCommand, JobStatusResponse, ResultsPage, WaitOutcome,
};
use crate::stream::ResultStream;

impl SplunkClient {
    /// Fetch the current status document of a job, once.
    pub async fn get_search_job(&self, sid: &str) -> Result<JobStatusResponse> {
        endpoints::get_job(
            &self.http,
            &self.base_url,
            &self.auth_header,
            sid,
            self.metrics(),
        )
        .await
    }

    /// Poll a job until its dispatch state is `DONE`.
    ///
    /// - A status document with no entries means the job no longer exists and
    ///   yields [`WaitOutcome::NotFound`].
    /// - A `FAILED` job yields [`ClientError::JobFailed`] with its messages.
    /// - Between polls the task sleeps the client's job poll interval.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Cancelled`] as soon as `cancel` fires, and any
    /// status fetch error unchanged.
    pub async fn wait_for_job(
        &self,
        sid: &str,
        cancel: &CancellationToken,
    ) -> Result<WaitOutcome> {
        loop {
            if cancel.is_cancelled() {
                return Err(ClientError::Cancelled);
            }

            let status = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ClientError::Cancelled),
                status = self.get_search_job(sid) => status?,
            };

            let Some(entry) = status.into_first_entry() else {
                info!(sid, "Search job not found");
                return Ok(WaitOutcome::NotFound);
            };

            let state = &entry.content.dispatch_state;
            if state.is_done() {
                info!(
                    sid,
                    result_count = entry.content.result_count,
                    "Search job done"
                );
                return Ok(WaitOutcome::Done(Box::new(entry)));
            }
            if state.is_failed() {
                return Err(ClientError::JobFailed {
                    sid: sid.to_string(),
                    messages: entry.content.message_texts(),
                });
            }

            debug!(
                sid,
                dispatch_state = %state,
                done_progress = entry.content.done_progress,
                "Search job not done yet"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ClientError::Cancelled),
                _ = tokio::time::sleep(self.job_poll_interval) => {}
            }
        }
    }

    /// Send a control verb that takes no argument.
    pub async fn control_job(&self, sid: &str, command: ControlCommand) -> Result<()> {
        self.control_job_with(sid, command, &[]).await
    }

    /// Send a control verb with extra form parameters, e.g. `("ttl", "600")`.
    pub async fn control_job_with(
        &self,
        sid: &str,
        command: ControlCommand,
        args: &[(&str, &str)],
    ) -> Result<()> {
        endpoints::control_job(
            &self.http,
            &self.base_url,
            &self.auth_header,
            sid,
            command,
            args,
            self.metrics(),
        )
        .await?;
        info!(sid, action = %command, "Sent job control command");
        Ok(())
    }

    /// Delete a job outright.
    pub async fn delete_search_job(&self, sid: &str) -> Result<()> {
        endpoints::delete_job(
            &self.http,
            &self.base_url,
            &self.auth_header,
            sid,
            self.metrics(),
        )
        .await?;
        info!(sid, "Deleted search job");
        Ok(())
    }

    /// Adjust the scheduler-wide concurrency limits.
    ///
    /// Fields left as `None` are not sent.
    pub async fn update_concurrency_settings(&self, settings: &ConcurrencySettings) -> Result<()> {
        endpoints::update_concurrency_settings(
            &self.http,
            &self.base_url,
            &self.auth_header,
            settings,
            self.metrics(),
        )
        .await
    }

    /// Fetch one page of preview results.
    pub async fn get_results_preview(
        &self,
        sid: &str,
        count: u64,
        offset: u64,
    ) -> Result<ResultsPage> {
        endpoints::get_results_preview(
            &self.http,
            &self.base_url,
            &self.auth_header,
            sid,
            count,
            offset,
            self.metrics(),
        )
        .await
    }

    /// Stream every result record of a job.
    ///
    /// Must be called from within a Tokio runtime: paging runs on a spawned
    /// task. See [`crate::stream`] for the paging rules.
    pub fn stream_results(&self, sid: &str, cancel: CancellationToken) -> ResultStream {
        ResultStream::spawn(self.clone(), sid.to_string(), cancel)
    }
}
