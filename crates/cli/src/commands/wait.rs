//! `wait` command: block until the job is done, then print its summary.

use anyhow::{Context, Result};
use splunk_search_client::{CancellationToken, SplunkClient, WaitOutcome};

use crate::error::CliError;
use crate::formatters::{JobSummary, OutputFormat, format_job_summary};

pub async fn run(
    client: &SplunkClient,
    sid: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let outcome = client
        .wait_for_job(sid, cancel)
        .await
        .with_context(|| format!("Failed waiting for job {sid}"))?;

    match outcome {
        WaitOutcome::Done(entry) => {
            print!("{}", format_job_summary(format, &JobSummary::from(entry.as_ref()))?);
            Ok(())
        }
        WaitOutcome::NotFound => Err(CliError::JobNotFound(sid.to_string()).into()),
    }
}
