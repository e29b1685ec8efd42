//! `submit` command: create a job, optionally wait for it and stream it.

use anyhow::{Context, Result};
use splunk_search_client::{CancellationToken, JobParams, SplunkClient, WaitOutcome};
use tracing::info;

use crate::cancellation::cancellable;
use crate::error::CliError;
use crate::formatters::OutputFormat;

pub async fn run(
    client: &SplunkClient,
    query: &str,
    params: Vec<(String, String)>,
    wait: bool,
    stream: bool,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let params: JobParams = params.into_iter().collect();
    let job = cancellable(cancel, client.create_search_job(query, &params))
        .await
        .context("Failed to create search job")?;

    // With --stream, stdout carries records only.
    if stream {
        eprintln!("{}", job.sid());
    } else {
        println!("{}", job.sid());
    }

    if wait {
        match job
            .wait(cancel)
            .await
            .with_context(|| format!("Failed waiting for job {}", job.sid()))?
        {
            WaitOutcome::Done(entry) => {
                info!(sid = job.sid(), result_count = entry.content.result_count, "Job done");
            }
            WaitOutcome::NotFound => return Err(CliError::JobNotFound(job.sid().to_string()).into()),
        }
    }

    if stream {
        let stdout = std::io::stdout().lock();
        super::stream_records(client, job.sid(), format, stdout, cancel).await?;
    }

    Ok(())
}
