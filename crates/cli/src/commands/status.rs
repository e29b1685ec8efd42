//! `status` command.

use anyhow::{Context, Result};
use splunk_search_client::{CancellationToken, SplunkClient};

use crate::cancellation::cancellable;
use crate::error::CliError;
use crate::formatters::{JobSummary, OutputFormat, format_job_summary};

pub async fn run(
    client: &SplunkClient,
    sid: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let status = cancellable(cancel, client.get_search_job(sid))
        .await
        .with_context(|| format!("Failed to fetch status of job {sid}"))?;

    let entry = status
        .first_entry()
        .ok_or_else(|| CliError::JobNotFound(sid.to_string()))?;

    print!("{}", format_job_summary(format, &JobSummary::from(entry))?);
    Ok(())
}
