//! `results` command: stream a job's records to stdout.

use anyhow::Result;
use splunk_search_client::{CancellationToken, SplunkClient};

use crate::formatters::OutputFormat;

pub async fn run(
    client: &SplunkClient,
    sid: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let stdout = std::io::stdout().lock();
    super::stream_records(client, sid, format, stdout, cancel).await?;
    Ok(())
}
