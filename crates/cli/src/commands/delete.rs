//! `delete` command.

use anyhow::{Context, Result};
use splunk_search_client::{CancellationToken, SplunkClient};

use crate::cancellation::cancellable;

pub async fn run(client: &SplunkClient, sid: &str, cancel: &CancellationToken) -> Result<()> {
    cancellable(cancel, client.delete_search_job(sid))
        .await
        .with_context(|| format!("Failed to delete job {sid}"))?;
    println!("Deleted job {}", sid);
    Ok(())
}
