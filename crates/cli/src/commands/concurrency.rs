//! `concurrency` command: update scheduler-wide concurrency limits.

use anyhow::{Context, Result};
use splunk_search_client::{CancellationToken, ConcurrencySettings, SplunkClient};

use crate::cancellation::cancellable;

pub async fn run(
    client: &SplunkClient,
    settings: ConcurrencySettings,
    cancel: &CancellationToken,
) -> Result<()> {
    if settings.to_form_params().is_empty() {
        eprintln!("No limits given; sending an empty update.");
    }
    cancellable(cancel, client.update_concurrency_settings(&settings))
        .await
        .context("Failed to update concurrency settings")?;
    println!("Updated concurrency settings");
    Ok(())
}
