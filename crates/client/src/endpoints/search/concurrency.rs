//! Scheduler concurrency settings endpoint.

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::endpoints::send_request;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::ConcurrencySettings;

const SCHEDULER_SETTINGS_PATH: &str = "/services/search/concurrency-settings/scheduler";

/// Update the scheduler-wide concurrency limits.
///
/// Only fields set on `settings` are sent; an empty update is still posted so
/// the server validates the credentials and answers with its current state.
pub async fn update_concurrency_settings(
    client: &Client,
    base_url: &str,
    auth_header: &HeaderValue,
    settings: &ConcurrencySettings,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    let form = settings.to_form_params();
    debug!(?settings, "Updating scheduler concurrency settings");

    let url = format!("{}{}", base_url, SCHEDULER_SETTINGS_PATH);
    let builder = client
        .post(&url)
        .header(AUTHORIZATION, auth_header.clone())
        .query(&[("output_mode", "json")])
        .form(&form);
    send_request(
        builder,
        StatusCode::OK,
        SCHEDULER_SETTINGS_PATH,
        "POST",
        metrics,
    )
    .await?;

    Ok(())
}
