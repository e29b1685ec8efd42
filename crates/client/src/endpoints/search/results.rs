//! Result page endpoint.
//!
//! Only `results_preview` is exposed: it answers with whatever the job has
//! produced so far, flagged `preview` while the job is still running. The
//! final `results` endpoint would answer 204 until the job is done.

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::endpoints::{encode_path_segment, read_json, send_request};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::ResultsPage;

const RESULTS_PREVIEW_LABEL: &str = "/services/search/jobs/{sid}/results_preview";

/// Fetch records `[offset, offset + count)` of a job's preview results.
pub async fn get_results_preview(
    client: &Client,
    base_url: &str,
    auth_header: &HeaderValue,
    sid: &str,
    count: u64,
    offset: u64,
    metrics: Option<&MetricsCollector>,
) -> Result<ResultsPage> {
    debug!(sid, count, offset, "Fetching preview results page");

    let url = format!(
        "{}/services/search/jobs/{}/results_preview",
        base_url,
        encode_path_segment(sid)
    );
    let builder = client
        .get(&url)
        .header(AUTHORIZATION, auth_header.clone())
        .query(&[("output_mode", "json")])
        .query(&[("count", count), ("offset", offset)]);
    let response =
        send_request(builder, StatusCode::OK, RESULTS_PREVIEW_LABEL, "GET", metrics).await?;

    read_json(response, RESULTS_PREVIEW_LABEL, "GET", metrics).await
}
