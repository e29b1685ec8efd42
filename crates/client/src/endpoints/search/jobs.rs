//! Search job lifecycle endpoints.
//!
//! # What this module handles:
//! - Creating search jobs
//! - Fetching job status
//! - Deleting jobs
//! - Sending control verbs
//!
//! # What this module does NOT handle:
//! - Waiting for completion (see [`crate::client`])
//! - Result pages (see [`super::results`])

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::endpoints::{encode_path_segment, read_json, send_request};
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::{ControlCommand, CreateJobResponse, JobStatusResponse};

const JOBS_PATH: &str = "/services/search/jobs";
const JOB_LABEL: &str = "/services/search/jobs/{sid}";
const CONTROL_LABEL: &str = "/services/search/jobs/{sid}/control";

/// Reduce a query to its leading command keyword for logging.
///
/// Queries routinely embed tokens, hostnames and user data, so only a
/// purely alphabetic first word survives.
pub(crate) fn redact_query(query: &str) -> String {
    let chars = query.chars().count();
    let keyword = query
        .split_whitespace()
        .find(|w| *w != "|")
        .map(|w| w.trim_start_matches('|'))
        .filter(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_alphabetic()));
    match keyword {
        Some(keyword) => format!("{keyword} <{chars} chars>"),
        None => format!("<{chars} chars>"),
    }
}

/// Create a new search job from fully-built form parameters.
///
/// Returns the new job's sid.
pub async fn create_job(
    client: &Client,
    base_url: &str,
    auth_header: &HeaderValue,
    params: &[(String, String)],
    metrics: Option<&MetricsCollector>,
) -> Result<String> {
    for (key, value) in params {
        if key == "search" {
            debug!("  {}: {}", key, redact_query(value));
        } else {
            debug!("  {}: {}", key, value);
        }
    }

    let url = format!("{}{}", base_url, JOBS_PATH);
    let builder = client
        .post(&url)
        .header(AUTHORIZATION, auth_header.clone())
        .query(&[("output_mode", "json")])
        .form(params);
    let response = send_request(builder, StatusCode::CREATED, JOBS_PATH, "POST", metrics).await?;

    let created: CreateJobResponse = read_json(response, JOBS_PATH, "POST", metrics).await?;
    created
        .into_sid()
        .ok_or_else(|| ClientError::InvalidResponse("Missing sid in response".to_string()))
}

/// Fetch the status document of one job.
pub async fn get_job(
    client: &Client,
    base_url: &str,
    auth_header: &HeaderValue,
    sid: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<JobStatusResponse> {
    debug!("Getting job status for sid: {}", sid);

    let url = format!("{}{}/{}", base_url, JOBS_PATH, encode_path_segment(sid));
    let builder = client
        .get(&url)
        .header(AUTHORIZATION, auth_header.clone())
        .query(&[("output_mode", "json")]);
    let response = send_request(builder, StatusCode::OK, JOB_LABEL, "GET", metrics).await?;

    read_json(response, JOB_LABEL, "GET", metrics).await
}

/// Delete a job and its artifacts.
pub async fn delete_job(
    client: &Client,
    base_url: &str,
    auth_header: &HeaderValue,
    sid: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    debug!("Deleting job: {}", sid);

    let url = format!("{}{}/{}", base_url, JOBS_PATH, encode_path_segment(sid));
    let builder = client
        .delete(&url)
        .header(AUTHORIZATION, auth_header.clone())
        .query(&[("output_mode", "json")]);
    send_request(builder, StatusCode::OK, JOB_LABEL, "DELETE", metrics).await?;

    Ok(())
}

/// Send a control verb, plus any verb argument, to a job.
pub async fn control_job(
    client: &Client,
    base_url: &str,
    auth_header: &HeaderValue,
    sid: &str,
    command: ControlCommand,
    args: &[(&str, &str)],
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    debug!("Sending '{}' to job: {}", command, sid);

    let url = format!(
        "{}{}/{}/control",
        base_url,
        JOBS_PATH,
        encode_path_segment(sid)
    );

    let mut form: Vec<(&str, &str)> = Vec::with_capacity(args.len() + 1);
    form.push(("action", command.as_str()));
    form.extend(args.iter().copied().filter(|(name, _)| *name != "action"));

    let builder = client
        .post(&url)
        .header(AUTHORIZATION, auth_header.clone())
        .query(&[("output_mode", "json")])
        .form(&form);
    send_request(builder, StatusCode::OK, CONTROL_LABEL, "POST", metrics).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_query_keeps_command_keyword() {
        assert_eq!(
            redact_query("search index=main password=hunter2"),
            "search <34 chars>"
        );
        assert_eq!(redact_query("| makeresults count=5"), "makeresults <21 chars>");
        assert_eq!(redact_query("|tstats count"), "tstats <13 chars>");
    }

    #[test]
    fn test_redact_query_hides_non_keyword_start() {
        assert_eq!(redact_query("index=main"), "<10 chars>");
        assert_eq!(redact_query(""), "<0 chars>");
    }
}
