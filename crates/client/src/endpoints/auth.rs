//! Credential verification endpoint.

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::endpoints::send_request;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

const CURRENT_CONTEXT_PATH: &str = "/services/authentication/current-context";

/// Confirm the credential header is accepted by the server.
///
/// Any non-200 answer (typically 401) becomes [`ClientError::AuthFailed`];
/// transport failures are passed through unchanged.
pub async fn verify_credentials(
    client: &Client,
    base_url: &str,
    auth_header: &HeaderValue,
    metrics: Option<&MetricsCollector>,
) -> Result<()> {
    debug!("Verifying credentials against {}", CURRENT_CONTEXT_PATH);

    let url = format!("{}{}", base_url, CURRENT_CONTEXT_PATH);
    let builder = client
        .get(&url)
        .header(AUTHORIZATION, auth_header.clone())
        .query(&[("output_mode", "json")]);

    match send_request(builder, StatusCode::OK, CURRENT_CONTEXT_PATH, "GET", metrics).await {
        Ok(_) => Ok(()),
        Err(ClientError::ApiError {
            status, message, ..
        }) => Err(ClientError::AuthFailed(format!(
            "server rejected credentials (HTTP {status}): {message}"
        ))),
        Err(e) => Err(e),
    }
}
