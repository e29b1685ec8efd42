//! Single-shot request execution and response decoding.
//!
//! Every endpoint funnels through [`send_request`], which attaches trace
//! context, records request metrics and turns any status other than the one
//! the operation expects into [`ClientError::ApiError`].
//!
//! # What this module does NOT handle:
//! - Retries of any kind. A transport failure or unexpected status is returned
//!   to the caller as-is.

use std::time::Instant;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::models::SplunkMessages;
use crate::tracing::inject_trace_context;

/// Header Splunk uses to correlate a request with its server-side logs.
const REQUEST_ID_HEADER: &str = "X-Splunk-Request-Id";

/// Sends a request once and checks the response status.
///
/// # Arguments
///
/// * `builder` - The request to execute
/// * `expected` - The only status code treated as success
/// * `endpoint` - Templated path used as the metrics label (never contains a sid)
/// * `method` - HTTP method used as the metrics label
/// * `metrics` - Optional collector
///
/// # Errors
///
/// Returns `ClientError::HttpError` for transport failures and
/// `ClientError::ApiError` for any status other than `expected`.
pub async fn send_request(
    builder: RequestBuilder,
    expected: StatusCode,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let builder = inject_trace_context(builder);

    if let Some(m) = metrics {
        m.record_request(endpoint, method);
    }

    let started = Instant::now();
    let response = match builder.send().await {
        Ok(response) => response,
        Err(e) => {
            let err = ClientError::from(e);
            if let Some(m) = metrics {
                m.record_request_duration(endpoint, method, started.elapsed(), None);
                m.record_client_error(endpoint, method, &err);
            }
            return Err(err);
        }
    };

    let status = response.status();
    if let Some(m) = metrics {
        m.record_request_duration(endpoint, method, started.elapsed(), Some(status.as_u16()));
    }

    if status == expected {
        debug!(endpoint, method, status = status.as_u16(), "Request succeeded");
        return Ok(response);
    }

    let err = api_error(response).await;
    if let Some(m) = metrics {
        m.record_client_error(endpoint, method, &err);
    }
    Err(err)
}

/// Builds an [`ClientError::ApiError`] from an unexpected response.
///
/// Splunk's `messages` list is preferred over the raw body when it parses.
pub(crate) async fn api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<SplunkMessages>(&body) {
        Ok(parsed) if !parsed.messages.is_empty() => parsed
            .messages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
        _ => body,
    };

    ClientError::ApiError {
        status,
        url,
        message,
        request_id,
    }
}

/// Reads the whole body and decodes it as JSON.
///
/// Decode failures become `ClientError::InvalidResponse` (not `HttpError`) so
/// callers can tell a malformed page from a broken connection.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let err = ClientError::InvalidResponse(format!("{endpoint}: {e}"));
        if let Some(m) = metrics {
            m.record_client_error(endpoint, method, &err);
        }
        err
    })
}
