//! Error types for the Splunk search client.
//!
//! Every one-shot operation returns [`Result`]. The result stream never yields
//! errors as items; it reports why it stopped through
//! [`crate::stream::StreamEnd`] instead.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Splunk client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Authentication failed or no credentials were configured.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Transport error (connection, DNS, TLS, timeout). Never retried.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Splunk answered with a status other than the one the operation expects.
    #[error("API error ({status}) at {url}: {message}{}", .request_id.as_ref().map(|id| format!(" [Request ID: {id}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        message: String,
        request_id: Option<String>,
    },

    /// Invalid response format from Splunk.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Invalid or missing URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The job reached the `FAILED` dispatch state.
    #[error("Search job {sid} failed: {}", if .messages.is_empty() { "no messages reported".to_string() } else { .messages.join("; ") })]
    JobFailed { sid: String, messages: Vec<String> },

    /// The caller cancelled the operation.
    #[error("Operation cancelled")]
    Cancelled,
}

impl ClientError {
    /// Check if this error indicates authentication failure.
    ///
    /// Besides [`ClientError::AuthFailed`], a 401 or 403 from any endpoint counts.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::AuthFailed(_) => true,
            Self::ApiError { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }

    /// Check if this error is the caller-initiated cancellation signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidResponse(error.to_string())
    }
}
