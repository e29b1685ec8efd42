//! Metrics collection for API calls and result streaming.
//!
//! This module records, through the `metrics` facade:
//! - Request latency histograms and request counters
//! - Error counters by category
//! - Pages and records delivered by result streams
//! - Why each result stream stopped
//!
//! # What this module does NOT handle:
//! - Metrics exposition (see [`crate::metrics_exporter`])
//!
//! # Invariants
//! - Request metrics use the labels `endpoint`, `method`, `status`, `error_category`
//! - Endpoint labels are path templates, never raw sids
//! - Recording is infallible and does nothing when no recorder is installed

use crate::error::ClientError;
use crate::stream::StreamEnd;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "splunk_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "splunk_api_requests_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "splunk_api_errors_total";

/// Metric name for result pages fetched by streams.
pub const METRIC_PAGES_STREAMED: &str = "splunk_search_pages_streamed_total";

/// Metric name for records delivered by streams.
pub const METRIC_RECORDS_STREAMED: &str = "splunk_search_records_streamed_total";

/// Metric name for stream terminations.
pub const METRIC_STREAM_TERMINATIONS: &str = "splunk_search_stream_terminations_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection, DNS, TLS or timeout failure
    Transport,
    /// HTTP 4xx
    Http4xx,
    /// HTTP 5xx
    Http5xx,
    /// Response body could not be decoded
    Decode,
    /// Caller cancelled the operation
    Cancelled,
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Cancelled => "cancelled",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::HttpError(e) if e.is_decode() => ErrorCategory::Decode,
            ClientError::HttpError(_) => ErrorCategory::Transport,
            ClientError::ApiError { status, .. } => match status {
                400..=499 => ErrorCategory::Http4xx,
                500..=599 => ErrorCategory::Http5xx,
                _ => ErrorCategory::Unknown,
            },
            ClientError::InvalidResponse(_) => ErrorCategory::Decode,
            ClientError::Cancelled => ErrorCategory::Cancelled,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for Splunk API calls.
///
/// A thin wrapper over the `metrics` macros that keeps label names consistent.
///
/// ```rust,ignore
/// use splunk_search_client::metrics::MetricsCollector;
///
/// let collector = MetricsCollector::new();
/// collector.record_request_duration("/services/search/jobs", "POST", Duration::from_millis(150), Some(201));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of an API request.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record one request attempt.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record an error.
    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error from a ClientError, categorizing it automatically.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        self.record_error(endpoint, method, ErrorCategory::from(error));
    }

    /// Record one page fetched by a result stream and the records it carried.
    pub fn record_page_streamed(&self, preview: bool, records: usize) {
        if !self.enabled {
            return;
        }

        let preview_label = if preview { "true" } else { "false" };
        metrics::counter!(METRIC_PAGES_STREAMED, "preview" => preview_label).increment(1);
        metrics::counter!(METRIC_RECORDS_STREAMED, "preview" => preview_label)
            .increment(records as u64);
    }

    /// Record why a result stream stopped.
    pub fn record_stream_end(&self, end: &StreamEnd) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_STREAM_TERMINATIONS, "reason" => end.as_str()).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "test".to_string(),
            message: "nope".to_string(),
            request_id: None,
        }
    }

    #[test]
    fn test_error_category_as_str() {
        assert_eq!(ErrorCategory::Transport.as_str(), "transport");
        assert_eq!(ErrorCategory::Http4xx.as_str(), "http_4xx");
        assert_eq!(ErrorCategory::Http5xx.as_str(), "http_5xx");
        assert_eq!(ErrorCategory::Decode.as_str(), "decode");
        assert_eq!(ErrorCategory::Cancelled.as_str(), "cancelled");
        assert_eq!(ErrorCategory::Unknown.as_str(), "unknown");
    }

    #[test]
    fn test_error_categorization() {
        assert_eq!(ErrorCategory::from(&api_error(401)), ErrorCategory::Http4xx);
        assert_eq!(ErrorCategory::from(&api_error(503)), ErrorCategory::Http5xx);
        assert_eq!(ErrorCategory::from(&api_error(302)), ErrorCategory::Unknown);
        assert_eq!(
            ErrorCategory::from(&ClientError::InvalidResponse("bad".into())),
            ErrorCategory::Decode
        );
        assert_eq!(
            ErrorCategory::from(&ClientError::Cancelled),
            ErrorCategory::Cancelled
        );
        assert_eq!(
            ErrorCategory::from(&ClientError::AuthFailed("x".into())),
            ErrorCategory::Unknown
        );
    }

    #[test]
    fn test_recording_without_recorder_does_not_panic() {
        let collector = MetricsCollector::new();
        collector.record_request("/services/search/jobs", "POST");
        collector.record_request_duration(
            "/services/search/jobs",
            "POST",
            Duration::from_millis(5),
            None,
        );
        collector.record_page_streamed(true, 100);
        collector.record_stream_end(&StreamEnd::Exhausted);
    }

    #[test]
    fn test_disabled_collector() {
        let collector = MetricsCollector::disabled();
        assert!(!collector.is_enabled());
        collector.record_error("/x", "GET", ErrorCategory::Unknown);
        collector.record_stream_end(&StreamEnd::Cancelled);
    }
}
