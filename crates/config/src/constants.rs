//! Centralized constants for the Splunk search workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default Splunk management port.
pub const DEFAULT_SPLUNK_PORT: u16 = 8089;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Job Lifecycle Cadence
// =============================================================================

/// Fixed delay between job status polls while waiting for completion, in milliseconds.
pub const DEFAULT_JOB_POLL_INTERVAL_MS: u64 = 3000;

/// Delay before re-requesting a results page that came back as a preview, in milliseconds.
pub const DEFAULT_PREVIEW_POLL_INTERVAL_MS: u64 = 1000;

/// Upper bound accepted for either polling interval (10 minutes).
pub const MAX_POLL_INTERVAL_MS: u64 = 600_000;

// =============================================================================
// Result Streaming
// =============================================================================

/// Number of records requested per `results_preview` page.
pub const RESULTS_PAGE_SIZE: usize = 100;

/// Number of pages worth of records buffered between the producer and the consumer.
pub const RESULTS_BUFFER_PAGES: usize = 4;

// =============================================================================
// Splunk Web
// =============================================================================

/// Path template appended to the web base URL to view a job's results.
pub const SEARCH_VIEW_PATH: &str = "/en-US/app/search/search";
