//! Search lifecycle cadence configuration.
//!
//! Responsibilities:
//! - Hold the fixed status-poll and preview-poll intervals.
//! - Hold the optional Splunk Web base URL used for browser handoff links.
//!
//! Invariants:
//! - Intervals are serialized as milliseconds.

use crate::constants::{DEFAULT_JOB_POLL_INTERVAL_MS, DEFAULT_PREVIEW_POLL_INTERVAL_MS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Polling cadence and browser handoff settings for search jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Delay between job status polls while waiting for `DONE`.
    #[serde(with = "duration_millis")]
    pub job_poll_interval: Duration,
    /// Delay before re-requesting a page that was returned as a preview.
    #[serde(with = "duration_millis")]
    pub preview_poll_interval: Duration,
    /// Splunk Web base URL for job links; derived from the API URL when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_base_url: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            job_poll_interval: Duration::from_millis(DEFAULT_JOB_POLL_INTERVAL_MS),
            preview_poll_interval: Duration::from_millis(DEFAULT_PREVIEW_POLL_INTERVAL_MS),
            web_base_url: None,
        }
    }
}
