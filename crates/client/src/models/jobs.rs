//! Search job models.
//!
//! # What this module handles:
//! - The job creation response (`sid`)
//! - The job status document returned by `GET /services/search/jobs/{sid}`
//! - Dispatch states and the outcome of waiting on a job
//!
//! # What this module does NOT handle:
//! - Polling logic (see [`crate::client`])
//! - HTTP transport (see [`crate::endpoints::search`])

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::common::{Generator, Paging};
use crate::record::FieldValue;

/// Response body of a successful job creation.
///
/// Current servers answer `{"sid": "..."}`; older ones wrap it in an Atom entry.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CreateJobResponse {
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub entry: Vec<CreateJobEntry>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CreateJobEntry {
    #[serde(default)]
    pub content: CreateJobContent,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CreateJobContent {
    #[serde(default)]
    pub sid: Option<String>,
}

impl CreateJobResponse {
    /// The job id, from the top level or from the first entry.
    pub fn into_sid(self) -> Option<String> {
        self.sid
            .filter(|s| !s.is_empty())
            .or_else(|| {
                self.entry
                    .into_iter()
                    .next()
                    .and_then(|e| e.content.sid)
                    .filter(|s| !s.is_empty())
            })
    }
}

/// Server-reported lifecycle stage of a search job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DispatchState {
    Queued,
    Parsing,
    Running,
    Paused,
    Finalizing,
    Failed,
    Done,
    /// A state this client does not know about, kept verbatim.
    Other(String),
}

impl DispatchState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "QUEUED",
            Self::Parsing => "PARSING",
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
            Self::Finalizing => "FINALIZING",
            Self::Failed => "FAILED",
            Self::Done => "DONE",
            Self::Other(s) => s,
        }
    }

    /// Only `DONE` ends a wait successfully.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl Default for DispatchState {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for DispatchState {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "QUEUED" => Self::Queued,
            "PARSING" => Self::Parsing,
            "RUNNING" => Self::Running,
            "PAUSED" => Self::Paused,
            "FINALIZING" => Self::Finalizing,
            "FAILED" => Self::Failed,
            "DONE" => Self::Done,
            _ => Self::Other(raw.to_string()),
        }
    }
}

impl From<String> for DispatchState {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<DispatchState> for String {
    fn from(state: DispatchState) -> Self {
        state.as_str().to_string()
    }
}

impl FromStr for DispatchState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status document for one search job.
///
/// Zero entries means the job does not exist (deleted or expired).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct JobStatusResponse {
    #[serde(default)]
    pub generator: Generator,
    #[serde(default)]
    pub entry: Vec<JobEntry>,
    #[serde(default)]
    pub paging: Paging,
}

impl JobStatusResponse {
    /// The job's entry, if the job exists.
    pub fn first_entry(&self) -> Option<&JobEntry> {
        self.entry.first()
    }

    pub fn into_first_entry(self) -> Option<JobEntry> {
        self.entry.into_iter().next()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct JobEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub links: FieldValue,
    #[serde(default)]
    pub content: SearchContent,
}

/// Job metadata. Passed through as reported; only `dispatch_state` and
/// `messages` drive client behaviour.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchContent {
    pub bundle_version: String,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub can_summarize: bool,
    pub cursor_time: String,
    #[serde(rename = "defaultSaveTTL", deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub default_save_ttl: String,
    #[serde(rename = "defaultTTL", deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub default_ttl: String,
    pub delegate: String,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub disk_usage: u64,
    pub dispatch_state: DispatchState,
    #[serde(deserialize_with = "crate::serde_helpers::f64_from_string_or_number")]
    pub done_progress: f64,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub drop_count: u64,
    pub earliest_time: String,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub event_available_count: u64,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub event_count: u64,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub event_field_count: u64,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub event_is_streaming: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub event_is_truncated: bool,
    pub event_search: String,
    pub event_sorting: String,
    #[serde(deserialize_with = "crate::serde_helpers::f64_from_string_or_number")]
    pub index_earliest_time: f64,
    #[serde(deserialize_with = "crate::serde_helpers::f64_from_string_or_number")]
    pub index_latest_time: f64,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_batch_mode_search: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_done: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_events_preview_enabled: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_failed: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_finalized: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_paused: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_preview_enabled: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_real_time_search: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_remote_timeline: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_saved: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_saved_search: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_time_cursored: bool,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub is_zombie: bool,
    pub keywords: String,
    pub label: String,
    pub latest_time: String,
    pub normalized_search: String,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub num_previews: u64,
    pub optimized_search: String,
    pub phase0: String,
    pub phase1: String,
    #[serde(deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub pid: String,
    #[serde(deserialize_with = "crate::serde_helpers::i64_from_string_or_number")]
    pub priority: i64,
    pub provenance: String,
    pub remote_search: String,
    pub report_search: String,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub result_count: u64,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub result_is_streaming: bool,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub result_preview_count: u64,
    #[serde(deserialize_with = "crate::serde_helpers::f64_from_string_or_number")]
    pub run_duration: f64,
    #[serde(deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub sample_ratio: String,
    #[serde(deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub sample_seed: String,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub scan_count: u64,
    pub search: String,
    #[serde(deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub search_can_be_event_type: bool,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub search_total_buckets_count: u64,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub search_total_eliminated_buckets_count: u64,
    pub sid: String,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub status_buckets: u64,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub ttl: u64,
    pub messages: Vec<FieldValue>,
    pub search_providers: Vec<String>,
    pub remote_search_logs: Vec<String>,
}

impl SearchContent {
    /// Human-readable job messages.
    ///
    /// Splunk reports these either as `{"type": ..., "text": ...}` objects or
    /// as plain strings.
    pub fn message_texts(&self) -> Vec<String> {
        self.messages
            .iter()
            .map(|m| match m {
                FieldValue::Map(map) => {
                    let text = map.get("text").map(ToString::to_string).unwrap_or_default();
                    match map.get("type") {
                        Some(kind) => format!("{kind}: {text}"),
                        None => text,
                    }
                }
                other => other.to_string(),
            })
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// How a wait on a job ended without error.
#[derive(Debug, Clone)]
pub enum WaitOutcome {
    /// The job reached `DONE`; carries the final status entry.
    Done(Box<JobEntry>),
    /// The server reported no entries for the sid.
    NotFound,
}

impl WaitOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_job_response_top_level_sid() {
        let resp: CreateJobResponse = serde_json::from_str(r#"{"sid":"abc123"}"#).unwrap();
        assert_eq!(resp.into_sid().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_create_job_response_entry_sid() {
        let resp: CreateJobResponse =
            serde_json::from_str(r#"{"entry":[{"content":{"sid":"legacy-1"}}]}"#).unwrap();
        assert_eq!(resp.into_sid().as_deref(), Some("legacy-1"));
    }

    #[test]
    fn test_create_job_response_missing_sid() {
        let resp: CreateJobResponse = serde_json::from_str(r#"{"sid":""}"#).unwrap();
        assert!(resp.into_sid().is_none());
    }

    #[test]
    fn test_dispatch_state_parsing() {
        assert_eq!(DispatchState::from("DONE"), DispatchState::Done);
        assert_eq!(DispatchState::from("running"), DispatchState::Running);
        assert_eq!(
            DispatchState::from("INTERNAL_CANCEL"),
            DispatchState::Other("INTERNAL_CANCEL".to_string())
        );
        assert!(DispatchState::Done.is_done());
        assert!(!DispatchState::Finalizing.is_done());
        assert_eq!(DispatchState::Failed.to_string(), "FAILED");
    }

    #[test]
    fn test_dispatch_state_serde_round_trip_as_string() {
        let json = serde_json::to_string(&DispatchState::Paused).unwrap();
        assert_eq!(json, "\"PAUSED\"");
        let parsed: DispatchState = serde_json::from_str("\"PAUSED\"").unwrap();
        assert_eq!(parsed, DispatchState::Paused);
    }

    #[test]
    fn test_deserialize_status_document() {
        let json = r#"{
            "generator": {"build": "abc", "version": "9.1.0"},
            "entry": [{
                "name": "search * TEST",
                "id": "https://localhost:8089/services/search/jobs/abc123",
                "updated": "2024-01-01T00:00:00.000+00:00",
                "published": "2024-01-01T00:00:00.000+00:00",
                "author": "admin",
                "links": {"results": "/services/search/jobs/abc123/results"},
                "content": {
                    "sid": "abc123",
                    "dispatchState": "RUNNING",
                    "doneProgress": 0.42,
                    "eventCount": "1200",
                    "resultCount": 100,
                    "isDone": false,
                    "isFailed": "0",
                    "defaultTTL": "600",
                    "ttl": 597,
                    "priority": 5,
                    "messages": [{"type": "WARN", "text": "partial results"}],
                    "searchProviders": ["idx-1"]
                }
            }],
            "paging": {"total": 1, "perPage": 0, "offset": 0}
        }"#;
        let status: JobStatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(status.generator.version, "9.1.0");
        let entry = status.first_entry().unwrap();
        assert_eq!(entry.author, "admin");
        let content = &entry.content;
        assert_eq!(content.dispatch_state, DispatchState::Running);
        assert_eq!(content.event_count, 1200);
        assert_eq!(content.result_count, 100);
        assert_eq!(content.default_ttl, "600");
        assert_eq!(content.ttl, 597);
        assert!(!content.is_failed);
        assert_eq!(content.message_texts(), vec!["WARN: partial results".to_string()]);
        assert_eq!(content.search_providers, vec!["idx-1".to_string()]);
    }

    #[test]
    fn test_deserialize_empty_status_document() {
        let status: JobStatusResponse = serde_json::from_str(r#"{"entry":[]}"#).unwrap();
        assert!(status.first_entry().is_none());
    }
}
