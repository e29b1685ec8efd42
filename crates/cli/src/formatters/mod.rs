//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Render job summaries in every supported output format.
//! - Write result records incrementally as they arrive from a `ResultStream`.
//!
//! Does NOT handle:
//! - Fetching records or deciding when a stream is complete (see `commands`).
//!
//! ## Empty-State Handling
//!
//! | Format | No records |
//! |--------|------------|
//! | JSON   | `[]`       |
//! | NDJSON | nothing    |
//! | CSV    | nothing (the header comes from the first record) |

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use splunk_search_client::{JobEntry, SearchResult};

pub use crate::args::OutputFormat;

mod csv;
mod json;
mod ndjson;

pub use self::csv::CsvRecordWriter;
pub use self::json::JsonRecordWriter;
pub use self::ndjson::NdjsonRecordWriter;

/// Condensed view of a job's status document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSummary {
    pub sid: String,
    pub dispatch_state: String,
    pub done_progress: f64,
    pub event_count: u64,
    pub result_count: u64,
    pub messages: Vec<String>,
}

impl From<&JobEntry> for JobSummary {
    fn from(entry: &JobEntry) -> Self {
        let content = &entry.content;
        Self {
            sid: content.sid.clone(),
            dispatch_state: content.dispatch_state.to_string(),
            done_progress: content.done_progress,
            event_count: content.event_count,
            result_count: content.result_count,
            messages: content.message_texts(),
        }
    }
}

/// Render a job summary as a complete document.
pub fn format_job_summary(format: OutputFormat, summary: &JobSummary) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)? + "\n"),
        OutputFormat::Ndjson => Ok(serde_json::to_string(summary)? + "\n"),
        OutputFormat::Csv => {
            let mut writer = ::csv::Writer::from_writer(Vec::new());
            writer.write_record([
                "sid",
                "dispatch_state",
                "done_progress",
                "event_count",
                "result_count",
                "messages",
            ])?;
            writer.write_record([
                summary.sid.clone(),
                summary.dispatch_state.clone(),
                summary.done_progress.to_string(),
                summary.event_count.to_string(),
                summary.result_count.to_string(),
                summary.messages.join("; "),
            ])?;
            let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e.error()))?;
            Ok(String::from_utf8(bytes)?)
        }
    }
}

/// Incremental writer for search result records.
pub trait RecordWriter {
    fn write_record(&mut self, record: &SearchResult) -> Result<()>;

    /// Close the document and flush the underlying writer.
    fn finish(&mut self) -> Result<()>;
}

/// Build the record writer for `format` on top of `out`.
pub fn record_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    out: W,
) -> Box<dyn RecordWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonRecordWriter::new(out)),
        OutputFormat::Ndjson => Box::new(NdjsonRecordWriter::new(out)),
        OutputFormat::Csv => Box::new(CsvRecordWriter::new(out)),
    }
}
