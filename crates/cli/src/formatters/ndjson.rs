//! NDJSON formatter implementation.
//!
//! Invariants:
//! - Each line is a valid JSON object
//! - Records are written as they arrive; nothing is buffered across records

use std::io::Write;

use anyhow::Result;
use splunk_search_client::SearchResult;

use super::RecordWriter;

pub struct NdjsonRecordWriter<W: Write> {
    out: W,
}

impl<W: Write> NdjsonRecordWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RecordWriter for NdjsonRecordWriter<W> {
    fn write_record(&mut self, record: &SearchResult) -> Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
