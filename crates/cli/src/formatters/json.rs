//! JSON array writer.
//!
//! Invariants:
//! - The output is one valid JSON array once `finish` has run, even with zero records.

use std::io::Write;

use anyhow::Result;
use splunk_search_client::SearchResult;

use super::RecordWriter;

pub struct JsonRecordWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> JsonRecordWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }
}

impl<W: Write> RecordWriter for JsonRecordWriter<W> {
    fn write_record(&mut self, record: &SearchResult) -> Result<()> {
        let sep = if self.written == 0 { "[\n  " } else { ",\n  " };
        self.out.write_all(sep.as_bytes())?;
        serde_json::to_writer(&mut self.out, record)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let tail = if self.written == 0 { "[]\n" } else { "\n]\n" };
        self.out.write_all(tail.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
