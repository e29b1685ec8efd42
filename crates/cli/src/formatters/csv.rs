//! CSV formatter implementation.
//!
//! The column set is fixed by the first record (field names in sorted order).
//! Later records fill those columns; fields they lack are left empty and fields
//! the first record lacked are dropped with a warning, once per field name.
//! Multivalue fields are comma-joined.

use std::collections::BTreeSet;
use std::io::Write;

use anyhow::Result;
use splunk_search_client::SearchResult;
use tracing::warn;

use super::RecordWriter;

pub struct CsvRecordWriter<W: Write> {
    writer: csv::Writer<W>,
    columns: Option<Vec<String>>,
    dropped: BTreeSet<String>,
}

impl<W: Write> CsvRecordWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
            columns: None,
            dropped: BTreeSet::new(),
        }
    }
}

impl<W: Write> RecordWriter for CsvRecordWriter<W> {
    fn write_record(&mut self, record: &SearchResult) -> Result<()> {
        let columns = match &mut self.columns {
            Some(columns) => columns,
            slot @ None => {
                let header: Vec<String> = record.iter().map(|(name, _)| name.clone()).collect();
                self.writer.write_record(&header)?;
                slot.insert(header)
            }
        };

        for (name, _) in record.iter() {
            if columns.binary_search(name).is_err() && self.dropped.insert(name.clone()) {
                warn!(
                    field = %name,
                    "Field is not in the CSV header (taken from the first record); its values are dropped"
                );
            }
        }

        let row: Vec<String> = columns.iter().map(|c| record.field_string(c)).collect();
        self.writer.write_record(&row)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> SearchResult {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), (*v).into()))
            .collect()
    }

    #[test]
    fn test_late_fields_are_tracked_once() {
        let mut writer = CsvRecordWriter::new(Vec::new());
        writer.write_record(&record(&[("host", "a")])).unwrap();
        writer
            .write_record(&record(&[("host", "b"), ("status", "200")]))
            .unwrap();
        writer
            .write_record(&record(&[("status", "404"), ("user", "x")]))
            .unwrap();

        let dropped: Vec<&str> = writer.dropped.iter().map(String::as_str).collect();
        assert_eq!(dropped, vec!["status", "user"]);
    }

    #[test]
    fn test_sparse_first_record_keeps_header() {
        let mut buf = Vec::new();
        {
            let mut writer = CsvRecordWriter::new(&mut buf);
            writer.write_record(&record(&[("host", "a")])).unwrap();
            writer
                .write_record(&record(&[("host", "b"), ("status", "200")]))
                .unwrap();
            writer.finish().unwrap();
        }

        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "host\na\nb\n");
    }
}
