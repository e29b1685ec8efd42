//! Timestamp formatting and parsing for Splunk parameters and results.
//!
//! Time-bound request parameters (`earliest_time`, `latest_time`, ...) are sent
//! as UTC wall-clock timestamps without an offset. Result timestamps such as
//! `_time` come back with milliseconds and an explicit offset.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// Format Splunk expects for absolute time parameters.
pub const SPLUNK_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format Splunk emits for `_time` and similar result fields.
const SPLUNK_RESULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Format a timestamp for use as a time-bound search parameter.
///
/// The value is converted to UTC and rendered without fractional seconds or offset.
pub fn format_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    time.with_timezone(&Utc)
        .format(SPLUNK_TIME_FORMAT)
        .to_string()
}

/// Parse a timestamp returned by Splunk.
///
/// Accepts RFC 3339 (with or without fractional seconds) and Splunk's
/// `2024-01-02T03:04:05.678+01:00` result form.
pub fn parse_time(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, SPLUNK_RESULT_TIME_FORMAT))
}
