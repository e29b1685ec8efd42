//! Schema-free search result records.
//!
//! A [`SearchResult`] is one row of search output: a map from field name to a
//! loosely-typed [`FieldValue`]. The set of fields depends entirely on the
//! query, so nothing here assumes a schema.
//!
//! Typed access is declarative: derive `Deserialize` on your own struct, map
//! Splunk field names with `#[serde(rename = "...")]`, pick lenient converters
//! from [`de`] where Splunk is loose about types, and call
//! [`SearchResult::decode`].
//!
//! ```rust,ignore
//! use serde::Deserialize;
//! use splunk_search_client::record::de;
//!
//! #[derive(Deserialize)]
//! struct Row {
//!     #[serde(rename = "host")]
//!     host: String,
//!     #[serde(rename = "count", deserialize_with = "de::i64_from_string_or_number")]
//!     count: i64,
//!     #[serde(rename = "_time", deserialize_with = "de::splunk_time")]
//!     time: chrono::DateTime<chrono::FixedOffset>,
//! }
//!
//! let row: Row = result.decode()?;
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ClientError, Result};

/// A single loosely-typed field value.
///
/// Splunk returns most values as strings, multivalue fields as arrays, and the
/// occasional number, boolean or nested object. Numbers keep their JSON form so
/// integers beyond 2^53 survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Borrow the value as a string slice if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value: numbers directly, strings when they parse.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => n.as_f64(),
            FieldValue::String(s) => s.trim().parse().ok().filter(|f: &f64| f.is_finite()),
            _ => None,
        }
    }

    /// Exact integer view: integral numbers and strings that parse as `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => n.as_i64(),
            FieldValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::String(s) => f.write_str(s),
            FieldValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            FieldValue::Map(map) => {
                let json = serde_json::to_string(map).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

/// Non-finite values have no JSON form and become [`FieldValue::Null`].
impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value).map_or(FieldValue::Null, FieldValue::Number)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value.into())
    }
}

/// One row of search output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResult(BTreeMap<String, FieldValue>);

impl SearchResult {
    pub fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Rendered value of a field, or an empty string when the field is absent.
    pub fn field_string(&self, field: &str) -> String {
        self.0.get(field).map(ToString::to_string).unwrap_or_default()
    }

    /// Numeric value of a field; numeric strings are parsed.
    pub fn field_f64(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(FieldValue::as_f64)
    }

    /// Integer value of a field, without passing through `f64`.
    pub fn field_i64(&self, field: &str) -> Option<i64> {
        self.0.get(field).and_then(FieldValue::as_i64)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, FieldValue> {
        self.0
    }

    /// Fill a caller-defined struct from this record.
    ///
    /// Fields missing from the record are left to the struct's serde defaults;
    /// a required field that is absent, or a value that cannot be converted,
    /// is an [`ClientError::InvalidResponse`].
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let value = serde_json::to_value(&self.0)?;
        serde_json::from_value(value)
            .map_err(|e| ClientError::InvalidResponse(format!("cannot decode search result: {e}")))
    }
}

impl FromIterator<(String, FieldValue)> for SearchResult {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for SearchResult {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Lenient field converters for use with `#[serde(deserialize_with = "...")]`.
///
/// The numeric converters are the same ones the job models use: `null` and
/// blank strings decode to zero, integers are parsed exactly, and values that
/// do not fit the target type are errors.
pub mod de {
    use chrono::{DateTime, FixedOffset};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub use crate::serde_helpers::{f64_from_string_or_number, i64_from_string_or_number};

    use super::FieldValue;

    /// Any value rendered as a string (`null` becomes `""`, lists are comma-joined).
    pub fn string_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(FieldValue::deserialize(deserializer)?.to_string())
    }

    /// A Splunk timestamp such as `_time`.
    pub fn splunk_time<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = string_from_any(deserializer)?;
        crate::time::parse_time(&raw)
            .map_err(|e| D::Error::custom(format!("cannot parse {raw:?} as a time: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    fn sample() -> SearchResult {
        serde_json::from_str(
            r#"{
                "host": "web-01",
                "count": "17",
                "avg": 2.5,
                "tags": ["a", "b"],
                "_time": "2024-03-05T10:11:12.345+00:00",
                "empty": null
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_field_value_variants() {
        let r = sample();
        assert_eq!(r.get("host"), Some(&FieldValue::from("web-01")));
        assert_eq!(r.get("avg"), Some(&FieldValue::from(2.5)));
        assert!(matches!(r.get("tags"), Some(FieldValue::List(items)) if items.len() == 2));
        assert!(r.get("empty").is_some_and(FieldValue::is_null));
        assert_eq!(r.len(), 6);
    }

    #[test]
    fn test_field_string_renders_values() {
        let r = sample();
        assert_eq!(r.field_string("host"), "web-01");
        assert_eq!(r.field_string("tags"), "a,b");
        assert_eq!(r.field_string("avg"), "2.5");
        assert_eq!(r.field_string("missing"), "");
        assert_eq!(r.field_string("empty"), "");
    }

    #[test]
    fn test_field_f64_parses_strings() {
        let r = sample();
        assert_eq!(r.field_f64("count"), Some(17.0));
        assert_eq!(r.field_f64("avg"), Some(2.5));
        assert_eq!(r.field_f64("host"), None);
    }

    #[test]
    fn test_whole_numbers_render_without_fraction() {
        let r: SearchResult = serde_json::from_str(r#"{"count": 100}"#).unwrap();
        assert_eq!(r.field_string("count"), "100");
        assert_eq!(FieldValue::from(100_i64).to_string(), "100");
    }

    #[test]
    fn test_large_integers_are_exact() {
        let r: SearchResult = serde_json::from_str(
            r#"{"bytes": 9007199254740993, "bytes_str": "9007199254740993"}"#,
        )
        .unwrap();
        assert_eq!(r.field_string("bytes"), "9007199254740993");
        assert_eq!(r.field_i64("bytes"), Some(9_007_199_254_740_993));
        assert_eq!(r.field_i64("bytes_str"), Some(9_007_199_254_740_993));
        assert_eq!(
            serde_json::to_string(&r).unwrap(),
            r#"{"bytes":9007199254740993,"bytes_str":"9007199254740993"}"#
        );
    }

    #[derive(Debug, Deserialize)]
    struct Bytes {
        #[serde(deserialize_with = "de::i64_from_string_or_number")]
        bytes: i64,
    }

    #[test]
    fn test_decode_large_integer_string_is_exact() {
        let r: SearchResult = [("bytes".to_string(), FieldValue::from("9007199254740993"))]
            .into_iter()
            .collect();
        let row: Bytes = r.decode().unwrap();
        assert_eq!(row.bytes, 9_007_199_254_740_993);
    }

    #[test]
    fn test_decode_out_of_range_integer_fails() {
        for raw in ["1e400", "1e19", "-1e19", "NaN"] {
            let r: SearchResult = [("bytes".to_string(), FieldValue::from(raw))]
                .into_iter()
                .collect();
            assert!(r.decode::<Bytes>().is_err(), "{raw} should not decode");
        }
    }

    #[test]
    fn test_decode_null_number_is_zero() {
        let r: SearchResult = serde_json::from_str(r#"{"bytes": null}"#).unwrap();
        let row: Bytes = r.decode().unwrap();
        assert_eq!(row.bytes, 0);
    }

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(rename = "host")]
        host: String,
        #[serde(rename = "count", deserialize_with = "de::i64_from_string_or_number")]
        count: i64,
        #[serde(rename = "avg", deserialize_with = "de::f64_from_string_or_number")]
        average: f64,
        #[serde(rename = "tags", deserialize_with = "de::string_from_any")]
        tags: String,
        #[serde(rename = "_time", deserialize_with = "de::splunk_time")]
        time: DateTime<FixedOffset>,
        #[serde(default)]
        absent: Option<String>,
    }

    #[test]
    fn test_decode_into_struct() {
        let row: Row = sample().decode().unwrap();
        assert_eq!(row.host, "web-01");
        assert_eq!(row.count, 17);
        assert_eq!(row.average, 2.5);
        assert_eq!(row.tags, "a,b");
        assert_eq!(row.time.timestamp_subsec_millis(), 345);
        assert!(row.absent.is_none());
    }

    #[test]
    fn test_decode_bad_number_is_invalid_response() {
        let r: SearchResult = [("count".to_string(), FieldValue::from("lots"))]
            .into_iter()
            .collect();

        #[derive(Debug, Deserialize)]
        struct Counted {
            #[serde(deserialize_with = "de::i64_from_string_or_number")]
            #[allow(dead_code)]
            count: i64,
        }

        let err = r.decode::<Counted>().unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
