//! Result page models for `results_preview`.

use serde::{Deserialize, Serialize};

use super::common::SplunkMessage;
use crate::record::SearchResult;

/// One page of results.
///
/// `preview == true` means the job is still running and the page may later change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsPage {
    #[serde(default, deserialize_with = "crate::serde_helpers::bool_from_any")]
    pub preview: bool,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::u64_from_string_or_number"
    )]
    pub init_offset: u64,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub messages: Vec<SplunkMessage>,
}

impl ResultsPage {
    /// A page that is empty and final means the result set is exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.results.is_empty() && !self.preview
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// Describes one output column.
///
/// Newer servers send `{"name": "...", ...}` objects, older ones bare strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFieldDescriptor")]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groupby_rank: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldDescriptor {
    Name(String),
    Object {
        name: String,
        #[serde(default, deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
        groupby_rank: String,
    },
}

impl From<RawFieldDescriptor> for FieldDescriptor {
    fn from(raw: RawFieldDescriptor) -> Self {
        match raw {
            RawFieldDescriptor::Name(name) => Self {
                name,
                groupby_rank: None,
            },
            RawFieldDescriptor::Object { name, groupby_rank } => Self {
                name,
                groupby_rank: Some(groupby_rank).filter(|r| !r.is_empty()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_preview_page() {
        let json = r#"{
            "preview": true,
            "init_offset": 0,
            "messages": [{"type": "INFO", "text": "Your timerange was substituted"}],
            "fields": [{"name": "host"}, {"name": "count", "groupby_rank": "0"}],
            "results": [{"host": "a", "count": "1"}, {"host": "b", "count": "2"}]
        }"#;
        let page: ResultsPage = serde_json::from_str(json).unwrap();
        assert!(page.preview);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.field_names().collect::<Vec<_>>(), vec!["host", "count"]);
        assert_eq!(page.fields[1].groupby_rank.as_deref(), Some("0"));
        assert_eq!(page.messages.len(), 1);
        assert!(!page.is_exhausted());
    }

    #[test]
    fn test_legacy_string_fields() {
        let page: ResultsPage =
            serde_json::from_str(r#"{"preview": false, "fields": ["_raw", "_time"], "results": []}"#)
                .unwrap();
        assert_eq!(page.field_names().collect::<Vec<_>>(), vec!["_raw", "_time"]);
        assert!(page.is_exhausted());
    }

    #[test]
    fn test_empty_preview_is_not_exhausted() {
        let page: ResultsPage = serde_json::from_str(r#"{"preview": true, "results": []}"#).unwrap();
        assert!(!page.is_exhausted());
    }

    #[test]
    fn test_missing_results_decode_as_empty() {
        let page: ResultsPage = serde_json::from_str(r#"{"preview": false}"#).unwrap();
        assert!(page.results.is_empty());
        assert!(page.is_exhausted());
    }
}
