//! Common types shared across Splunk API models.
//!
//! This module contains the envelope pieces (`generator`, `paging`) and the
//! `messages` list that Splunk attaches to errors and result pages. It does
//! NOT contain resource-specific models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of message from Splunk API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MessageType {
    #[serde(rename = "FATAL")]
    Fatal,
    #[serde(rename = "ERROR")]
    Error,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "DEBUG")]
    Debug,
    /// Unknown or unrecognized message type.
    #[serde(other)]
    #[default]
    Unknown,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fatal => write!(f, "FATAL"),
            Self::Error => write!(f, "ERROR"),
            Self::Warn => write!(f, "WARN"),
            Self::Info => write!(f, "INFO"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A single message from Splunk.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SplunkMessage {
    #[serde(rename = "type", default)]
    pub message_type: MessageType,
    #[serde(default)]
    pub text: String,
}

impl fmt::Display for SplunkMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message_type, self.text)
    }
}

/// A collection of messages from Splunk.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SplunkMessages {
    #[serde(default)]
    pub messages: Vec<SplunkMessage>,
}

/// Server build information included in Atom-style responses.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Generator {
    #[serde(default)]
    pub build: String,
    #[serde(default)]
    pub version: String,
}

/// Paging block included in collection responses.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Paging {
    #[serde(default, deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub total: u64,
    #[serde(
        rename = "perPage",
        default,
        deserialize_with = "crate::serde_helpers::u64_from_string_or_number"
    )]
    pub per_page: u64,
    #[serde(default, deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub offset: u64,
}
