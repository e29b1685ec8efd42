//! Job control verbs and scheduler concurrency settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle verb sent to `/services/search/jobs/{sid}/control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlCommand {
    Pause,
    Unpause,
    Finalize,
    Cancel,
    Touch,
    #[serde(rename = "setttl")]
    SetTtl,
    SetPriority,
    EnablePreview,
    DisablePreview,
    SetWorkloadPool,
}

impl ControlCommand {
    pub const ALL: [ControlCommand; 10] = [
        Self::Pause,
        Self::Unpause,
        Self::Finalize,
        Self::Cancel,
        Self::Touch,
        Self::SetTtl,
        Self::SetPriority,
        Self::EnablePreview,
        Self::DisablePreview,
        Self::SetWorkloadPool,
    ];

    /// The `action` value Splunk expects.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::Finalize => "finalize",
            Self::Cancel => "cancel",
            Self::Touch => "touch",
            Self::SetTtl => "setttl",
            Self::SetPriority => "setpriority",
            Self::EnablePreview => "enablepreview",
            Self::DisablePreview => "disablepreview",
            Self::SetWorkloadPool => "setworkloadpool",
        }
    }

    /// Name of the extra form parameter this verb takes, if any.
    pub const fn argument_name(&self) -> Option<&'static str> {
        match self {
            Self::SetTtl => Some("ttl"),
            Self::SetPriority => Some("priority"),
            Self::SetWorkloadPool => Some("workload_pool"),
            _ => None,
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown control verb.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown control command '{0}' (expected one of: pause, unpause, finalize, cancel, touch, setttl, setpriority, enablepreview, disablepreview, setworkloadpool)")]
pub struct UnknownControlCommand(pub String);

impl FromStr for ControlCommand {
    type Err = UnknownControlCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| UnknownControlCommand(s.to_string()))
    }
}

/// Scheduler-wide concurrency limits.
///
/// `None` leaves the server value untouched; `Some(0)` sets it to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcurrencySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_searches_perc: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_summary_perc: Option<u32>,
}

impl ConcurrencySettings {
    /// Form parameters for the fields that were explicitly set.
    pub fn to_form_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(v) = self.max_searches_perc {
            params.push(("max_searches_perc", v.to_string()));
        }
        if let Some(v) = self.auto_summary_perc {
            params.push(("auto_summary_perc", v.to_string()));
        }
        params
    }
}
