//! Data models for Splunk search API responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod common;
pub mod control;
pub mod jobs;
pub mod results;

pub use common::{Generator, MessageType, Paging, SplunkMessage, SplunkMessages};
pub use control::{ConcurrencySettings, ControlCommand, UnknownControlCommand};
pub use jobs::{
    CreateJobResponse, DispatchState, JobEntry, JobStatusResponse, SearchContent, WaitOutcome,
};
pub use results::{FieldDescriptor, ResultsPage};
