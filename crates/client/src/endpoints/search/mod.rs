//! Search endpoints.
//!
//! # What this module handles:
//! - Job creation, status, deletion and control
//! - Preview result pages
//! - Scheduler concurrency settings
//!
//! # What this module does NOT handle:
//! - Polling and streaming (see [`crate::client`] and [`crate::stream`])

pub mod concurrency;
pub mod jobs;
pub mod results;

pub use concurrency::update_concurrency_settings;
pub use jobs::{control_job, create_job, delete_job, get_job};
pub use results::get_results_preview;
