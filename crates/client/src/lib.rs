//! Splunk search job client.
//!
//! This crate submits searches to the Splunk REST API as asynchronous jobs,
//! polls them until they finish, streams their (possibly still changing)
//! preview results page by page, and sends lifecycle commands to them.
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use splunk_search_client::{CancellationToken, JobParams, SplunkClient};
//!
//! let client = SplunkClient::builder().from_config(&config).build().await?;
//! let job = client.create_search_job("index=_internal | head 10", &JobParams::new()).await?;
//! let cancel = CancellationToken::new();
//! job.wait(&cancel).await?;
//! let mut records = job.results(cancel);
//! while let Some(record) = records.next().await {
//!     println!("{}", record.field_string("_raw"));
//! }
//! ```

mod auth;
pub mod cancellation;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod job;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod record;
mod serde_helpers;
pub mod stream;
pub mod time;
pub mod tracing;

pub use auth::AuthStrategy;
pub use cancellation::CancellationToken;
pub use client::SplunkClient;
pub use client::builder::SplunkClientBuilder;
pub use client::{JobParams, build_search_params};
pub use error::{ClientError, Result};
pub use job::{SearchJob, job_browser_url};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{
    ConcurrencySettings, ControlCommand, DispatchState, FieldDescriptor, JobEntry,
    JobStatusResponse, ResultsPage, SearchContent, WaitOutcome,
};
pub use record::{FieldValue, SearchResult};
pub use stream::{ResultStream, StreamEnd};
pub use self::tracing::{TracingConfig, TracingError, TracingGuard};
pub use time::{format_time, parse_time};
