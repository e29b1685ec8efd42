//! Prometheus exposition of the metrics recorded by [`crate::metrics`].
//!
//! ```rust,ignore
//! use splunk_search_client::metrics_exporter::MetricsExporter;
//!
//! let exporter = MetricsExporter::install("127.0.0.1:9090")?;
//! ```

use std::net::SocketAddr;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use tracing::info;

use crate::metrics::METRIC_REQUEST_DURATION;

/// Histogram buckets for request latency, in seconds.
const REQUEST_DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
];

/// Installs a global Prometheus recorder serving `/metrics` over HTTP.
pub struct MetricsExporter {
    bind_addr: SocketAddr,
}

impl MetricsExporter {
    /// Install the exporter as the process-wide recorder.
    ///
    /// `bind_addr` must be an `ip:port` pair; host names are not resolved.
    ///
    /// # Errors
    /// Fails when the address does not parse, a recorder is already installed,
    /// or the listener cannot be built.
    pub fn install(bind_addr: &str) -> Result<Self, MetricsExporterError> {
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| MetricsExporterError::InvalidBindAddress(bind_addr.to_string(), e))?;

        PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(METRIC_REQUEST_DURATION.to_string()),
                REQUEST_DURATION_BUCKETS,
            )?
            .with_http_listener(addr)
            .install()
            .map_err(|e| match e {
                metrics_exporter_prometheus::BuildError::FailedToSetGlobalRecorder(_) => {
                    MetricsExporterError::RecorderAlreadyInstalled
                }
                other => MetricsExporterError::BuildError(other.to_string()),
            })?;

        info!("Prometheus metrics exporter listening on http://{}/metrics", addr);

        Ok(Self { bind_addr: addr })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Errors that can occur when installing the metrics exporter.
#[derive(Debug, thiserror::Error)]
pub enum MetricsExporterError {
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),

    #[error("A metrics recorder is already installed")]
    RecorderAlreadyInstalled,

    #[error("Failed to build Prometheus recorder: {0}")]
    BuildError(String),
}

impl From<metrics_exporter_prometheus::BuildError> for MetricsExporterError {
    fn from(err: metrics_exporter_prometheus::BuildError) -> Self {
        MetricsExporterError::BuildError(err.to_string())
    }
}
