//! Logging and OpenTelemetry tracing bootstrap.
//!
//! [`TracingConfig::init`] installs a `tracing-subscriber` registry with an
//! `EnvFilter` (`RUST_LOG`, default `info`), an optional stderr fmt layer and,
//! when an OTLP endpoint is configured, an OpenTelemetry layer exporting spans
//! over gRPC. Log output goes to stderr so stdout stays free for results.
//!
//! ```rust,ignore
//! use splunk_search_client::tracing::TracingConfig;
//!
//! let guard = TracingConfig::new()
//!     .with_service_name("splunk-search")
//!     .with_otlp_endpoint("http://localhost:4317")
//!     .init()?;
//! // ...
//! guard.shutdown();
//! ```

use std::collections::HashMap;
use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry::propagation::TextMapPropagator;
use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for log output and span export.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// OTLP gRPC endpoint (e.g. `http://localhost:4317`); `None` disables export.
    pub otlp_endpoint: Option<String>,
    pub service_name: String,
    pub service_version: String,
    /// Whether to write formatted log lines to stderr.
    pub enable_stdout: bool,
    /// Export timeout for the OTLP exporter.
    pub timeout: Duration,
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: None,
            service_name: "splunk-search".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            enable_stdout: true,
            timeout: Duration::from_secs(5),
            default_filter: "info".to_string(),
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    pub fn with_service_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    pub fn with_stdout(mut self, enable: bool) -> Self {
        self.enable_stdout = enable;
        self
    }

    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    /// Install the global subscriber.
    ///
    /// The returned guard must be kept alive until shutdown so buffered spans
    /// are flushed.
    ///
    /// # Errors
    /// Fails when the OTLP exporter cannot be built or a global subscriber is
    /// already installed.
    pub fn init(&self) -> Result<TracingGuard, TracingError> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.default_filter));

        let provider = self
            .otlp_endpoint
            .as_deref()
            .map(|endpoint| self.create_tracer_provider(endpoint))
            .transpose()?;

        let otel_layer = provider.as_ref().map(|provider| {
            tracing_opentelemetry::layer().with_tracer(provider.tracer(self.service_name.clone()))
        });
        let fmt_layer = self
            .enable_stdout
            .then(|| fmt::layer().with_writer(std::io::stderr));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(otel_layer)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TracingError::InitError(e.to_string()))?;

        Ok(TracingGuard { provider })
    }

    fn create_tracer_provider(&self, endpoint: &str) -> Result<SdkTracerProvider, TracingError> {
        use opentelemetry_otlp::{Protocol, WithExportConfig};
        use opentelemetry_sdk::trace::{BatchSpanProcessor, Sampler};

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .with_timeout(self.timeout)
            .with_protocol(Protocol::Grpc)
            .build()
            .map_err(|e| TracingError::InitError(e.to_string()))?;

        let resource = opentelemetry_sdk::Resource::builder()
            .with_attributes(vec![
                KeyValue::new("service.name", self.service_name.clone()),
                KeyValue::new("service.version", self.service_version.clone()),
            ])
            .build();

        Ok(SdkTracerProvider::builder()
            .with_span_processor(BatchSpanProcessor::builder(exporter).build())
            .with_resource(resource)
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
            .build())
    }
}

/// Keeps the tracer provider alive until shutdown.
pub struct TracingGuard {
    provider: Option<SdkTracerProvider>,
}

impl TracingGuard {
    /// Flush pending spans and stop the exporter.
    pub fn shutdown(&self) {
        if let Some(ref provider) = self.provider {
            let _ = provider.shutdown();
        }
    }
}

/// Errors that can occur during tracing initialization.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Failed to initialize tracing: {0}")]
    InitError(String),
}

/// Add W3C `traceparent` headers for the current span to an outgoing request.
///
/// Without an OpenTelemetry layer the span context is invalid and no header
/// is added.
pub fn inject_trace_context(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    let context = tracing::Span::current().context();
    let mut headers = HashMap::new();
    TraceContextPropagator::new().inject_context(&context, &mut headers);

    headers
        .into_iter()
        .fold(builder, |builder, (key, value)| builder.header(key, value))
}
