//! splunk-search - command-line surface over the Splunk search job client.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Install logging, optional span export and optional Prometheus metrics.
//! - Run one job command and translate its outcome into an exit code.
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap defaults.
//! - Records go to stdout; logs and diagnostics go to stderr.

mod args;
mod cancellation;
mod commands;
mod dispatch;
mod error;
mod formatters;

use args::Cli;
use cancellation::{cancel_on_ctrl_c, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use splunk_search_client::{CancellationToken, MetricsCollector, MetricsExporter, TracingConfig};
use splunk_search_config::ConfigLoader;

#[tokio::main]
async fn main() {
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    let mut tracing_config = TracingConfig::new()
        .with_service_name("splunk-search")
        .with_default_filter("warn");
    if let Some(ref endpoint) = cli.otlp_endpoint {
        tracing_config = tracing_config.with_otlp_endpoint(endpoint);
    }
    let tracing_guard = match tracing_config.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    let _metrics_exporter = if let Some(ref bind_addr) = cli.metrics_bind {
        match MetricsExporter::install(bind_addr) {
            Ok(exporter) => {
                tracing::info!("Metrics exporter started on http://{}/metrics", bind_addr);
                Some(exporter)
            }
            Err(e) => {
                eprintln!("Failed to start metrics exporter: {}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        None
    };
    let metrics = cli.metrics_bind.as_ref().map(|_| MetricsCollector::new());

    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    let exit_code = match run_command(cli, metrics, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    tracing_guard.shutdown();
    std::process::exit(exit_code.as_i32());
}
