//! Command dispatch logic.
//!
//! Responsibilities:
//! - Build the configuration and a verified client for commands that need one.
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Invariants:
//! - `url` never builds a client and never needs credentials.
//! - Every other command verifies credentials once, before doing anything else.

use std::time::Duration;

use anyhow::{Context, Result};
use splunk_search_client::{CancellationToken, ConcurrencySettings, MetricsCollector, SplunkClient};
use splunk_search_config::{Config, ConfigLoader};
use tracing::{debug, warn};

use crate::args::{Cli, Commands};
use crate::commands;
use crate::commands::control::ControlArgs;

/// Layer `.env`-loaded environment, then CLI flags, into a validated config.
pub(crate) fn build_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new()
        .from_env()
        .context("Failed to load configuration from environment")?;

    if let Some(ref url) = cli.base_url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(ref username) = cli.username {
        loader = loader.with_username(username.clone());
    }
    if let Some(ref password) = cli.password {
        loader = loader.with_password(password.clone());
    }
    if let Some(ref token) = cli.api_token {
        loader = loader.with_api_token(token.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }

    let config = loader.build().context("Failed to build configuration")?;
    if config.is_using_default_credentials() {
        warn!(
            "Using default Splunk credentials (admin/changeme). \
             These are for local development only."
        );
    }
    Ok(config)
}

async fn connect(config: &Config, metrics: Option<MetricsCollector>) -> Result<SplunkClient> {
    let mut builder = SplunkClient::builder().from_config(config);
    if let Some(metrics) = metrics {
        builder = builder.metrics(metrics);
    }
    let client = builder.build().await?;
    debug!(base_url = client.base_url(), "Connected");
    Ok(client)
}

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(
    cli: Cli,
    metrics: Option<MetricsCollector>,
    cancel: &CancellationToken,
) -> Result<()> {
    if let Commands::Url { sid, web_base_url } = &cli.command {
        return commands::url::run(cli.base_url.as_deref(), sid, web_base_url.as_deref());
    }

    let config = build_config(&cli)?;
    let client = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(splunk_search_client::ClientError::Cancelled.into()),
        client = connect(&config, metrics) => client?,
    };
    let format = cli.output;

    match cli.command {
        Commands::Submit {
            query,
            params,
            wait,
            stream,
        } => commands::submit::run(&client, &query, params, wait, stream, format, cancel).await,
        Commands::Status { sid } => commands::status::run(&client, &sid, format, cancel).await,
        Commands::Wait { sid } => commands::wait::run(&client, &sid, format, cancel).await,
        Commands::Results { sid } => commands::results::run(&client, &sid, format, cancel).await,
        Commands::Control {
            sid,
            action,
            ttl,
            priority,
            workload_pool,
        } => {
            let args = ControlArgs {
                action,
                ttl,
                priority,
                workload_pool,
            };
            commands::control::run(&client, &sid, args, cancel).await
        }
        Commands::Delete { sid } => commands::delete::run(&client, &sid, cancel).await,
        Commands::Concurrency {
            max_searches_perc,
            auto_summary_perc,
        } => {
            let settings = ConcurrencySettings {
                max_searches_perc,
                auto_summary_perc,
            };
            commands::concurrency::run(&client, settings, cancel).await
        }
        Commands::Url { .. } => Ok(()),
    }
}
