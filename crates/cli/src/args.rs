//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read connection flags from the same `SPLUNK_*` variables the config loader uses.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not validate connection settings (see `ConfigLoader::build`).

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "splunk-search")]
#[command(about = "Submit, watch and stream Splunk search jobs", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  splunk-search submit 'index=main | head 10' --wait --stream\n  splunk-search status 1700000000.42\n  splunk-search results 1700000000.42 -o csv\n  splunk-search control 1700000000.42 setttl --ttl 600\n  splunk-search url 1700000000.42 --web-base-url https://splunk.example.com\n"
)]
pub struct Cli {
    /// Base URL of the Splunk management API (e.g., https://localhost:8089)
    #[arg(short, long, global = true, env = "SPLUNK_BASE_URL")]
    pub base_url: Option<String>,

    /// Username for basic authentication
    #[arg(short, long, global = true, env = "SPLUNK_USERNAME")]
    pub username: Option<String>,

    /// Password for basic authentication
    #[arg(short, long, global = true, env = "SPLUNK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API token for authentication (preferred over username/password)
    #[arg(short, long, global = true, env = "SPLUNK_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "SPLUNK_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "SPLUNK_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Output format for records and job summaries
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// OTLP gRPC endpoint for exporting spans (e.g., http://localhost:4317)
    #[arg(long, global = true, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Serve Prometheus metrics on this address (e.g., 127.0.0.1:9090)
    #[arg(long, global = true, env = "SPLUNK_METRICS_BIND", value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output formats understood by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A single JSON document
    Json,
    /// One JSON object per line
    #[value(alias = "jsonl")]
    Ndjson,
    /// Comma-separated values with a header row
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a search job and print its sid
    Submit {
        /// The search query, without the leading `search` keyword
        query: String,

        /// Extra job parameter (repeatable), e.g. --param earliest_time=-1h
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        /// Wait for the job to finish
        #[arg(long)]
        wait: bool,

        /// Stream the job's records to stdout
        #[arg(long)]
        stream: bool,
    },

    /// Show a job's dispatch state and counts
    Status {
        /// Search job id
        sid: String,
    },

    /// Wait until a job is done
    Wait {
        /// Search job id
        sid: String,
    },

    /// Stream a job's records to stdout
    Results {
        /// Search job id
        sid: String,
    },

    /// Send a control action to a job
    Control {
        /// Search job id
        sid: String,

        /// pause, unpause, finalize, cancel, touch, setttl, setpriority,
        /// enablepreview, disablepreview or setworkloadpool
        action: String,

        /// New time-to-live in seconds (with setttl)
        #[arg(long)]
        ttl: Option<u64>,

        /// New priority, 0 to 10 (with setpriority)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        priority: Option<u8>,

        /// Target workload pool (with setworkloadpool)
        #[arg(long)]
        workload_pool: Option<String>,
    },

    /// Delete a job
    Delete {
        /// Search job id
        sid: String,
    },

    /// Update scheduler concurrency limits
    Concurrency {
        /// Share of the search limit available to scheduled searches
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        max_searches_perc: Option<u32>,

        /// Share of scheduled searches available to auto-summarization
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        auto_summary_perc: Option<u32>,
    },

    /// Print the Splunk Web URL of a job without contacting the server
    Url {
        /// Search job id
        sid: String,

        /// Splunk Web base URL; defaults to the API URL without its port
        #[arg(long, env = "SPLUNK_WEB_URL")]
        web_base_url: Option<String>,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("parameter name is empty in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("earliest_time=-1h").unwrap(),
            ("earliest_time".to_string(), "-1h".to_string())
        );
        assert_eq!(
            parse_key_value("search_filter=a=b").unwrap(),
            ("search_filter".to_string(), "a=b".to_string())
        );
        assert!(parse_key_value("no-equals").is_err());
        assert!(parse_key_value("=value").is_err());
    }

    #[test]
    fn test_submit_collects_params() {
        let cli = Cli::try_parse_from([
            "splunk-search",
            "submit",
            "* TEST",
            "--param",
            "earliest_time=-1h",
            "--param",
            "exec_mode=normal",
            "--wait",
        ])
        .unwrap();

        match cli.command {
            Commands::Submit {
                query,
                params,
                wait,
                stream,
            } => {
                assert_eq!(query, "* TEST");
                assert_eq!(params.len(), 2);
                assert!(wait);
                assert!(!stream);
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn test_priority_range() {
        assert!(
            Cli::try_parse_from(["splunk-search", "control", "abc", "setpriority", "--priority", "11"])
                .is_err()
        );
    }
}
