//! `url` command: print the Splunk Web link for a job.
//!
//! Works offline: only the configured URLs are used, no credentials needed.

use anyhow::{Context, Result};
use splunk_search_client::job_browser_url;
use splunk_search_config::ConfigError;

pub fn run(base_url: Option<&str>, sid: &str, web_base_url: Option<&str>) -> Result<()> {
    let custom = web_base_url.map(str::trim).filter(|s| !s.is_empty());
    let api = match (base_url.map(str::trim).filter(|s| !s.is_empty()), custom) {
        (Some(api), _) => api,
        // With an explicit web URL the API URL is never consulted.
        (None, Some(_)) => "",
        (None, None) => return Err(ConfigError::MissingBaseUrl.into()),
    };

    let url = job_browser_url(api, sid, custom)
        .with_context(|| format!("Failed to build browser URL for job {sid}"))?;
    println!("{}", url);
    Ok(())
}
