//! Search job submission.

use std::collections::BTreeMap;

use tracing::info;

use crate::client::SplunkClient;
use crate::endpoints;
use crate::endpoints::search::jobs::redact_query;
use crate::error::Result;
use crate::job::SearchJob;

/// Extra form parameters for job creation (`earliest_time`, `exec_mode`, ...).
///
/// A `search` key, if present, is always replaced by the submitted query.
pub type JobParams = BTreeMap<String, String>;

/// Prefix Splunk requires in front of a plain query.
const SEARCH_COMMAND_PREFIX: &str = "search ";

/// Build the form body of a job creation request.
///
/// The caller's parameters are copied and exactly one `search` pair is set to
/// `"search " + query`. Pairs come back in key order.
pub fn build_search_params(query: &str, params: &JobParams) -> Vec<(String, String)> {
    let mut merged = params.clone();
    merged.insert(
        "search".to_string(),
        format!("{SEARCH_COMMAND_PREFIX}{query}"),
    );
    merged.into_iter().collect()
}

impl SplunkClient {
    /// Submit `query` as a new search job.
    ///
    /// Succeeds only on HTTP 201. The returned handle shares this client's
    /// connection pool.
    pub async fn create_search_job(&self, query: &str, params: &JobParams) -> Result<SearchJob> {
        let form = build_search_params(query, params);
        let sid = endpoints::create_job(
            &self.http,
            &self.base_url,
            &self.auth_header,
            &form,
            self.metrics(),
        )
        .await?;

        info!(sid = %sid, query = %redact_query(query), "Created search job");
        Ok(SearchJob::attach(self.clone(), sid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injects_search_parameter() {
        let params = build_search_params("* TEST", &JobParams::new());
        assert_eq!(params, vec![("search".to_string(), "search * TEST".to_string())]);
    }

    #[test]
    fn test_caller_search_key_is_replaced() {
        let mut extra = JobParams::new();
        extra.insert("search".to_string(), "| delete".to_string());
        extra.insert("earliest_time".to_string(), "-1h".to_string());
        extra.insert("exec_mode".to_string(), "normal".to_string());

        let params = build_search_params("index=main", &extra);

        assert_eq!(
            params,
            vec![
                ("earliest_time".to_string(), "-1h".to_string()),
                ("exec_mode".to_string(), "normal".to_string()),
                ("search".to_string(), "search index=main".to_string()),
            ]
        );
    }

    #[test]
    fn test_caller_params_are_not_modified() {
        let mut extra = JobParams::new();
        extra.insert("max_count".to_string(), "10".to_string());
        let _ = build_search_params("x", &extra);
        assert_eq!(extra.len(), 1);
        assert!(!extra.contains_key("search"));
    }
}
