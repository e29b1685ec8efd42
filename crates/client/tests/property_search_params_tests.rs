//! Property-based tests for job creation parameters.
//!
//! # Invariants
//! - Exactly one `search` pair is present, equal to `"search " + query`
//! - Every other caller parameter survives unchanged
//! - Pairs come back in key order

use proptest::prelude::*;
use splunk_search_client::{JobParams, build_search_params};

fn params_strategy() -> impl Strategy<Value = JobParams> {
    prop::collection::btree_map("[a-z_]{1,12}", ".{0,20}", 0..8)
}

proptest! {
    #[test]
    fn search_param_is_injected_exactly_once(query in ".{0,60}", params in params_strategy()) {
        let built = build_search_params(&query, &params);

        let searches: Vec<&String> = built
            .iter()
            .filter(|(k, _)| k == "search")
            .map(|(_, v)| v)
            .collect();
        prop_assert_eq!(searches.len(), 1);
        prop_assert_eq!(searches[0], &format!("search {query}"));
    }

    #[test]
    fn other_params_are_preserved(query in ".{0,30}", params in params_strategy()) {
        let built = build_search_params(&query, &params);

        for (key, value) in params.iter().filter(|(k, _)| k.as_str() != "search") {
            prop_assert!(built.iter().any(|(k, v)| k == key && v == value));
        }
        let expected_len = params.len() + usize::from(!params.contains_key("search"));
        prop_assert_eq!(built.len(), expected_len);
    }

    #[test]
    fn pairs_are_sorted_by_key(query in ".{0,30}", params in params_strategy()) {
        let built = build_search_params(&query, &params);
        let keys: Vec<&String> = built.iter().map(|(k, _)| k).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }
}
