//! REST API endpoint implementations.
//!
//! Endpoints are free functions over a shared `reqwest::Client`, the base URL
//! and the precomputed `Authorization` header. [`crate::SplunkClient`] wraps
//! them with its own state.

mod auth;
mod request;
pub mod search;
pub mod url_encoding;

pub use auth::verify_credentials;
pub(crate) use request::read_json;
pub use request::send_request;
pub use search::{
    control_job, create_job, delete_job, get_job, get_results_preview,
    update_concurrency_settings,
};
pub use url_encoding::encode_path_segment;
