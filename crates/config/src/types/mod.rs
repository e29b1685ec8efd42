//! Configuration types.
//!
//! - `auth`: authentication strategies and secret handling
//! - `connection`: connection settings and the top-level `Config`
//! - `search`: job polling and result streaming cadence

pub mod auth;
pub mod connection;
pub mod search;

pub use auth::{AuthConfig, AuthStrategy};
pub use connection::{Config, ConnectionConfig};
pub use search::SearchConfig;
