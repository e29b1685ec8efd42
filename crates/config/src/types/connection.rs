//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeout).
//! - Define the main `Config` structure combining connection, auth and search cadence.
//! - Provide convenience constructors for common config patterns.
//!
//! Does NOT handle:
//! - Configuration loading from env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as whole seconds or milliseconds, never as structs.
//! - `Config::default()` targets a local development instance (localhost:8089).

use crate::constants::{DEFAULT_SPLUNK_PORT, DEFAULT_TIMEOUT_SECS};
use crate::types::auth::{AuthConfig, AuthStrategy};
use crate::types::search::SearchConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for the Splunk management endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the Splunk management port (e.g., https://localhost:8089)
    pub base_url: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Per-request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Job polling and result streaming cadence
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for Config {
    /// Local development defaults: `https://localhost:8089` with `admin`/`changeme`.
    ///
    /// These credentials are Splunk's out-of-the-box defaults and are only
    /// appropriate for throwaway local instances.
    fn default() -> Self {
        Self {
            connection: ConnectionConfig {
                base_url: format!("https://localhost:{}", DEFAULT_SPLUNK_PORT),
                skip_verify: false,
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
            auth: AuthConfig {
                strategy: AuthStrategy::Basic {
                    username: "admin".to_string(),
                    password: SecretString::new("changeme".to_string().into()),
                },
            },
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    /// Create a new config with the specified base URL and API token.
    pub fn with_api_token(base_url: String, token: SecretString) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url,
                ..Self::default().connection
            },
            auth: AuthConfig {
                strategy: AuthStrategy::ApiToken { token },
            },
            search: SearchConfig::default(),
        }
    }

    /// Create a new config with username/password authentication.
    pub fn with_basic_auth(base_url: String, username: String, password: SecretString) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url,
                ..Self::default().connection
            },
            auth: AuthConfig {
                strategy: AuthStrategy::Basic { username, password },
            },
            search: SearchConfig::default(),
        }
    }

    /// Returns true when the config still carries Splunk's factory credentials.
    pub fn is_using_default_credentials(&self) -> bool {
        use secrecy::ExposeSecret;

        matches!(
            &self.auth.strategy,
            AuthStrategy::Basic { username, password }
                if username == "admin" && password.expose_secret() == "changeme"
        )
    }
}
