//! Authentication types for Splunk search configuration.
//!
//! Responsibilities:
//! - Define authentication strategies (basic credentials, API token).
//! - Handle serialization of secret values.
//!
//! Does NOT handle:
//! - Computing the `Authorization` header (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Strategy for authenticating with Splunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthStrategy {
    /// Username and password sent as HTTP basic credentials on every request.
    #[serde(rename = "basic")]
    Basic {
        username: String,
        #[serde(with = "secret_string")]
        password: SecretString,
    },
    /// API token (bearer token authentication).
    #[serde(rename = "token")]
    ApiToken {
        #[serde(with = "secret_string")]
        token: SecretString,
    },
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The authentication strategy to use.
    #[serde(flatten)]
    pub strategy: AuthStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_basic_strategy_round_trips_through_json() {
        let config = AuthConfig {
            strategy: AuthStrategy::Basic {
                username: "admin".to_string(),
                password: SecretString::new("changeme".to_string().into()),
            },
        };

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "basic");
        assert_eq!(json["username"], "admin");

        let parsed: AuthConfig = serde_json::from_value(json).unwrap();
        match parsed.strategy {
            AuthStrategy::Basic { username, password } => {
                assert_eq!(username, "admin");
                assert_eq!(password.expose_secret(), "changeme");
            }
            AuthStrategy::ApiToken { .. } => panic!("expected basic strategy"),
        }
    }

    #[test]
    fn test_debug_output_redacts_token() {
        let strategy = AuthStrategy::ApiToken {
            token: SecretString::new("super-secret".to_string().into()),
        };
        let debug = format!("{:?}", strategy);
        assert!(!debug.contains("super-secret"));
    }
}
