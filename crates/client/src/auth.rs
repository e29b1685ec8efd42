//! Authentication strategies and the precomputed credential header.
//!
//! The `Authorization` header is derived once when the client is built and
//! attached unchanged to every request for the client's lifetime. There is no
//! session login, renewal or rotation.

use base64::Engine;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{ClientError, Result};

/// Strategy for authenticating with Splunk.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Username and password, sent as HTTP basic credentials.
    Basic {
        username: String,
        password: SecretString,
    },
    /// API token (bearer token authentication).
    ApiToken { token: SecretString },
}

impl AuthStrategy {
    /// Build the `Authorization` header value for this strategy.
    ///
    /// The returned value is marked sensitive so it is redacted from
    /// `Debug` output of requests and headers.
    pub fn authorization_header(&self) -> Result<HeaderValue> {
        let raw = match self {
            AuthStrategy::Basic { username, password } => {
                let credentials = format!("{}:{}", username, password.expose_secret());
                format!(
                    "Basic {}",
                    base64::engine::general_purpose::STANDARD.encode(credentials)
                )
            }
            AuthStrategy::ApiToken { token } => format!("Bearer {}", token.expose_secret()),
        };

        let mut value = HeaderValue::from_str(&raw).map_err(|_| {
            ClientError::AuthFailed("credentials contain characters not allowed in a header".into())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Check if this strategy uses an API token.
    pub fn is_api_token(&self) -> bool {
        matches!(self, AuthStrategy::ApiToken { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header_is_base64_of_user_colon_password() {
        let strategy = AuthStrategy::Basic {
            username: "admin".to_string(),
            password: SecretString::new("changeme".to_string().into()),
        };
        let header = strategy.authorization_header().unwrap();
        assert_eq!(header.to_str().unwrap(), "Basic YWRtaW46Y2hhbmdlbWU=");
        assert!(header.is_sensitive());
    }

    #[test]
    fn test_token_header_is_bearer() {
        let strategy = AuthStrategy::ApiToken {
            token: SecretString::new("abc.def".to_string().into()),
        };
        let header = strategy.authorization_header().unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer abc.def");
        assert!(strategy.is_api_token());
    }

    #[test]
    fn test_header_debug_is_redacted() {
        let strategy = AuthStrategy::ApiToken {
            token: SecretString::new("super-secret".to_string().into()),
        };
        let header = strategy.authorization_header().unwrap();
        assert!(!format!("{:?}", header).contains("super-secret"));
    }

    #[test]
    fn test_newline_in_token_is_rejected() {
        let strategy = AuthStrategy::ApiToken {
            token: SecretString::new("bad\ntoken".to_string().into()),
        };
        assert!(matches!(
            strategy.authorization_header(),
            Err(ClientError::AuthFailed(_))
        ));
    }
}
