//! Application configuration loaded from environment variables.
//!
//! The server reads [`Config`] once at startup; API consumers build a
//! [`ClientConfig`] to point the typed client at a backend.

use std::env;

use crate::client::RequestStrategy;

/// Server configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// GitHub OAuth app client ID (public)
    pub github_client_id: String,
    /// Frontend URL for OAuth redirects
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Explicit CORS allow-list. Empty means any origin is accepted.
    pub cors_allowed_origins: Vec<String>,
    /// Accepted for deployment parity; the in-process store does not use it.
    pub mongodb_uri: Option<String>,

    // --- Secrets ---
    /// GitHub OAuth client secret
    pub github_client_secret: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// HMAC key for the OAuth `state` parameter
    pub oauth_state_key: Vec<u8>,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            github_client_id: "test_client_id".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 5001,
            cors_allowed_origins: Vec::new(),
            mongodb_uri: None,
            github_client_secret: "test_secret".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            oauth_state_key: b"test_oauth_state_key_32_bytes!!".to_vec(),
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
            .into_bytes();

        Ok(Self {
            github_client_id: env::var("GITHUB_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("GITHUB_CLIENT_ID"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: parse_port(env::var("PORT").ok().as_deref())?,
            cors_allowed_origins: parse_origins(
                env::var("CORS_ALLOWED_ORIGINS").ok().as_deref(),
            ),
            mongodb_uri: env::var("MONGODB_URI").ok(),

            github_client_secret: env::var("GITHUB_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GITHUB_CLIENT_SECRET"))?,
            oauth_state_key: env::var("OAUTH_STATE_KEY")
                .map(String::into_bytes)
                .unwrap_or_else(|_| jwt_signing_key.clone()),
            jwt_signing_key,
        })
    }

    /// Whether cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

/// Settings for the typed API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend_url: String,
    pub strategy: RequestStrategy,
}

impl ClientConfig {
    pub const DEFAULT_BACKEND_URL: &'static str = "http://localhost:5001";

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let backend_url = env::var("MENTORHUB_BACKEND_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BACKEND_URL.to_string());

        let strategy = match env::var("MENTORHUB_REQUEST_STRATEGY").as_deref() {
            Err(_) | Ok("direct") => RequestStrategy::Direct,
            Ok("corsproxy") => RequestStrategy::corsproxy(),
            Ok("allorigins") => RequestStrategy::allorigins(),
            Ok("dev") => RequestStrategy::DevProxy {
                origin: env::var("MENTORHUB_DEV_ORIGIN")
                    .map_err(|_| ConfigError::Missing("MENTORHUB_DEV_ORIGIN"))?,
            },
            Ok(other) => {
                return Err(ConfigError::Invalid {
                    name: "MENTORHUB_REQUEST_STRATEGY",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            strategy,
        })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(5001),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name: "PORT",
            value: value.to_string(),
        }),
    }
}

fn parse_origins(raw: Option<&str>) -> Vec<String> {
    raw.map(|list| {
        list.split(',')
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("GITHUB_CLIENT_ID", "test_id");
        env::set_var("GITHUB_CLIENT_SECRET", " test_secret ");
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::remove_var("OAUTH_STATE_KEY");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.github_client_id, "test_id");
        assert_eq!(config.github_client_secret, "test_secret");
        assert_eq!(config.port, 5001);
        assert_eq!(config.oauth_state_key, config.jwt_signing_key);
    }

    #[test]
    fn test_parse_origins() {
        assert!(parse_origins(None).is_empty());
        assert_eq!(
            parse_origins(Some("http://localhost:5173/, https://app.example.com ,")),
            vec!["http://localhost:5173", "https://app.example.com"]
        );
    }

    #[test]
    fn test_parse_port_rejects_garbage() {
        assert_eq!(parse_port(Some("3000")).unwrap(), 3000);
        assert!(matches!(
            parse_port(Some("abc")),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
    }
}
