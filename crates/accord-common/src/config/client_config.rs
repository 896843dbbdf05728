//! Client configuration
//!
//! Loads the bot credential and connection settings from environment variables.

use std::env;
use std::fmt;
use std::time::Duration;

/// Default REST API root, without a version segment
pub const DEFAULT_API_BASE_URL: &str = "https://discord.com/api";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings needed to construct a client
#[derive(Clone)]
pub struct ClientConfig {
    /// Bot token, sent as `Authorization: Bot <token>`
    pub token: String,
    /// API version; `None` uses the unversioned base URL
    pub api_version: Option<u8>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_version: None,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_api_version(mut self, version: u8) -> Self {
        self.api_version = Some(version);
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Reads a `.env` file first if one is present.
    ///
    /// | variable | required | default |
    /// |---|---|---|
    /// | `DISCORD_BOT_TOKEN` | yes | |
    /// | `DISCORD_API_VERSION` | no | unversioned |
    /// | `DISCORD_API_BASE_URL` | no | `https://discord.com/api` |
    /// | `DISCORD_HTTP_TIMEOUT_SECS` | no | 30 |
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("DISCORD_BOT_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingVar("DISCORD_BOT_TOKEN"))?;

        let api_version = lookup("DISCORD_API_VERSION")
            .map(|v| {
                v.trim()
                    .parse::<u8>()
                    .map_err(|_| ConfigError::InvalidValue("DISCORD_API_VERSION", v))
            })
            .transpose()?;

        let base_url = lookup("DISCORD_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs = lookup("DISCORD_HTTP_TIMEOUT_SECS")
            .map(|v| {
                v.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue("DISCORD_HTTP_TIMEOUT_SECS", v))
            })
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            token,
            api_version,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
