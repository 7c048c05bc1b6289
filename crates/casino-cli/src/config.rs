//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Query cache configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Application configuration
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Backend RPC endpoint
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Caller identity token; anonymous (guest) when unset
    #[serde(default)]
    pub identity: Option<SecretString>,

    /// Caller's own principal; used to refuse self-referrals
    #[serde(default)]
    pub principal: Option<String>,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Retries for read-only calls
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// How long query results are served from cache
    #[serde(default = "default_stale_time", with = "humantime_serde")]
    pub stale_time: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default implementations
impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            identity: None,
            principal: None,
            timeout: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stale_time: default_stale_time(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_backend_url() -> String {
    "http://127.0.0.1:4943".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_max_retries() -> u32 {
    3
}

fn default_stale_time() -> Duration {
    casino_session::DEFAULT_STALE_TIME
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let builder = config::Config::builder().add_source(
            config::Environment::default()
                .separator("__")
                // Identity tokens may look numeric; keep strings as strings.
                .try_parsing(false),
        );

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
