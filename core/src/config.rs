//! Client configuration.
//!
//! Loaded from environment variables (optionally seeded from a `.env` file)
//! with defaults matching a local development backend.

use std::env;

use tracing_subscriber::EnvFilter;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Where the API and its uploaded media live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every API endpoint, e.g. `http://localhost:3000/api`.
    pub api_base_url: String,
    /// Host that serves uploaded media, distinct from the API prefix.
    pub media_base_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_MEDIA_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(api_base_url: &str, media_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.to_string(),
            media_base_url: media_base_url.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Load configuration from `CLUB_*` environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base_url = non_empty_var("CLUB_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let media_base_url =
            non_empty_var("CLUB_MEDIA_BASE_URL").unwrap_or_else(|| DEFAULT_MEDIA_BASE_URL.to_string());
        let log_level = non_empty_var("CLUB_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        tracing::debug!(%api_base_url, %media_base_url, "loaded client configuration");

        Self {
            api_base_url,
            media_base_url,
            log_level,
        }
    }

    /// `RUST_LOG` wins when set; otherwise `log_level` is used as the filter.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
