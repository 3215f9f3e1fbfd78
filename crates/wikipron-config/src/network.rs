use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://en.wiktionary.org/w/api.php".to_string()
}

fn default_page_url() -> String {
    "https://en.wiktionary.org/wiki/".to_string()
}

fn default_max_retries() -> u32 {
    10
}

fn default_backoff_factor_ms() -> u64 {
    200
}

fn default_backoff_max_secs() -> u64 {
    120
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_concurrency() -> usize {
    1
}

/// Endpoints and the retry budget shared by every outgoing request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// MediaWiki API endpoint used for category listings
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base URL a percent-encoded title is appended to
    #[serde(default = "default_page_url")]
    pub page_url: String,
    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_backoff_factor_ms")]
    pub backoff_factor_ms: u64,
    /// Ceiling for a single backoff sleep
    #[serde(default = "default_backoff_max_secs")]
    pub backoff_max_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page fetches allowed in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            page_url: default_page_url(),
            max_retries: default_max_retries(),
            backoff_factor_ms: default_backoff_factor_ms(),
            backoff_max_secs: default_backoff_max_secs(),
            timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        let api_url = env::var("WIKIPRON_API_URL").unwrap_or_else(|_| default_api_url());
        let page_url = env::var("WIKIPRON_PAGE_URL").unwrap_or_else(|_| default_page_url());

        let max_retries = env::var("WIKIPRON_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_retries);

        let backoff_factor_ms = env::var("WIKIPRON_BACKOFF_FACTOR_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_backoff_factor_ms);

        let backoff_max_secs = env::var("WIKIPRON_BACKOFF_MAX_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_backoff_max_secs);

        let timeout_secs = env::var("WIKIPRON_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_secs);

        let concurrency = env::var("WIKIPRON_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_concurrency);

        Self {
            api_url,
            page_url,
            max_retries,
            backoff_factor_ms,
            backoff_max_secs,
            timeout_secs,
            concurrency,
        }
    }

    pub fn backoff_factor(&self) -> Duration {
        Duration::from_millis(self.backoff_factor_ms)
    }

    pub fn backoff_max(&self) -> Duration {
        Duration::from_secs(self.backoff_max_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
