use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use self::network::NetworkConfig;
use self::pron::PronConfig;
use self::scrape::ScrapeConfig;

pub mod error;
pub mod network;
pub mod pron;
pub mod scrape;

pub use error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub pron: PronConfig,
    pub network: NetworkConfig,
}

impl Config {
    /// Build from `WIKIPRON_*` environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            scrape: ScrapeConfig::new(),
            pron: PronConfig::default(),
            network: NetworkConfig::new(),
        }
    }

    /// Shorthand for a default config targeting `language`
    pub fn for_language(language: impl Into<String>) -> Self {
        Config {
            scrape: ScrapeConfig {
                language: language.into(),
                ..ScrapeConfig::default()
            },
            ..Config::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scrape.language.trim().is_empty() {
            return Err(ConfigError::EmptyLanguage);
        }

        // Must be exactly `%Y-%m-%d` so lexical and chronological order agree.
        // chrono accepts padding spaces, hence the round trip.
        let date = &self.scrape.cut_off_date;
        let canonical = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(|parsed| parsed.format("%Y-%m-%d").to_string())
            .ok();
        if canonical.as_deref() != Some(date.as_str()) {
            return Err(ConfigError::InvalidDate(date.clone()));
        }

        let today = scrape::today();
        if *date > today {
            return Err(ConfigError::FutureDate {
                date: date.clone(),
                today,
            });
        }

        if self.network.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        Ok(())
    }
}
