use std::env;

use serde::{Deserialize, Serialize};

/// Today's date in the `YYYY-MM-DD` form the listing timestamps start with
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// What to scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Language name as used in Wiktionary category titles, e.g. "English"
    pub language: String,
    /// Entries created after this date are skipped
    #[serde(default = "today")]
    pub cut_off_date: String,
    /// Keep multiword terms containing regular or non-breaking spaces
    #[serde(default)]
    pub no_skip_spaces_word: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            language: String::new(),
            cut_off_date: today(),
            no_skip_spaces_word: false,
        }
    }
}

impl ScrapeConfig {
    pub fn new() -> Self {
        let language = env::var("WIKIPRON_LANGUAGE").unwrap_or_default();
        let cut_off_date = env::var("WIKIPRON_CUT_OFF_DATE").unwrap_or_else(|_| today());
        let no_skip_spaces_word = env::var("WIKIPRON_NO_SKIP_SPACES_WORD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Self {
            language,
            cut_off_date,
            no_skip_spaces_word,
        }
    }
}
