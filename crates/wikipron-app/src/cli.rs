use std::path::PathBuf;

use clap::Parser;
use wikipron_config::Config;

#[derive(Debug, Parser)]
#[command(
    name = "wikipron",
    about = "Scrape word/pronunciation pairs for one language from Wiktionary",
    version
)]
pub struct Cli {
    /// Language name as used in Wiktionary category titles, e.g. "English".
    /// Falls back to WIKIPRON_LANGUAGE.
    pub language: Option<String>,

    /// Skip entries created after this date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub cut_off_date: Option<String>,

    /// Keep multiword terms.
    #[arg(long)]
    pub no_skip_spaces_word: bool,

    /// Casefold words.
    #[arg(long)]
    pub casefold: bool,

    /// Remove stress marks.
    #[arg(long)]
    pub no_stress: bool,

    /// Remove syllable boundaries.
    #[arg(long)]
    pub no_syllable_boundaries: bool,

    /// Remove tone letters and numbers.
    #[arg(long)]
    pub no_tone: bool,

    /// Take phonetic [...] transcriptions instead of phonemic /.../ ones.
    #[arg(long)]
    pub phonetic: bool,

    /// Drop parentheses around optional segments.
    #[arg(long)]
    pub skip_parens: bool,

    /// Separate phones with spaces.
    #[arg(long)]
    pub segment: bool,

    /// Only keep pronunciations qualified with this dialect. Repeatable.
    #[arg(long = "dialect")]
    pub dialects: Vec<String>,

    /// Write pairs here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop after this many pairs.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Page fetches in flight at once.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Retries after the first attempt of each request.
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG wins when set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Layer the flags over `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(language) = &self.language {
            config.scrape.language = language.clone();
        }
        if let Some(date) = &self.cut_off_date {
            config.scrape.cut_off_date = date.clone();
        }
        config.scrape.no_skip_spaces_word |= self.no_skip_spaces_word;

        let pron = &mut config.pron;
        pron.casefold |= self.casefold;
        pron.stress &= !self.no_stress;
        pron.syllable_boundaries &= !self.no_syllable_boundaries;
        pron.tone &= !self.no_tone;
        pron.phonetic |= self.phonetic;
        pron.skip_parens |= self.skip_parens;
        pron.segment |= self.segment;
        if !self.dialects.is_empty() {
            pron.dialects = self.dialects.clone();
        }

        if let Some(concurrency) = self.concurrency {
            config.network.concurrency = concurrency;
        }
        if let Some(max_retries) = self.max_retries {
            config.network.max_retries = max_retries;
        }
    }
}
