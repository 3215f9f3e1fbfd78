//! Pronunciation extraction for languages laid out the common Wiktionary way.

pub mod extractor;
pub mod pron;

pub use extractor::DefaultExtractor;
pub use pron::{PronProcessor, segment};
