pub mod extractor;
pub mod filter;
pub mod normalize;

pub use extractor::PageExtractor;
pub use filter::{should_skip, should_skip_date, should_skip_word};
pub use normalize::{normalize_pair, to_nfc, to_nfd};
