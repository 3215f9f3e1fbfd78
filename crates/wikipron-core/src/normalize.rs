use unicode_normalization::{UnicodeNormalization, is_nfc};
use wikipron_types::WordPronPair;

/// Compose to NFC. Extraction works on decomposed text so diacritics can be
/// matched one code point at a time; everything leaving the pipeline is NFC.
pub fn to_nfc(text: &str) -> String {
    if is_nfc(text) {
        return text.to_string();
    }

    text.nfc().collect()
}

/// Decompose to NFD
pub fn to_nfd(text: &str) -> String {
    text.nfd().collect()
}

/// Compose the pronunciation of a freshly extracted pair
pub fn normalize_pair(pair: WordPronPair) -> WordPronPair {
    WordPronPair {
        pron: to_nfc(&pair.pron),
        word: pair.word,
    }
}
