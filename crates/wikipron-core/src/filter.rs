//! Predicates deciding which category members are not worth a page fetch.

use std::sync::LazyLock;

use regex::Regex;
use wikipron_config::Config;
use wikipron_types::CategoryMember;

/// Any Unicode decimal digit
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("valid regex"));

const NO_BREAK_SPACE: char = '\u{00A0}';

/// Multiword terms, hyphenated compounds and terms with digits are skipped.
/// `allow_spaces` only lifts the multiword rule.
pub fn should_skip_word(word: &str, allow_spaces: bool) -> bool {
    if !allow_spaces && word.contains([' ', NO_BREAK_SPACE]) {
        return true;
    }

    word.contains('-') || DIGIT.is_match(word)
}

/// Entries created after the cut-off date are skipped.
///
/// This is a plain string comparison. It is only chronological because both
/// sides are fixed-width ISO-8601 (`YYYY-MM-DD...`). A timestamp on the cut-off
/// day itself (`2024-01-01T08:00:00Z` against `2024-01-01`) is longer and
/// therefore greater, so it is skipped too.
pub fn should_skip_date(entry_date: &str, cut_off_date: &str) -> bool {
    entry_date > cut_off_date
}

pub fn should_skip(member: &CategoryMember, config: &Config) -> bool {
    should_skip_word(&member.title, config.scrape.no_skip_spaces_word)
        || should_skip_date(&member.timestamp, &config.scrape.cut_off_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphens_and_digits_always_skip() {
        for word in ["100-meter", "-ing", "re-enter", "4x4", "route66", "٣", "a b-c"] {
            assert!(should_skip_word(word, false), "{word}");
            assert!(should_skip_word(word, true), "{word}");
        }
    }

    #[test]
    fn plain_words_pass() {
        for word in ["cat", "naïve", "Straße", "кот", "猫", "ça"] {
            assert!(!should_skip_word(word, false), "{word}");
            assert!(!should_skip_word(word, true), "{word}");
        }
    }

    #[test]
    fn spaces_depend_on_flag() {
        assert!(should_skip_word("foo bar", false));
        assert!(!should_skip_word("foo bar", true));

        assert!(should_skip_word("foo\u{00A0}bar", false));
        assert!(!should_skip_word("foo\u{00A0}bar", true));
    }

    #[test]
    fn dates_compare_lexically() {
        let dates = ["2019-12-31", "2020-01-01", "2020-01-02", "2024-01-01", "2025-06-30"];

        for (i, d1) in dates.iter().enumerate() {
            for d2 in &dates[i..] {
                assert!(!should_skip_date(d1, d2), "{d1} <= {d2}");
                if d1 != d2 {
                    assert!(should_skip_date(d2, d1), "{d2} > {d1}");
                }
            }
        }
    }

    #[test]
    fn timestamp_on_cut_off_day_is_skipped() {
        assert!(should_skip_date("2024-01-01T08:00:00Z", "2024-01-01"));
        assert!(!should_skip_date("2023-12-31T23:59:59Z", "2024-01-01"));
    }

    #[test]
    fn skip_combines_both_rules() {
        let mut config = Config::for_language("English");
        config.scrape.cut_off_date = "2024-01-01".to_string();

        let member = |title: &str, timestamp: &str| CategoryMember {
            pageid: None,
            ns: None,
            title: title.to_string(),
            timestamp: timestamp.to_string(),
        };

        assert!(!should_skip(&member("cat", "2020-01-01"), &config));
        assert!(should_skip(&member("100-meter", "2020-01-01"), &config));
        assert!(should_skip(&member("dog", "2025-01-01"), &config));
    }
}
