use unicode_normalization::char::is_combining_mark;
use wikipron_config::pron::PronConfig;
use wikipron_core::to_nfd;

const STRESS: [char; 2] = ['ˈ', 'ˌ'];
const SYLLABLE_BOUNDARY: char = '.';

/// Chao tone letters and superscript tone numbers
fn is_tone(c: char) -> bool {
    matches!(
        c,
        '\u{02E5}'..='\u{02E9}' | '\u{A700}'..='\u{A71F}' | '¹' | '²' | '³' | '⁰' | '\u{2074}'..='\u{2079}'
    )
}

/// Spacing modifiers that belong to the preceding phone (aspiration, length, ...)
fn is_modifier(c: char) -> bool {
    matches!(
        c,
        '\u{02B0}'..='\u{02C1}' | 'ː' | 'ˑ' | '\u{02E0}'..='\u{02E4}' | '\u{1D2C}'..='\u{1D6A}' | 'ⁿ'
    )
}

fn is_tie(c: char) -> bool {
    matches!(c, '\u{0361}' | '\u{035C}')
}

/// Left over once stress and boundaries are gone, none of these make a pronunciation
fn is_mark(c: char) -> bool {
    STRESS.contains(&c) || c == SYLLABLE_BOUNDARY || c.is_whitespace() || c == '-'
}

/// Turns the text of one IPA span into a pronunciation, per [`PronConfig`].
///
/// Works in NFD so combining diacritics are separate code points.
pub struct PronProcessor<'a> {
    config: &'a PronConfig,
}

impl<'a> PronProcessor<'a> {
    pub fn new(config: &'a PronConfig) -> Self {
        Self { config }
    }

    pub fn process_word(&self, word: &str) -> String {
        if self.config.casefold {
            word.to_lowercase()
        } else {
            word.to_string()
        }
    }

    /// `None` when the transcription is of the other kind (phonemic vs
    /// phonetic) or nothing is left after processing
    pub fn process(&self, raw: &str) -> Option<String> {
        let raw = to_nfd(raw.trim());
        let mut pron = strip_brackets(&raw, self.config.phonetic)?.to_string();

        if !self.config.stress {
            pron.retain(|c| !STRESS.contains(&c));
        }
        if !self.config.syllable_boundaries {
            pron.retain(|c| c != SYLLABLE_BOUNDARY);
        }
        if !self.config.tone {
            pron.retain(|c| !is_tone(c));
        }
        if self.config.skip_parens {
            pron.retain(|c| c != '(' && c != ')');
        }

        let pron = pron.split_whitespace().collect::<Vec<_>>().join(" ");
        if pron.chars().all(is_mark) {
            return None;
        }

        if self.config.segment {
            Some(segment(&pron))
        } else {
            Some(pron)
        }
    }
}

/// Inner text of `/.../` (phonemic) or `[...]` (phonetic)
fn strip_brackets(text: &str, phonetic: bool) -> Option<&str> {
    let (open, close) = if phonetic { ('[', ']') } else { ('/', '/') };
    text.strip_prefix(open)?.strip_suffix(close)
}

/// Space-separated phones: a base character plus its diacritics and
/// modifiers, with tie bars joining two bases into one phone.
pub fn segment(pron: &str) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut join_next = false;

    for c in pron.chars() {
        if c.is_whitespace() {
            join_next = false;
            continue;
        }

        let attach = join_next || is_combining_mark(c) || is_modifier(c);
        match segments.last_mut() {
            Some(last) if attach => last.push(c),
            _ => segments.push(c.to_string()),
        }
        join_next = is_tie(c);
    }

    segments.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(config: &PronConfig, raw: &str) -> Option<String> {
        PronProcessor::new(config).process(raw)
    }

    #[test]
    fn phonemic_by_default() {
        let config = PronConfig::default();

        assert_eq!(process(&config, "/kæt/").as_deref(), Some("kæt"));
        assert_eq!(process(&config, " /kæt/ ").as_deref(), Some("kæt"));
        assert_eq!(process(&config, "[kʰæt]"), None);
        assert_eq!(process(&config, "-æt"), None);
    }

    #[test]
    fn phonetic_when_asked() {
        let config = PronConfig {
            phonetic: true,
            ..PronConfig::default()
        };

        assert_eq!(process(&config, "[kʰæt]").as_deref(), Some("kʰæt"));
        assert_eq!(process(&config, "/kæt/"), None);
    }

    #[test]
    fn output_is_decomposed() {
        let config = PronConfig::default();
        assert_eq!(process(&config, "/ã/").as_deref(), Some("a\u{0303}"));
    }

    #[test]
    fn stress_and_boundaries_are_optional() {
        let keep = PronConfig::default();
        assert_eq!(process(&keep, "/ˈbæn.ə.nə/").as_deref(), Some("ˈbæn.ə.nə"));

        let strip = PronConfig {
            stress: false,
            syllable_boundaries: false,
            ..PronConfig::default()
        };
        assert_eq!(process(&strip, "/ˈbæn.ə.ˌnə/").as_deref(), Some("bænənə"));
    }

    #[test]
    fn tones_are_optional() {
        let strip = PronConfig {
            tone: false,
            ..PronConfig::default()
        };
        assert_eq!(process(&strip, "/ma˨˩˦/").as_deref(), Some("ma"));
        assert_eq!(process(&strip, "/ma²¹⁴/").as_deref(), Some("ma"));
        assert_eq!(process(&PronConfig::default(), "/ma˨˩˦/").as_deref(), Some("ma˨˩˦"));
    }

    #[test]
    fn parentheses() {
        assert_eq!(
            process(&PronConfig::default(), "/ˈfæm(ɪ)li/").as_deref(),
            Some("ˈfæm(ɪ)li")
        );

        let skip = PronConfig {
            skip_parens: true,
            ..PronConfig::default()
        };
        assert_eq!(process(&skip, "/ˈfæm(ɪ)li/").as_deref(), Some("ˈfæmɪli"));
    }

    #[test]
    fn marks_only_is_dropped() {
        let strip = PronConfig {
            stress: false,
            ..PronConfig::default()
        };
        assert_eq!(process(&PronConfig::default(), "//"), None);
        assert_eq!(process(&PronConfig::default(), "/ˈ./"), None);
        assert_eq!(process(&strip, "/ˈ/"), None);
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(
            process(&PronConfig::default(), "/aɪs   kɹiːm/").as_deref(),
            Some("aɪs kɹiːm")
        );
    }

    #[test]
    fn segmentation() {
        assert_eq!(segment("kʰæt"), "kʰ æ t");
        assert_eq!(segment("t\u{0361}ʃiːz"), "t\u{0361}ʃ iː z");
        assert_eq!(segment("a\u{0303}n"), "a\u{0303} n");
        assert_eq!(segment("aɪs kɹiːm"), "a ɪ s k ɹ iː m");
    }

    #[test]
    fn segment_flag_applies() {
        let config = PronConfig {
            segment: true,
            ..PronConfig::default()
        };
        assert_eq!(process(&config, "/kʰæt/").as_deref(), Some("kʰ æ t"));
    }

    #[test]
    fn casefold_word() {
        let fold = PronConfig {
            casefold: true,
            ..PronConfig::default()
        };
        assert_eq!(PronProcessor::new(&fold).process_word("Paris"), "paris");
        assert_eq!(PronProcessor::new(&PronConfig::default()).process_word("Paris"), "Paris");
    }
}
