use serde::{Deserialize, Serialize};

fn default_stress() -> bool {
    true
}

fn default_syllable_boundaries() -> bool {
    true
}

fn default_tone() -> bool {
    true
}

/// How extracted pronunciations and words are post-processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PronConfig {
    /// Casefold the word form
    #[serde(default)]
    pub casefold: bool,
    /// Keep stress marks
    #[serde(default = "default_stress")]
    pub stress: bool,
    /// Keep syllable boundaries
    #[serde(default = "default_syllable_boundaries")]
    pub syllable_boundaries: bool,
    /// Keep tone letters and tone numbers
    #[serde(default = "default_tone")]
    pub tone: bool,
    /// Segment pronunciations into space-separated phones
    #[serde(default)]
    pub segment: bool,
    /// Take `[...]` transcriptions instead of `/.../`
    #[serde(default)]
    pub phonetic: bool,
    /// Drop parentheses around optional segments
    #[serde(default)]
    pub skip_parens: bool,
    /// Restrict to pronunciations qualified with one of these dialects
    #[serde(default)]
    pub dialects: Vec<String>,
}

impl Default for PronConfig {
    fn default() -> Self {
        Self {
            casefold: false,
            stress: default_stress(),
            syllable_boundaries: default_syllable_boundaries(),
            tone: default_tone(),
            segment: false,
            phonetic: false,
            skip_parens: false,
            dialects: vec![],
        }
    }
}
