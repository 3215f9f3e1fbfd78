use wikipron_config::Config;
use wikipron_types::{Page, WordPronPair};

/// Pulls word/pronunciation pairs out of a fetched word page.
///
/// One implementation per language family; the scraper treats it as opaque.
/// Returned pronunciations may still be decomposed (NFD), the pipeline
/// composes them before emitting. An empty result is an ordinary miss.
pub trait PageExtractor: Send + Sync {
    fn extract(&self, word: &str, page: &Page, config: &Config) -> Vec<WordPronPair>;

    /// Name used in logs
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> PageExtractor for F
where
    F: Fn(&str, &Page, &Config) -> Vec<WordPronPair> + Send + Sync,
{
    fn extract(&self, word: &str, page: &Page, config: &Config) -> Vec<WordPronPair> {
        self(word, page, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_extractors() {
        let extractor = |word: &str, page: &Page, _: &Config| {
            vec![WordPronPair::new(word, page.html.trim())]
        };
        let page = Page {
            title: "cat".to_string(),
            url: "https://en.wiktionary.org/wiki/cat".to_string(),
            html: " kæt ".to_string(),
        };

        let pairs = extractor.extract("cat", &page, &Config::for_language("English"));
        assert_eq!(pairs, vec![WordPronPair::new("cat", "kæt")]);
        assert_eq!(PageExtractor::name(&extractor), "custom");
    }
}
