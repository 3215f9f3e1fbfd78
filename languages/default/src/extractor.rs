use scraper::{ElementRef, Html, Selector};
use wikipron_config::Config;
use wikipron_core::PageExtractor;
use wikipron_types::{Page, WordPronPair};

use crate::pron::PronProcessor;

/// Extractor for languages whose pronunciations sit in the usual place:
/// a list item with a `sup` linking to the language's pronunciation appendix,
/// followed by one or more `span.IPA`.
pub struct DefaultExtractor {
    items: Selector,
    links: Selector,
    qualifiers: Selector,
}

impl DefaultExtractor {
    pub fn new() -> Self {
        Self {
            items: Selector::parse("li").expect("static selector"),
            links: Selector::parse("a[title]").expect("static selector"),
            qualifiers: Selector::parse(".ib-content, .qualifier-content").expect("static selector"),
        }
    }

    /// Has a direct `sup` child linking to `appendix`
    fn is_pron_item(&self, item: ElementRef<'_>, appendix: &str) -> bool {
        children(item)
            .filter(|child| child.value().name() == "sup")
            .any(|sup| {
                sup.select(&self.links)
                    .any(|a| a.value().attr("title") == Some(appendix))
            })
    }

    fn in_dialects(&self, item: ElementRef<'_>, dialects: &[String]) -> bool {
        item.select(&self.qualifiers).any(|qualifier| {
            let text: String = qualifier.text().collect();
            dialects.iter().any(|dialect| text.contains(dialect.as_str()))
        })
    }
}

impl Default for DefaultExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn children(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.children().filter_map(ElementRef::wrap)
}

fn is_ipa(element: &ElementRef<'_>) -> bool {
    element.value().name() == "span" && element.value().classes().any(|class| class == "IPA")
}

impl PageExtractor for DefaultExtractor {
    fn extract(&self, word: &str, page: &Page, config: &Config) -> Vec<WordPronPair> {
        let document = Html::parse_document(&page.html);
        let appendix = format!("Appendix:{} pronunciation", config.scrape.language);
        let processor = PronProcessor::new(&config.pron);
        let word = processor.process_word(word);

        let mut pairs = Vec::new();
        for item in document.select(&self.items) {
            if !self.is_pron_item(item, &appendix) {
                continue;
            }
            if !config.pron.dialects.is_empty() && !self.in_dialects(item, &config.pron.dialects) {
                continue;
            }

            for span in children(item).filter(is_ipa) {
                let text: String = span.text().collect();
                match processor.process(&text) {
                    Some(pron) => pairs.push(WordPronPair::new(word.clone(), pron)),
                    None => tracing::trace!("{}: ignoring {:?}", word, text),
                }
            }
        }

        pairs
    }

    fn name(&self) -> &str {
        "default"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT: &str = r#"<!DOCTYPE html>
<html><body>
<div class="mw-heading mw-heading2"><h2 id="English">English</h2></div>
<h3 id="Pronunciation">Pronunciation</h3>
<ul>
  <li><span class="ib-content qualifier-content"><a href="/wiki/UK">UK</a></span> <sup>(<a href="/wiki/Appendix:English_pronunciation" title="Appendix:English pronunciation">key</a>)</sup>: <span class="IPA">/kæt/</span>, <span class="IPA">[kʰæt]</span></li>
  <li><span class="ib-content qualifier-content"><a href="/wiki/US">US</a></span> <sup>(<a href="/wiki/Appendix:English_pronunciation" title="Appendix:English pronunciation">key</a>)</sup>: <span class="IPA">/kæʔt/</span></li>
  <li>Rhymes: <a href="/wiki/Rhymes:English/%C3%A6t" title="Rhymes:English/æt"><span class="IPA">-æt</span></a></li>
</ul>
<div class="mw-heading mw-heading2"><h2 id="French">French</h2></div>
<ul>
  <li><sup>(<a href="/wiki/Appendix:French_pronunciation" title="Appendix:French pronunciation">key</a>)</sup>: <span class="IPA">/kat/</span></li>
</ul>
</body></html>"#;

    fn page() -> Page {
        Page {
            title: "cat".to_string(),
            url: "https://en.wiktionary.org/wiki/cat".to_string(),
            html: CAT.to_string(),
        }
    }

    fn prons(config: &Config) -> Vec<String> {
        DefaultExtractor::new()
            .extract("cat", &page(), config)
            .into_iter()
            .map(|pair| pair.pron)
            .collect()
    }

    #[test]
    fn phonemic_prons_for_language() {
        let config = Config::for_language("English");
        let pairs = DefaultExtractor::new().extract("cat", &page(), &config);

        assert_eq!(
            pairs,
            vec![WordPronPair::new("cat", "kæt"), WordPronPair::new("cat", "kæʔt")]
        );
    }

    #[test]
    fn phonetic_prons() {
        let mut config = Config::for_language("English");
        config.pron.phonetic = true;
        assert_eq!(prons(&config), vec!["kʰæt"]);
    }

    #[test]
    fn other_language_section() {
        assert_eq!(prons(&Config::for_language("French")), vec!["kat"]);
        assert!(prons(&Config::for_language("German")).is_empty());
    }

    #[test]
    fn dialect_filter() {
        let mut config = Config::for_language("English");
        config.pron.dialects = vec!["US".to_string()];
        assert_eq!(prons(&config), vec!["kæʔt"]);

        config.pron.dialects = vec!["UK".to_string(), "US".to_string()];
        assert_eq!(prons(&config), vec!["kæt", "kæʔt"]);
    }

    #[test]
    fn casefolded_word() {
        let mut config = Config::for_language("English");
        config.pron.casefold = true;
        let pairs = DefaultExtractor::new().extract("Cat", &page(), &config);
        assert!(pairs.iter().all(|pair| pair.word == "cat"));
    }

    #[test]
    fn page_without_prons_is_a_miss() {
        let empty = Page {
            title: "cat".to_string(),
            url: String::new(),
            html: "<html><body><p>No entry</p></body></html>".to_string(),
        };
        let config = Config::for_language("English");
        assert!(DefaultExtractor::new().extract("cat", &empty, &config).is_empty());
    }
}
