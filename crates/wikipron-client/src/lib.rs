mod error;
mod http;
mod retry;
mod wiktionary;

pub use error::ClientError;
pub use http::{ClientKind, HttpClient, build_client, is_retryable_status, user_agent};
pub use retry::{RetryPolicy, backoff_delay};
pub use wiktionary::WiktionaryClient;

use wikipron_types::Page;

/// Category listed for a language on Wiktionary
pub fn category_title(language: &str) -> String {
    format!("Category:{language} terms with IPA pronunciation")
}

/// One `list=categorymembers` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub category: String,
    pub cmcontinue: Option<String>,
}

impl ListingQuery {
    pub const LIMIT: &'static str = "500";

    pub fn for_language(language: &str) -> Self {
        Self {
            category: category_title(language),
            cmcontinue: None,
        }
    }

    /// Query parameters in request order
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![
            ("action", "query"),
            ("format", "json"),
            ("list", "categorymembers"),
            ("cmtitle", self.category.as_str()),
            ("cmlimit", Self::LIMIT),
            ("cmprop", "ids|title|timestamp"),
        ];

        if let Some(token) = &self.cmcontinue {
            params.push(("cmcontinue", token.as_str()));
        }

        params
    }
}

/// The two calls the scraper makes against the wiki
#[async_trait::async_trait]
pub trait WikiBackend: Send + Sync {
    /// Raw JSON body of one category listing page
    async fn category_members(&self, query: &ListingQuery) -> Result<String, ClientError>;

    /// Rendered page for a member title
    async fn fetch_page(&self, title: &str) -> Result<Page, ClientError>;
}
