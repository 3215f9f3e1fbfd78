use reqwest::Url;
use wikipron_config::network::NetworkConfig;
use wikipron_types::Page;

use crate::error::ClientError;
use crate::http::{ClientKind, HttpClient, build_client};
use crate::{ListingQuery, WikiBackend};

/// Wiktionary over HTTPS: one client for the API, one for word pages.
#[derive(Clone)]
pub struct WiktionaryClient {
    api: HttpClient,
    pages: HttpClient,
    api_url: Url,
    page_url: Url,
}

fn parse_url(url: &str) -> Result<Url, ClientError> {
    Url::parse(url).map_err(|e| ClientError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

impl WiktionaryClient {
    pub fn new(network: &NetworkConfig) -> Result<Self, ClientError> {
        Ok(Self {
            api: build_client(ClientKind::Api, network)?,
            pages: build_client(ClientKind::Page, network)?,
            api_url: parse_url(&network.api_url)?,
            page_url: parse_url(&network.page_url)?,
        })
    }

    pub fn listing_url(&self, query: &ListingQuery) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut().extend_pairs(query.params());
        url
    }

    /// Page URL with `title` appended as a single percent-encoded segment
    pub fn page_url(&self, title: &str) -> Result<Url, ClientError> {
        let mut url = self.page_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl {
                url: self.page_url.to_string(),
                reason: "cannot be a base URL".to_string(),
            })?
            .pop_if_empty()
            .push(title);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl WikiBackend for WiktionaryClient {
    async fn category_members(&self, query: &ListingQuery) -> Result<String, ClientError> {
        let url = self.listing_url(query);
        tracing::debug!("GET {}", url);
        self.api.get_text(url).await
    }

    async fn fetch_page(&self, title: &str) -> Result<Page, ClientError> {
        let url = self.page_url(title)?;
        tracing::debug!("GET {}", url);
        let html = self.pages.get_text(url.clone()).await?;

        Ok(Page {
            title: title.to_string(),
            url: url.to_string(),
            html,
        })
    }
}
