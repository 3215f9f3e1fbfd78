//! The scrape pipeline: listing, filtering, page fetches, extraction and
//! normalization wired into one lazy stream of pairs.

use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use wikipron_client::{WikiBackend, WiktionaryClient};
use wikipron_config::Config;
use wikipron_core::{PageExtractor, normalize_pair, should_skip_date, should_skip_word};
use wikipron_types::{CategoryMember, WordPronPair};

use crate::error::ScrapeError;
use crate::pagination::Paginator;

/// Per-run counters, logged when the listing is exhausted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeStats {
    pub listing_pages: u64,
    pub members: u64,
    pub skipped_word: u64,
    pub skipped_date: u64,
    pub pages_fetched: u64,
    pub extraction_misses: u64,
    pub pairs: u64,
}

impl ScrapeStats {
    fn log(&self, language: &str) {
        tracing::info!(
            "{} scrape finished: {} listing pages, {} members, {} skipped by shape, \
             {} skipped by date, {} pages fetched, {} without pronunciations, {} pairs",
            language,
            self.listing_pages,
            self.members,
            self.skipped_word,
            self.skipped_date,
            self.pages_fetched,
            self.extraction_misses,
            self.pairs
        );
    }
}

/// Scrapes one language. Every call to [`Scraper::scrape`] is a fresh run.
pub struct Scraper<B: ?Sized = WiktionaryClient> {
    backend: Arc<B>,
    config: Arc<Config>,
    extractor: Arc<dyn PageExtractor>,
    cancel: CancellationToken,
}

impl<B: ?Sized> Clone for Scraper<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            config: self.config.clone(),
            extractor: self.extractor.clone(),
            cancel: self.cancel.clone(),
        }
    }
}

impl Scraper<WiktionaryClient> {
    /// Validate `config` and build a Wiktionary client for it
    pub fn new(config: Config, extractor: Arc<dyn PageExtractor>) -> Result<Self, ScrapeError> {
        config.validate()?;
        let backend = WiktionaryClient::new(&config.network)?;
        Ok(Self::from_parts(Arc::new(backend), config, extractor))
    }
}

impl<B: ?Sized> Scraper<B> {
    fn from_parts(backend: Arc<B>, config: Config, extractor: Arc<dyn PageExtractor>) -> Self {
        Self {
            backend,
            config: Arc::new(config),
            extractor,
            cancel: CancellationToken::new(),
        }
    }
}

impl<B: WikiBackend + ?Sized + 'static> Scraper<B> {
    /// Scrape through `backend` instead of Wiktionary. `config` is validated
    /// the same way [`Scraper::new`] does.
    pub fn with_backend(
        backend: Arc<B>,
        config: Config,
        extractor: Arc<dyn PageExtractor>,
    ) -> Result<Self, ScrapeError> {
        config.validate()?;
        Ok(Self::from_parts(backend, config, extractor))
    }

    /// Runs stop with [`ScrapeError::Cancelled`] once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Lazily scrape every pair of the configured language.
    ///
    /// Nothing is requested until the stream is polled. Dropping the stream
    /// stops the run; requests in flight are dropped with it.
    pub fn scrape(&self) -> impl Stream<Item = Result<WordPronPair, ScrapeError>> + Send + 'static + use<B> {
        self.scrape_with_token(self.cancel.child_token())
    }

    pub(crate) fn scrape_with_token(
        &self,
        cancel: CancellationToken,
    ) -> impl Stream<Item = Result<WordPronPair, ScrapeError>> + Send + 'static + use<B> {
        let backend = self.backend.clone();
        let config = self.config.clone();
        let extractor = self.extractor.clone();

        async_stream::try_stream! {
            let mut paginator = Paginator::new(backend.clone(), &config.scrape.language);
            let mut stats = ScrapeStats::default();
            let concurrency = config.network.concurrency.max(1);

            tracing::info!("Scraping {:?} (cut-off {})", paginator.category(), config.scrape.cut_off_date);

            while paginator.has_next_batch() {
                let batch = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(ScrapeError::Cancelled),
                    batch = paginator.next_batch() => batch,
                };
                let Some(members) = batch? else { break };

                stats.listing_pages += 1;
                stats.members += members.len() as u64;
                tracing::info!("Listing page {}: {} members", stats.listing_pages, members.len());

                let wanted: Vec<CategoryMember> = members
                    .into_iter()
                    .filter(|member| keep(member, &config, &mut stats))
                    .collect();
                stats.pages_fetched += wanted.len() as u64;

                // Every member of this page is attempted before the next listing request
                let mut fetches = futures::stream::iter(wanted)
                    .map(|member| fetch_pairs(backend.as_ref(), &config, extractor.as_ref(), member))
                    .buffer_unordered(concurrency);

                loop {
                    let next = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => Err(ScrapeError::Cancelled),
                        next = fetches.next() => Ok(next),
                    };
                    let Some(pairs) = next? else { break };
                    let pairs = pairs?;

                    if pairs.is_empty() {
                        stats.extraction_misses += 1;
                    }
                    for pair in pairs {
                        stats.pairs += 1;
                        yield pair;
                    }
                }
            }

            stats.log(&config.scrape.language);
        }
    }
}

/// Lazily scrape `config.scrape.language` from Wiktionary with `extractor`
pub fn scrape(
    config: Config,
    extractor: Arc<dyn PageExtractor>,
) -> Result<impl Stream<Item = Result<WordPronPair, ScrapeError>> + Send + 'static, ScrapeError> {
    Ok(Scraper::new(config, extractor)?.scrape())
}

fn keep(member: &CategoryMember, config: &Config, stats: &mut ScrapeStats) -> bool {
    if should_skip_word(&member.title, config.scrape.no_skip_spaces_word) {
        tracing::debug!("Skipping {:?}: not a single word", member.title);
        stats.skipped_word += 1;
        return false;
    }

    if should_skip_date(&member.timestamp, &config.scrape.cut_off_date) {
        tracing::debug!("Skipping {:?}: created {}", member.title, member.timestamp);
        stats.skipped_date += 1;
        return false;
    }

    true
}

async fn fetch_pairs<B: WikiBackend + ?Sized>(
    backend: &B,
    config: &Config,
    extractor: &dyn PageExtractor,
    member: CategoryMember,
) -> Result<Vec<WordPronPair>, ScrapeError> {
    let page = match backend.fetch_page(&member.title).await {
        Ok(page) => page,
        // Deleted or moved between listing and fetch
        Err(e) if e.is_not_found() => {
            tracing::warn!("{}", e);
            return Ok(vec![]);
        }
        Err(e) => return Err(e.into()),
    };

    let pairs: Vec<WordPronPair> = extractor
        .extract(&member.title, &page, config)
        .into_iter()
        .map(normalize_pair)
        .collect();

    tracing::debug!("{}: {} pronunciation(s) via {}", member.title, pairs.len(), extractor.name());
    Ok(pairs)
}
