use std::sync::Arc;

use wikipron_client::{ListingQuery, WikiBackend};
use wikipron_types::{CategoryMember, CategoryMembersResponse};

use crate::error::ScrapeError;

/// Where the category listing stands between requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationState {
    /// Nothing requested yet
    Start,
    /// The last response carried this `cmcontinue` token
    Continue(String),
    /// The last response had no `continue` field
    Done,
}

/// Walks a category listing one page of up to 500 members at a time.
///
/// The continuation token is the only state. The listing is finished exactly
/// when a response omits `continue`; there is no page cap.
pub struct Paginator<B: ?Sized> {
    backend: Arc<B>,
    category: String,
    state: PaginationState,
}

impl<B: WikiBackend + ?Sized> Paginator<B> {
    pub fn new(backend: Arc<B>, language: &str) -> Self {
        Self {
            backend,
            category: wikipron_client::category_title(language),
            state: PaginationState::Start,
        }
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn has_next_batch(&self) -> bool {
        self.state != PaginationState::Done
    }

    /// Request the next listing page. `Ok(None)` once the listing is exhausted.
    ///
    /// A response missing required fields is an error; the state is left
    /// untouched so nothing past it is requested.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<CategoryMember>>, ScrapeError> {
        let cmcontinue = match &self.state {
            PaginationState::Done => return Ok(None),
            PaginationState::Start => None,
            PaginationState::Continue(token) => Some(token.clone()),
        };

        let query = ListingQuery {
            category: self.category.clone(),
            cmcontinue,
        };

        let body = self.backend.category_members(&query).await?;
        let response: CategoryMembersResponse =
            serde_json::from_str(&body).map_err(|source| ScrapeError::MalformedResponse {
                request: describe(&query),
                source,
            })?;

        self.state = match response.continuation {
            Some(next) => PaginationState::Continue(next.cmcontinue),
            None => PaginationState::Done,
        };

        Ok(Some(response.query.categorymembers))
    }
}

fn describe(query: &ListingQuery) -> String {
    match &query.cmcontinue {
        Some(token) => format!("listing of {:?} (cmcontinue={})", query.category, token),
        None => format!("listing of {:?}", query.category),
    }
}
