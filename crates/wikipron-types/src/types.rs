use std::fmt;

use serde::{Deserialize, Serialize};

/// One scraped word and its pronunciation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPronPair {
    pub word: String,
    pub pron: String,
}

impl WordPronPair {
    pub fn new(word: impl Into<String>, pron: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pron: pron.into(),
        }
    }
}

/// Tab-separated, the way the output file stores it
impl fmt::Display for WordPronPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.word, self.pron)
    }
}

/// One entry of a category listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMember {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub ns: Option<i64>,
    /// Term as stored by the wiki, may contain reserved URL characters
    pub title: String,
    /// ISO-8601 creation timestamp, e.g. `2020-01-01T12:00:00Z`
    pub timestamp: String,
}

/// Body of `action=query&list=categorymembers`
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryMembersResponse {
    pub query: CategoryMembersQuery,
    #[serde(rename = "continue", default)]
    pub continuation: Option<Continuation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryMembersQuery {
    pub categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Continuation {
    pub cmcontinue: String,
}

impl CategoryMembersResponse {
    /// Continuation token for the next listing request, if any
    pub fn next_token(&self) -> Option<&str> {
        self.continuation.as_ref().map(|c| c.cmcontinue.as_str())
    }
}

/// A fetched word page
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub url: String,
    pub html: String,
}
