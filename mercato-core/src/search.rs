use serde::{Deserialize, Serialize};

use crate::MercatoError;

/// One instrument match returned by a symbol search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    /// Provider ticker, e.g. `RELIANCE.NS`.
    pub symbol: String,
    /// Short or long display name; the ticker when the provider has neither.
    pub name: String,
    /// Listing venue code.
    pub exchange: String,
    /// Instrument type as reported (`EQUITY`, `ETF`, `INDEX`, ...).
    #[serde(rename = "type")]
    pub kind: String,
}

/// Validated free-text search request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchRequest {
    query: String,
    limit: Option<usize>,
}

impl SearchRequest {
    /// Build a request from caller input.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the query is blank.
    pub fn new(query: &str) -> Result<Self, MercatoError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MercatoError::InvalidArg("search query must not be empty".into()));
        }
        Ok(Self {
            query: query.to_string(),
            limit: None,
        })
    }

    /// Cap the number of results requested from providers.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Trimmed query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Result cap, if any.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }
}
