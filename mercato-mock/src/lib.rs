use std::time::Duration;

use async_trait::async_trait;
use mercato_core::connector::{HistoryProvider, MercatoConnector, QuoteProvider, SearchProvider};
use mercato_core::{
    HistoryPoint, HistoryRequest, MercatoError, Quote, SearchRequest, SearchResult, Symbol,
};

mod fixtures;

/// Mock connector for CI-safe demos and tests. Provides deterministic data from static fixtures.
pub struct MockConnector {
    name: &'static str,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Connector registered as `mercato-mock`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: "mercato-mock",
        }
    }

    /// Same fixtures under another connector name, for multi-provider setups.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// Symbols with quote fixtures.
    pub fn fixture_symbols() -> impl Iterator<Item = &'static str> {
        fixtures::quotes::symbols()
    }

    fn not_found(what: &str) -> MercatoError {
        MercatoError::not_found(what.to_string())
    }

    async fn maybe_fail_or_timeout(
        &self,
        symbol: &Symbol,
        capability: &'static str,
    ) -> Result<(), MercatoError> {
        match symbol.as_str() {
            "FAIL" => Err(MercatoError::connector(
                self.name,
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                // Short enough not to slow tests; long enough to trip a tight engine timeout.
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl MercatoConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }

    fn as_search_provider(&self) -> Option<&dyn SearchProvider> {
        Some(self as &dyn SearchProvider)
    }
}

#[async_trait]
impl QuoteProvider for MockConnector {
    async fn quote(&self, symbol: &Symbol) -> Result<Quote, MercatoError> {
        self.maybe_fail_or_timeout(symbol, "quote").await?;
        fixtures::quotes::by_symbol(symbol)
            .ok_or_else(|| Self::not_found(&format!("quote for {symbol}")))
    }
}

#[async_trait]
impl HistoryProvider for MockConnector {
    async fn history(
        &self,
        symbol: &Symbol,
        req: HistoryRequest,
    ) -> Result<Vec<HistoryPoint>, MercatoError> {
        self.maybe_fail_or_timeout(symbol, "history").await?;
        fixtures::history::by_symbol(symbol, req)
            .ok_or_else(|| Self::not_found(&format!("history for {symbol}")))
    }
}

#[async_trait]
impl SearchProvider for MockConnector {
    async fn search(&self, req: &SearchRequest) -> Result<Vec<SearchResult>, MercatoError> {
        Ok(fixtures::search::search(req))
    }
}
