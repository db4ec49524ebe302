//! mercato-yahoo
//!
//! Public connectors that implement `MercatoConnector` on top of Yahoo
//! Finance's JSON endpoints (`YahooConnector`) and its public quote pages
//! (`ScrapeConnector`).
#![warn(missing_docs)]

/// Adapter definitions and the production `reqwest` adapter.
pub mod adapter;
mod builder;
/// Raw JSON payload models.
pub mod models;
/// Payload to canonical record mappings.
pub mod normalize;
/// Quote-page scraping fallback.
pub mod scrape;

use std::collections::HashMap;
use std::sync::Arc;

use adapter::{HttpAdapter, Unavailable, YahooChart, YahooQuotes, YahooSearch};
use async_trait::async_trait;
use chrono::Utc;
use mercato_core::connector::{
    ConnectorKey, HistoryProvider, MercatoConnector, QuoteProvider, SearchProvider,
};
use mercato_core::symbology::to_yahoo;
use mercato_core::{
    HistoryPoint, HistoryRequest, MercatoError, Quote, SearchRequest, SearchResult, Symbol,
};

pub use builder::YahooConnectorBuilder;
pub use scrape::ScrapeConnector;

/// Range/interval used when a quote has to be rebuilt from chart metadata.
const FULL_QUOTE_RANGE: &str = "1d";
const FULL_QUOTE_INTERVAL: &str = "1d";

/// Public connector type. Production users construct it with
/// `YahooConnector::new_default()` or through [`YahooConnector::builder`].
pub struct YahooConnector {
    quotes: Arc<dyn YahooQuotes>,
    chart: Arc<dyn YahooChart>,
    search: Arc<dyn YahooSearch>,
}

impl YahooConnector {
    /// Static connector key for priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new(adapter::NAME);

    /// Build against the production hosts with a fresh `reqwest::Client`.
    #[must_use]
    pub fn new_default() -> Self {
        Self::from_http(HttpAdapter::default())
    }

    /// Build with a caller-supplied client (proxies, custom TLS, pooling).
    #[must_use]
    pub fn new_with_client(client: reqwest::Client) -> Self {
        Self::from_http(HttpAdapter::new(client))
    }

    /// Build against an alternative host, e.g. a local mock server.
    #[must_use]
    pub fn with_base_url(base: &str) -> Self {
        Self::from_http(HttpAdapter::default().with_base_url(base))
    }

    /// Build from a configured HTTP adapter.
    #[must_use]
    pub fn from_http(http: HttpAdapter) -> Self {
        let shared = Arc::new(http);
        Self {
            quotes: shared.clone(),
            chart: shared.clone(),
            search: shared,
        }
    }

    /// Build from individual adapters. Capabilities passed as `None` fail
    /// with a connector error when called.
    #[must_use]
    pub fn from_adapters(
        quotes: Option<Arc<dyn YahooQuotes>>,
        chart: Option<Arc<dyn YahooChart>>,
        search: Option<Arc<dyn YahooSearch>>,
    ) -> Self {
        Self {
            quotes: quotes.unwrap_or_else(|| Arc::new(Unavailable)),
            chart: chart.unwrap_or_else(|| Arc::new(Unavailable)),
            search: search.unwrap_or_else(|| Arc::new(Unavailable)),
        }
    }

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("delisted")
    }

    fn normalize_error(e: MercatoError, what: &str) -> MercatoError {
        match e {
            MercatoError::Connector { msg, .. } if Self::looks_like_not_found(&msg) => {
                MercatoError::not_found(what.to_string())
            }
            MercatoError::Other(msg) => MercatoError::connector(adapter::NAME, msg),
            other => other,
        }
    }

    async fn fast_quote(&self, symbol: &Symbol, ysym: &str) -> Result<Quote, MercatoError> {
        let rows = self.quotes.fast(&[ysym.to_string()]).await?;
        let row = rows
            .iter()
            .find(|r| r.symbol.eq_ignore_ascii_case(ysym))
            .ok_or_else(|| MercatoError::not_found(format!("quote for {symbol}")))?;
        normalize::fast_quote(symbol, row)
    }

    async fn full_quote(&self, symbol: &Symbol, ysym: &str) -> Result<Quote, MercatoError> {
        let chart = self
            .chart
            .chart(ysym, FULL_QUOTE_RANGE, FULL_QUOTE_INTERVAL)
            .await?;
        normalize::chart_quote(symbol, &chart, Utc::now())
    }
}

impl Default for YahooConnector {
    fn default() -> Self {
        Self::new_default()
    }
}

#[async_trait]
impl QuoteProvider for YahooConnector {
    #[tracing::instrument(
        name = "mercato_yahoo::quote",
        skip(self),
        fields(symbol = %symbol),
    )]
    async fn quote(&self, symbol: &Symbol) -> Result<Quote, MercatoError> {
        let what = format!("quote for {symbol}");
        let ysym = to_yahoo(symbol);
        match self.fast_quote(symbol, &ysym).await {
            Ok(q) => Ok(q),
            Err(fast_err) => {
                tracing::debug!(
                    yahoo_symbol = %ysym,
                    error = %fast_err,
                    "fast quote failed; trying chart metadata"
                );
                self.full_quote(symbol, &ysym)
                    .await
                    .map_err(|e| Self::normalize_error(e, &what))
            }
        }
    }

    #[tracing::instrument(
        name = "mercato_yahoo::quotes",
        skip(self, symbols),
        fields(count = symbols.len()),
    )]
    async fn quotes(&self, symbols: &[Symbol]) -> Result<Vec<Quote>, MercatoError> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }
        let translated: Vec<String> = symbols.iter().map(to_yahoo).collect();
        let rows = self
            .quotes
            .fast(&translated)
            .await
            .map_err(|e| Self::normalize_error(e, "batch quote"))?;
        let by_symbol: HashMap<String, _> = rows
            .iter()
            .map(|r| (r.symbol.to_ascii_uppercase(), r))
            .collect();

        let mut out = Vec::with_capacity(symbols.len());
        for (symbol, ysym) in symbols.iter().zip(&translated) {
            let Some(row) = by_symbol.get(&ysym.to_ascii_uppercase()) else {
                continue;
            };
            match normalize::fast_quote(symbol, row) {
                Ok(q) => out.push(q),
                Err(e) => tracing::debug!(symbol = %symbol, error = %e, "dropping unusable row"),
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl HistoryProvider for YahooConnector {
    #[tracing::instrument(
        name = "mercato_yahoo::history",
        skip(self),
        fields(symbol = %symbol, period = %req.period, interval = %req.interval),
    )]
    async fn history(
        &self,
        symbol: &Symbol,
        req: HistoryRequest,
    ) -> Result<Vec<HistoryPoint>, MercatoError> {
        let ysym = to_yahoo(symbol);
        let chart = self
            .chart
            .chart(&ysym, req.period.as_str(), req.interval.as_str())
            .await
            .map_err(|e| Self::normalize_error(e, &format!("history for {symbol}")))?;
        Ok(normalize::chart_history(&chart))
    }
}

#[async_trait]
impl SearchProvider for YahooConnector {
    #[tracing::instrument(
        name = "mercato_yahoo::search",
        skip(self, req),
        fields(query = %req.query()),
    )]
    async fn search(&self, req: &SearchRequest) -> Result<Vec<SearchResult>, MercatoError> {
        let hits = self
            .search
            .search(req.query(), req.limit())
            .await
            .map_err(|e| Self::normalize_error(e, &format!("search for {}", req.query())))?;
        let mut results: Vec<SearchResult> =
            hits.iter().filter_map(normalize::search_result).collect();
        if let Some(limit) = req.limit() {
            results.truncate(limit);
        }
        Ok(results)
    }
}

impl MercatoConnector for YahooConnector {
    fn name(&self) -> &'static str {
        adapter::NAME
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
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
