#![allow(dead_code)]
#![allow(clippy::type_complexity)]
#![allow(clippy::missing_const_for_fn)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mercato_core::connector::{HistoryProvider, QuoteProvider, SearchProvider};
use mercato_core::{
    HistoryPoint, HistoryRequest, MercatoConnector, MercatoError, Quote, SearchRequest,
    SearchResult, Symbol,
};
use tokio::time::{Duration, sleep};

/// Scripted in-memory connector used by integration tests.
///
/// Capabilities are advertised only when the matching closure is set. Every
/// call (whatever its outcome) bumps `calls`.
pub struct MockConnector {
    pub name: &'static str,
    pub delay_ms: u64,
    pub calls: Arc<AtomicUsize>,
    pub supports: Option<Arc<dyn Fn(&Symbol) -> bool + Send + Sync>>,

    pub quote_fn: Option<Arc<dyn Fn(&Symbol) -> Result<Quote, MercatoError> + Send + Sync>>,
    pub history_fn: Option<
        Arc<dyn Fn(&Symbol, HistoryRequest) -> Result<Vec<HistoryPoint>, MercatoError> + Send + Sync>,
    >,
    pub search_fn:
        Option<Arc<dyn Fn(&SearchRequest) -> Result<Vec<SearchResult>, MercatoError> + Send + Sync>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self {
            name: "default_mock",
            delay_ms: 0,
            calls: Arc::new(AtomicUsize::new(0)),
            supports: None,
            quote_fn: None,
            history_fn: None,
            search_fn: None,
        }
    }
}

impl MockConnector {
    pub fn builder() -> MockConnectorBuilder {
        MockConnectorBuilder::new()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

#[async_trait]
impl QuoteProvider for MockConnector {
    async fn quote(&self, s: &Symbol) -> Result<Quote, MercatoError> {
        self.enter().await;
        match &self.quote_fn {
            Some(f) => (f)(s),
            None => Err(MercatoError::unsupported("quote")),
        }
    }
}

#[async_trait]
impl HistoryProvider for MockConnector {
    async fn history(
        &self,
        s: &Symbol,
        r: HistoryRequest,
    ) -> Result<Vec<HistoryPoint>, MercatoError> {
        self.enter().await;
        match &self.history_fn {
            Some(f) => (f)(s, r),
            None => Err(MercatoError::unsupported("history")),
        }
    }
}

#[async_trait]
impl SearchProvider for MockConnector {
    async fn search(&self, req: &SearchRequest) -> Result<Vec<SearchResult>, MercatoError> {
        self.enter().await;
        match &self.search_fn {
            Some(f) => (f)(req),
            None => Err(MercatoError::unsupported("search")),
        }
    }
}

impl MercatoConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Test"
    }

    fn supports_symbol(&self, symbol: &Symbol) -> bool {
        self.supports.as_ref().is_none_or(|f| (f)(symbol))
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        self.quote_fn.as_ref().map(|_| self as &dyn QuoteProvider)
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        self.history_fn.as_ref().map(|_| self as &dyn HistoryProvider)
    }

    fn as_search_provider(&self) -> Option<&dyn SearchProvider> {
        self.search_fn.as_ref().map(|_| self as &dyn SearchProvider)
    }
}

pub struct MockConnectorBuilder {
    inner: MockConnector,
}

impl Default for MockConnectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnectorBuilder {
    pub fn new() -> Self {
        Self {
            inner: MockConnector::default(),
        }
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.inner.name = name;
        self
    }

    pub fn delay(mut self, ms: u64) -> Self {
        self.inner.delay_ms = ms;
        self
    }

    pub fn supports<F>(mut self, f: F) -> Self
    where
        F: Fn(&Symbol) -> bool + Send + Sync + 'static,
    {
        self.inner.supports = Some(Arc::new(f));
        self
    }

    // Quotes
    pub fn with_quote_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Symbol) -> Result<Quote, MercatoError> + Send + Sync + 'static,
    {
        self.inner.quote_fn = Some(Arc::new(f));
        self
    }

    // History
    pub fn with_history_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Symbol, HistoryRequest) -> Result<Vec<HistoryPoint>, MercatoError>
            + Send
            + Sync
            + 'static,
    {
        self.inner.history_fn = Some(Arc::new(f));
        self
    }

    pub fn returns_history_ok(self, bars: Vec<HistoryPoint>) -> Self {
        self.with_history_fn(move |_s, _r| Ok(bars.clone()))
    }

    // Search
    pub fn with_search_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&SearchRequest) -> Result<Vec<SearchResult>, MercatoError> + Send + Sync + 'static,
    {
        self.inner.search_fn = Some(Arc::new(f));
        self
    }

    pub fn returns_search_ok(self, hits: Vec<SearchResult>) -> Self {
        self.with_search_fn(move |_r| Ok(hits.clone()))
    }

    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(self.inner)
    }
}
