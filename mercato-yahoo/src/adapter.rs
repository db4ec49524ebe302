use std::sync::Arc;

use async_trait::async_trait;
use mercato_core::MercatoError;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, USER_AGENT};
use url::Url;

use crate::models::{ChartEnvelope, ChartResult, FastQuote, QuoteResponseEnvelope, SearchEnvelope, SearchQuote};
use crate::normalize::api_error;

pub(crate) const NAME: &str = "mercato-yahoo";

/// Browser-like agent; Yahoo rejects the default reqwest agent on some edges.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";
/// Production host for quote and chart endpoints.
pub const DEFAULT_QUERY_BASE: &str = "https://query1.finance.yahoo.com";
/// Production host for the autocomplete endpoint.
pub const DEFAULT_SEARCH_BASE: &str = "https://query2.finance.yahoo.com";

/// Batch quote abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait YahooQuotes: Send + Sync {
    /// Fetch raw batch-quote rows for Yahoo-convention symbols.
    async fn fast(&self, symbols: &[String]) -> Result<Vec<FastQuote>, MercatoError>;
}

/// Chart abstraction, used for full quotes and for history.
#[async_trait]
pub trait YahooChart: Send + Sync {
    /// Fetch one chart result for a Yahoo-convention symbol.
    async fn chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResult, MercatoError>;
}

/// Autocomplete search abstraction.
#[async_trait]
pub trait YahooSearch: Send + Sync {
    /// Raw search hits for a free-text query.
    async fn search(&self, query: &str, limit: Option<usize>)
    -> Result<Vec<SearchQuote>, MercatoError>;
}

/// Production adapter speaking HTTPS to Yahoo via `reqwest`.
#[derive(Clone)]
pub struct HttpAdapter {
    http: reqwest::Client,
    query_base: String,
    search_base: String,
    user_agent: String,
}

impl Default for HttpAdapter {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl HttpAdapter {
    /// Adapter against the production hosts.
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            query_base: DEFAULT_QUERY_BASE.to_string(),
            search_base: DEFAULT_SEARCH_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Point every endpoint at one base URL (e.g. a local mock server).
    #[must_use]
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        self.query_base.clone_from(&base);
        self.search_base = base;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    fn url(base: &str, path: &[&str]) -> Result<Url, MercatoError> {
        let mut url = Url::parse(base)
            .map_err(|e| MercatoError::InvalidArg(format!("bad base url {base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| MercatoError::InvalidArg(format!("base url cannot have a path: {base}")))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    async fn get_text(&self, url: Url, what: &str) -> Result<String, MercatoError> {
        tracing::debug!(target: "mercato::yahoo", %url, "GET");
        let resp = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| MercatoError::connector(NAME, format!("request failed: {e}")))?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MercatoError::not_found(what.to_string()));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MercatoError::connector(NAME, "upstream rate limit (HTTP 429)"));
        }
        if !status.is_success() {
            return Err(MercatoError::connector(NAME, format!("HTTP {status}")));
        }
        resp.text()
            .await
            .map_err(|e| MercatoError::connector(NAME, format!("reading body failed: {e}")))
    }

    fn parse<T: serde::de::DeserializeOwned>(body: &str, what: &str) -> Result<T, MercatoError> {
        serde_json::from_str(body)
            .map_err(|e| MercatoError::Data(format!("malformed {what} payload: {e}")))
    }
}

#[async_trait]
impl YahooQuotes for HttpAdapter {
    async fn fast(&self, symbols: &[String]) -> Result<Vec<FastQuote>, MercatoError> {
        let mut url = Self::url(&self.query_base, &["v7", "finance", "quote"])?;
        url.query_pairs_mut().append_pair("symbols", &symbols.join(","));
        let body = self.get_text(url, "quote").await?;
        let env: QuoteResponseEnvelope = Self::parse(&body, "quote")?;
        if let Some(err) = env.quote_response.error {
            return Err(api_error(NAME, &err, &format!("quote for {}", symbols.join(","))));
        }
        Ok(env.quote_response.result)
    }
}

#[async_trait]
impl YahooChart for HttpAdapter {
    async fn chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResult, MercatoError> {
        let what = format!("chart for {symbol}");
        let mut url = Self::url(&self.query_base, &["v8", "finance", "chart", symbol])?;
        url.query_pairs_mut()
            .append_pair("range", range)
            .append_pair("interval", interval);
        let body = self.get_text(url, &what).await?;
        let env: ChartEnvelope = Self::parse(&body, "chart")?;
        if let Some(err) = env.chart.error {
            return Err(api_error(NAME, &err, &what));
        }
        env.chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| MercatoError::not_found(what))
    }
}

#[async_trait]
impl YahooSearch for HttpAdapter {
    async fn search(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SearchQuote>, MercatoError> {
        let mut url = Self::url(&self.search_base, &["v1", "finance", "search"])?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("q", query);
            if let Some(n) = limit {
                q.append_pair("quotesCount", &n.to_string());
            }
        }
        let body = self.get_text(url, "search").await?;
        let env: SearchEnvelope = Self::parse(&body, "search")?;
        Ok(env.quotes)
    }
}

impl dyn YahooQuotes {
    /// Build a `YahooQuotes` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YahooQuotes>
    where
        F: Send + Sync + 'static + Fn(Vec<String>) -> Result<Vec<FastQuote>, MercatoError>,
    {
        struct FnQuotes<F>(F);
        #[async_trait]
        impl<F> YahooQuotes for FnQuotes<F>
        where
            F: Send + Sync + 'static + Fn(Vec<String>) -> Result<Vec<FastQuote>, MercatoError>,
        {
            async fn fast(&self, symbols: &[String]) -> Result<Vec<FastQuote>, MercatoError> {
                (self.0)(symbols.to_vec())
            }
        }
        Arc::new(FnQuotes(f))
    }
}

impl dyn YahooChart {
    /// Build a `YahooChart` from a closure taking `(symbol, range, interval)` (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YahooChart>
    where
        F: Send + Sync + 'static + Fn(String, String, String) -> Result<ChartResult, MercatoError>,
    {
        struct FnChart<F>(F);
        #[async_trait]
        impl<F> YahooChart for FnChart<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(String, String, String) -> Result<ChartResult, MercatoError>,
        {
            async fn chart(
                &self,
                symbol: &str,
                range: &str,
                interval: &str,
            ) -> Result<ChartResult, MercatoError> {
                (self.0)(symbol.to_string(), range.to_string(), interval.to_string())
            }
        }
        Arc::new(FnChart(f))
    }
}

impl dyn YahooSearch {
    /// Build a `YahooSearch` from a closure over the raw query (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YahooSearch>
    where
        F: Send + Sync + 'static + Fn(&str) -> Result<Vec<SearchQuote>, MercatoError>,
    {
        struct FnSearch<F>(F);
        #[async_trait]
        impl<F> YahooSearch for FnSearch<F>
        where
            F: Send + Sync + 'static + Fn(&str) -> Result<Vec<SearchQuote>, MercatoError>,
        {
            async fn search(
                &self,
                query: &str,
                _limit: Option<usize>,
            ) -> Result<Vec<SearchQuote>, MercatoError> {
                (self.0)(query)
            }
        }
        Arc::new(FnSearch(f))
    }
}

/// Unsupported stand-ins for adapters a test does not care about.
pub(crate) struct Unavailable;

#[async_trait]
impl YahooQuotes for Unavailable {
    async fn fast(&self, _symbols: &[String]) -> Result<Vec<FastQuote>, MercatoError> {
        Err(MercatoError::connector(NAME, "quote adapter not configured"))
    }
}

#[async_trait]
impl YahooChart for Unavailable {
    async fn chart(&self, _: &str, _: &str, _: &str) -> Result<ChartResult, MercatoError> {
        Err(MercatoError::connector(NAME, "chart adapter not configured"))
    }
}

#[async_trait]
impl YahooSearch for Unavailable {
    async fn search(&self, _: &str, _: Option<usize>) -> Result<Vec<SearchQuote>, MercatoError> {
        Err(MercatoError::connector(NAME, "search adapter not configured"))
    }
}
