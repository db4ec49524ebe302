//! mercato-nse
//!
//! Regional connector that implements `MercatoConnector` quotes on top of the
//! National Stock Exchange of India's public JSON API.
#![warn(missing_docs)]

/// Raw JSON payload models.
pub mod models;
/// Payload to canonical record mapping.
pub mod normalize;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mercato_core::connector::{ConnectorKey, MercatoConnector, QuoteProvider};
use mercato_core::symbology::to_nse;
use mercato_core::{CooldownConfig, MercatoError, Quote, Symbol};
use mercato_middleware::{ConnectorBuilder, CooldownLimiter};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use url::Url;

use crate::models::EquityQuote;

const NAME: &str = "mercato-nse";
const DEFAULT_BASE: &str = "https://www.nseindia.com";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Quote connector for NSE-listed equities.
#[derive(Clone)]
pub struct NseConnector {
    http: reqwest::Client,
    base: String,
}

impl Default for NseConnector {
    fn default() -> Self {
        Self::new_default()
    }
}

impl NseConnector {
    /// Static connector key for priority configuration and limiter slots.
    pub const KEY: ConnectorKey = ConnectorKey::new(NAME);

    /// Connector against the production host.
    #[must_use]
    pub fn new_default() -> Self {
        Self::new_with_client(reqwest::Client::new())
    }

    /// Connector using a caller-supplied client.
    #[must_use]
    pub fn new_with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            base: DEFAULT_BASE.to_string(),
        }
    }

    /// Point the connector at another host (e.g. a local mock server).
    #[must_use]
    pub fn with_base_url(mut self, base: &str) -> Self {
        self.base = base.trim_end_matches('/').to_string();
        self
    }

    /// Builder gated on `limiter` with the default regional cooldown.
    ///
    /// Every symbol routed here shares one clock, keyed by [`Self::KEY`].
    #[must_use]
    pub fn rate_limited(limiter: Arc<CooldownLimiter>) -> ConnectorBuilder {
        Self::rate_limited_with(limiter, CooldownConfig::default())
    }

    /// Builder gated on `limiter` with an explicit cooldown.
    #[must_use]
    pub fn rate_limited_with(
        limiter: Arc<CooldownLimiter>,
        config: CooldownConfig,
    ) -> ConnectorBuilder {
        let raw: Arc<dyn MercatoConnector> = Arc::new(Self::new_default());
        ConnectorBuilder::new(raw).with_cooldown(limiter, config)
    }

    fn quote_url(&self, ticker: &str) -> Result<Url, MercatoError> {
        let mut url = Url::parse(&self.base)
            .map_err(|e| MercatoError::InvalidArg(format!("bad base url {}: {e}", self.base)))?;
        url.path_segments_mut()
            .map_err(|()| MercatoError::InvalidArg(format!("base url cannot have a path: {}", self.base)))?
            .pop_if_empty()
            .extend(["api", "quote-equity"]);
        url.query_pairs_mut().append_pair("symbol", ticker);
        Ok(url)
    }

    async fn fetch(&self, symbol: &Symbol, ticker: &str) -> Result<EquityQuote, MercatoError> {
        let url = self.quote_url(ticker)?;
        tracing::debug!(target: "mercato::nse", %url, "GET");
        let resp = self
            .http
            .get(url)
            .header(USER_AGENT, DEFAULT_USER_AGENT)
            .header(ACCEPT, "application/json")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(REFERER, format!("{}/get-quotes/equity?symbol={ticker}", self.base))
            .send()
            .await
            .map_err(|e| MercatoError::connector(NAME, format!("request failed: {e}")))?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MercatoError::not_found(format!("quote for {symbol}")));
        }
        if !status.is_success() {
            return Err(MercatoError::connector(NAME, format!("HTTP {status}")));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| MercatoError::connector(NAME, format!("reading body failed: {e}")))?;
        serde_json::from_str(&body)
            .map_err(|e| MercatoError::Data(format!("malformed quote-equity payload: {e}")))
    }
}

#[async_trait]
impl QuoteProvider for NseConnector {
    #[tracing::instrument(name = "mercato_nse::quote", skip(self), fields(symbol = %symbol))]
    async fn quote(&self, symbol: &Symbol) -> Result<Quote, MercatoError> {
        let Some(ticker) = to_nse(symbol) else {
            return Err(MercatoError::unsupported(format!("quote for non-NSE symbol {symbol}")));
        };
        let payload = self.fetch(symbol, &ticker).await?;
        normalize::equity_quote(symbol, &payload, Utc::now())
    }
}

impl MercatoConnector for NseConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "National Stock Exchange of India"
    }

    fn supports_symbol(&self, symbol: &Symbol) -> bool {
        to_nse(symbol).is_some()
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }
}
