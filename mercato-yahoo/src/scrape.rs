//! Last-resort quote source: the public Yahoo quote page.
//!
//! The page embeds live values in `<fin-streamer data-field=...>` elements.
//! Markup drift is expected; whenever the price element is missing the
//! strategy fails with `MercatoError::Data` so the engine can move on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mercato_core::connector::{ConnectorKey, MercatoConnector, QuoteProvider};
use mercato_core::normalize::parse_number;
use mercato_core::symbology::to_yahoo;
use mercato_core::{MercatoError, Quote, QuoteFields, Symbol, sessions};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, USER_AGENT};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::adapter::DEFAULT_USER_AGENT;
use crate::normalize::name_or_symbol;

const NAME: &str = "mercato-yahoo-scrape";
const DEFAULT_BASE: &str = "https://finance.yahoo.com";

/// Quote connector that parses the human-facing quote page.
#[derive(Clone)]
pub struct ScrapeConnector {
    http: reqwest::Client,
    base: String,
    user_agent: String,
}

impl Default for ScrapeConnector {
    fn default() -> Self {
        Self::new_default()
    }
}

impl ScrapeConnector {
    /// Static connector key for priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new(NAME);

    /// Scraper against the production site.
    #[must_use]
    pub fn new_default() -> Self {
        Self::new_with_client(reqwest::Client::new())
    }

    /// Scraper using a caller-supplied client.
    #[must_use]
    pub fn new_with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            base: DEFAULT_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Point the scraper at another host (e.g. a local mock server).
    #[must_use]
    pub fn with_base_url(mut self, base: &str) -> Self {
        self.base = base.trim_end_matches('/').to_string();
        self
    }

    fn page_url(&self, ysym: &str) -> Result<Url, MercatoError> {
        let mut url = Url::parse(&self.base)
            .map_err(|e| MercatoError::InvalidArg(format!("bad base url {}: {e}", self.base)))?;
        url.path_segments_mut()
            .map_err(|()| MercatoError::InvalidArg(format!("base url cannot have a path: {}", self.base)))?
            .pop_if_empty()
            .extend(["quote", ysym, ""]);
        Ok(url)
    }

    async fn fetch_page(&self, symbol: &Symbol, ysym: &str) -> Result<String, MercatoError> {
        let url = self.page_url(ysym)?;
        tracing::debug!(target: "mercato::yahoo", %url, "GET quote page");
        let resp = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "text/html")
            .send()
            .await
            .map_err(|e| MercatoError::connector(NAME, format!("request failed: {e}")))?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MercatoError::not_found(format!("quote page for {symbol}")));
        }
        if !status.is_success() {
            return Err(MercatoError::connector(NAME, format!("HTTP {status}")));
        }
        resp.text()
            .await
            .map_err(|e| MercatoError::connector(NAME, format!("reading body failed: {e}")))
    }
}

/// Parse a quote page into a `Quote` for `symbol`.
///
/// `ysym` is the Yahoo spelling used on the page, which is how the main
/// quote block is told apart from ticker strips for other symbols.
///
/// # Errors
/// Returns `Data` when no usable price can be found.
pub fn parse_quote_page(
    symbol: &Symbol,
    ysym: &str,
    html: &str,
    now: DateTime<Utc>,
) -> Result<Quote, MercatoError> {
    let doc = Html::parse_document(html);
    let price = streamer_value(&doc, "regularMarketPrice", ysym)?.ok_or_else(|| {
        MercatoError::Data(format!("no price element on quote page for {symbol}"))
    })?;
    let change = streamer_value(&doc, "regularMarketChange", ysym)?;
    let previous_close = streamer_value(&doc, "regularMarketPreviousClose", ysym)?;
    let open = streamer_value(&doc, "regularMarketOpen", ysym)?;
    let volume = streamer_value(&doc, "regularMarketVolume", ysym)?
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u64);
    let currency = currency_label(&doc);

    let heading = first_text(&doc, "h1")?;
    let name = heading.as_deref().map(|h| strip_ticker_suffix(h, ysym));

    QuoteFields {
        name: Some(name_or_symbol(name, symbol)),
        price: Some(price),
        change,
        previous_close,
        open,
        volume,
        market_state: Some(sessions::infer_state(None, currency.as_deref(), now)),
        currency,
        ..QuoteFields::default()
    }
    .into_quote(symbol)
}

fn selector(css: &str) -> Result<Selector, MercatoError> {
    Selector::parse(css).map_err(|e| MercatoError::Data(format!("bad selector {css}: {e}")))
}

fn element_number(el: ElementRef<'_>) -> Option<f64> {
    let attrs = el.value();
    attrs
        .attr("data-value")
        .or_else(|| attrs.attr("value"))
        .and_then(parse_number)
        .or_else(|| parse_number(&el.text().collect::<String>()))
}

// Prefer the element bound to our symbol; fall back to the first unbound one.
fn streamer_value(doc: &Html, field: &str, ysym: &str) -> Result<Option<f64>, MercatoError> {
    let sel = selector(&format!(r#"fin-streamer[data-field="{field}"]"#))?;
    let mut unbound = None;
    for el in doc.select(&sel) {
        let Some(v) = element_number(el) else {
            continue;
        };
        match el.value().attr("data-symbol") {
            Some(s) if s.eq_ignore_ascii_case(ysym) => return Ok(Some(v)),
            None if unbound.is_none() => unbound = Some(v),
            _ => {}
        }
    }
    Ok(unbound)
}

fn first_text(doc: &Html, css: &str) -> Result<Option<String>, MercatoError> {
    let sel = selector(css)?;
    Ok(doc
        .select(&sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|t| !t.is_empty()))
}

/// `"Apple Inc. (AAPL)"` -> `"Apple Inc."`
fn strip_ticker_suffix<'a>(heading: &'a str, ysym: &str) -> &'a str {
    let suffix = format!("({ysym})");
    heading
        .trim()
        .strip_suffix(suffix.as_str())
        .map_or(heading.trim(), str::trim_end)
}

/// Reads the `"Currency in USD"` label printed under the quote header.
fn currency_label(doc: &Html) -> Option<String> {
    const MARKER: &str = "Currency in ";
    doc.root_element().text().find_map(|chunk| {
        let rest = &chunk[chunk.find(MARKER)? + MARKER.len()..];
        let code: String = rest
            .chars()
            .take_while(char::is_ascii_alphabetic)
            .collect();
        (code.len() == 3).then(|| code.to_ascii_uppercase())
    })
}

#[async_trait]
impl QuoteProvider for ScrapeConnector {
    #[tracing::instrument(
        name = "mercato_yahoo::scrape_quote",
        skip(self),
        fields(symbol = %symbol),
    )]
    async fn quote(&self, symbol: &Symbol) -> Result<Quote, MercatoError> {
        let ysym = to_yahoo(symbol);
        let html = self.fetch_page(symbol, &ysym).await?;
        parse_quote_page(symbol, &ysym, &html, Utc::now())
    }
}

impl MercatoConnector for ScrapeConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance (web)"
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }
}
