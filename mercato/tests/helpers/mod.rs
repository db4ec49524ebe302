#![allow(dead_code)]

// Re-export helpers so tests can `use helpers::*;`
pub mod mock_connector;

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use mercato_core::{HistoryPoint, MercatoError, Quote, QuoteFields, SearchResult, Symbol};
pub use mock_connector::{MockConnector, MockConnectorBuilder};

/// Common symbol constants used across tests.
pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";
pub const TSLA: &str = "TSLA";
pub const TCS: &str = "TCS.NS";

/// Parse a static test symbol.
pub fn sym(s: &str) -> Symbol {
    Symbol::new(s).expect("valid static test symbol")
}

/// Quote priced at `price` against a previous close of 100, so the percent
/// change equals `price - 100`.
pub fn quote_at(symbol: &str, price: f64) -> Quote {
    QuoteFields {
        name: Some(format!("{symbol} Corp")),
        price: Some(price),
        previous_close: Some(100.0),
        currency: Some("USD".into()),
        ..QuoteFields::default()
    }
    .into_quote(&sym(symbol))
    .expect("positive test price")
}

/// Quote whose percent change is `pct`.
pub fn quote_with_change(symbol: &str, pct: f64) -> Quote {
    quote_at(symbol, 100.0 + pct)
}

/// Daily bars with increasing timestamps.
pub fn bars(n: usize, close: f64) -> Vec<HistoryPoint> {
    (0..n)
        .map(|i| HistoryPoint {
            timestamp: DateTime::<Utc>::from_timestamp(1_704_067_200 + 86_400 * i as i64, 0)
                .expect("valid timestamp"),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        })
        .collect()
}

pub fn hit(symbol: &str, name: &str) -> SearchResult {
    SearchResult {
        symbol: symbol.to_string(),
        name: name.to_string(),
        exchange: "NMS".to_string(),
        kind: "EQUITY".to_string(),
    }
}

/// Connector builder that quotes every symbol at `price`.
pub fn m_quote(name: &'static str, price: f64) -> MockConnectorBuilder {
    MockConnector::builder()
        .name(name)
        .with_quote_fn(move |s| Ok(quote_at(s.as_str(), price)))
}

/// Connector builder whose every quote fails with a connector error.
pub fn m_failing(name: &'static str) -> MockConnectorBuilder {
    MockConnector::builder()
        .name(name)
        .with_quote_fn(move |_s| Err(MercatoError::connector(name, "HTTP 503")))
}

/// Connector builder that knows no symbol at all.
pub fn m_not_found(name: &'static str) -> MockConnectorBuilder {
    MockConnector::builder()
        .name(name)
        .with_quote_fn(|s| Err(MercatoError::not_found(format!("quote for {s}"))))
}

/// Captures formatted `tracing` output for assertions on logged failures.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Install as the thread's default subscriber until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
