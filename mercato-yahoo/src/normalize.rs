//! Yahoo payload -> canonical record mappings.

use chrono::{DateTime, Utc};
use mercato_core::normalize::display_name;
use mercato_core::timeseries::tidy_series;
use mercato_core::{
    HistoryPoint, MarketState, MercatoError, Quote, QuoteFields, SearchResult, Symbol, sessions,
};

use crate::models::{ApiError, ChartResult, FastQuote, SearchQuote};

fn non_blank(s: Option<&String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Map one batch-endpoint row onto `symbol`.
///
/// # Errors
/// Returns `Data` when the row carries no usable price.
pub fn fast_quote(symbol: &Symbol, row: &FastQuote) -> Result<Quote, MercatoError> {
    QuoteFields {
        name: non_blank(row.short_name.as_ref()).or_else(|| non_blank(row.long_name.as_ref())),
        price: row.regular_market_price,
        change: row.regular_market_change,
        previous_close: row.regular_market_previous_close,
        open: row.regular_market_open,
        day_high: row.regular_market_day_high,
        day_low: row.regular_market_day_low,
        volume: row.regular_market_volume,
        market_cap: row.market_cap,
        currency: non_blank(row.currency.as_ref()),
        exchange: non_blank(row.full_exchange_name.as_ref())
            .or_else(|| non_blank(row.exchange.as_ref())),
        market_state: row.market_state.as_deref().map(MarketState::from_provider),
    }
    .into_quote(symbol)
}

/// Map chart metadata (plus the first bar's open) onto `symbol`.
///
/// The chart endpoint carries no session label, so the state is inferred from
/// the exchange's trading hours at `now`.
///
/// # Errors
/// Returns `Data` when the metadata carries no usable price.
pub fn chart_quote(
    symbol: &Symbol,
    chart: &ChartResult,
    now: DateTime<Utc>,
) -> Result<Quote, MercatoError> {
    let meta = &chart.meta;
    let open = chart
        .indicators
        .quote
        .first()
        .and_then(|q| q.open.iter().flatten().next().copied());
    let exchange = non_blank(meta.full_exchange_name.as_ref())
        .or_else(|| non_blank(meta.exchange_name.as_ref()));
    let state = sessions::infer_state(
        meta.exchange_name.as_deref(),
        meta.currency.as_deref(),
        now,
    );
    QuoteFields {
        name: non_blank(meta.short_name.as_ref()).or_else(|| non_blank(meta.long_name.as_ref())),
        price: meta.regular_market_price,
        change: None,
        previous_close: meta.previous_close.or(meta.chart_previous_close),
        open,
        day_high: meta.regular_market_day_high,
        day_low: meta.regular_market_day_low,
        volume: meta.regular_market_volume,
        market_cap: None,
        currency: non_blank(meta.currency.as_ref()),
        exchange,
        market_state: Some(state),
    }
    .into_quote(symbol)
}

/// Zip the column arrays into bars. Rows without a close are skipped; missing
/// open/high/low fall back to the close and missing volume to zero.
#[must_use]
pub fn chart_history(chart: &ChartResult) -> Vec<HistoryPoint> {
    let Some(cols) = chart.indicators.quote.first() else {
        return Vec::new();
    };
    let at = |v: &[Option<f64>], i: usize| v.get(i).copied().flatten();
    let points = chart
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            let close = at(&cols.close, i)?;
            Some(HistoryPoint {
                timestamp: DateTime::from_timestamp(*ts, 0)?,
                open: at(&cols.open, i).unwrap_or(close),
                high: at(&cols.high, i).unwrap_or(close),
                low: at(&cols.low, i).unwrap_or(close),
                close,
                volume: cols.volume.get(i).copied().flatten().unwrap_or(0),
            })
        })
        .collect();
    tidy_series(points)
}

/// Map a search hit; hits without a symbol are dropped.
#[must_use]
pub fn search_result(hit: &SearchQuote) -> Option<SearchResult> {
    let symbol = non_blank(hit.symbol.as_ref())?;
    let name = [hit.short_name.as_deref(), hit.long_name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(&symbol)
        .to_string();
    Some(SearchResult {
        name,
        exchange: non_blank(hit.exchange.as_ref()).unwrap_or_default(),
        kind: non_blank(hit.quote_type.as_ref()).unwrap_or_default(),
        symbol,
    })
}

/// Yahoo's embedded API error: "Not Found" codes become `NotFound`, the rest
/// connector errors.
#[must_use]
pub fn api_error(connector: &'static str, err: &ApiError, what: &str) -> MercatoError {
    let code = err.code.as_deref().unwrap_or_default();
    let description = err.description.as_deref().unwrap_or_default();
    if code.eq_ignore_ascii_case("not found") || description.to_ascii_lowercase().contains("no data")
    {
        MercatoError::not_found(what.to_string())
    } else {
        MercatoError::connector(connector, format!("{code}: {description}"))
    }
}

/// Fallback display name when only a symbol is known.
#[must_use]
pub fn name_or_symbol(name: Option<&str>, symbol: &Symbol) -> String {
    display_name([name], symbol)
}
