//! `quote-equity` -> canonical quote.

use chrono::{DateTime, Utc};
use mercato_core::{MercatoError, Quote, QuoteFields, Symbol, sessions};

use crate::models::EquityQuote;

const EXCHANGE: &str = "NSE";
const CURRENCY: &str = "INR";

/// Map an equity payload onto `symbol`.
///
/// The exchange reports `pChange` itself, but the canonical percent change is
/// always recomputed from `change` and `previousClose`.
///
/// # Errors
/// Returns `NotFound` when the payload has no price block (the API answers
/// unknown tickers with an empty object) and `Data` when the price is unusable.
pub fn equity_quote(
    symbol: &Symbol,
    payload: &EquityQuote,
    now: DateTime<Utc>,
) -> Result<Quote, MercatoError> {
    let Some(price) = payload.price_info.as_ref() else {
        return Err(MercatoError::not_found(format!("quote for {symbol}")));
    };
    let range = price.intra_day_high_low.as_ref();
    QuoteFields {
        name: payload
            .info
            .company_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        price: price.last_price,
        change: price.change,
        previous_close: price.previous_close,
        open: price.open,
        day_high: range.and_then(|r| r.max),
        day_low: range.and_then(|r| r.min),
        volume: price.total_traded_volume,
        market_cap: None,
        currency: Some(CURRENCY.to_string()),
        exchange: Some(EXCHANGE.to_string()),
        market_state: Some(sessions::infer_state(Some(EXCHANGE), Some(CURRENCY), now)),
    }
    .into_quote(symbol)
}
