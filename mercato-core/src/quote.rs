use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize;
use crate::{MercatoError, Symbol};

/// Trading session a quote was observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketState {
    /// Pre-market trading.
    Pre,
    /// Regular session.
    Regular,
    /// After-hours trading.
    Post,
    /// Market closed, or the provider did not say.
    #[default]
    Closed,
}

impl MarketState {
    /// Map a provider's session label onto the canonical set.
    ///
    /// Yahoo emits `PREPRE`/`POSTPOST` around the extended sessions; both fold
    /// into their neighbours. Anything unrecognized is treated as closed.
    #[must_use]
    pub fn from_provider(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "PRE" | "PREPRE" => Self::Pre,
            "REGULAR" | "OPEN" => Self::Regular,
            "POST" | "POSTPOST" => Self::Post,
            _ => Self::Closed,
        }
    }

    /// Canonical uppercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pre => "PRE",
            Self::Regular => "REGULAR",
            Self::Post => "POST",
            Self::Closed => "CLOSED",
        }
    }
}

impl FromStr for MarketState {
    type Err = MercatoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_provider(s))
    }
}

/// Canonical point-in-time quote.
///
/// Every connector normalizes into this shape, so every field is always
/// present. Missing numeric inputs become `0`; a missing name falls back to
/// the symbol. `change_percent` is expressed in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol the caller asked for.
    pub symbol: Symbol,
    /// Display name.
    pub name: String,
    /// Last traded price, always positive.
    pub price: f64,
    /// Absolute change versus the previous close.
    pub change: f64,
    /// Percent change versus the previous close.
    pub change_percent: f64,
    /// Previous session close.
    pub previous_close: f64,
    /// Session open.
    pub open: f64,
    /// Session high.
    pub day_high: f64,
    /// Session low.
    pub day_low: f64,
    /// Shares traded in the session.
    pub volume: u64,
    /// Market capitalization in `currency` units.
    pub market_cap: f64,
    /// ISO currency code.
    pub currency: String,
    /// Listing venue label as reported by the provider.
    pub exchange: String,
    /// Session the quote belongs to.
    pub market_state: MarketState,
    /// When this quote was resolved by the engine or connector.
    pub resolved_at: DateTime<Utc>,
}

/// Raw quote fields as a provider reports them, before canonicalization.
///
/// Provider normalizers fill what they can and hand the draft to
/// [`QuoteFields::into_quote`], which applies the shared defaulting and
/// derivation rules.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct QuoteFields {
    pub name: Option<String>,
    pub price: Option<f64>,
    /// Provider-reported absolute change, used only when it cannot be derived.
    pub change: Option<f64>,
    pub previous_close: Option<f64>,
    pub open: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub volume: Option<u64>,
    pub market_cap: Option<f64>,
    pub currency: Option<String>,
    pub exchange: Option<String>,
    pub market_state: Option<MarketState>,
}

impl QuoteFields {
    /// Canonicalize into a [`Quote`] for `symbol`.
    ///
    /// # Errors
    /// Returns `Data` when the price is missing, zero, negative, or not finite.
    pub fn into_quote(self, symbol: &Symbol) -> Result<Quote, MercatoError> {
        let price = normalize::finite(self.price)
            .filter(|p| *p > 0.0)
            .ok_or_else(|| MercatoError::Data(format!("no usable price for {symbol}")))?;
        let previous_close = normalize::or_zero(self.previous_close);
        let (change, change_percent) =
            normalize::derive_change(price, previous_close, normalize::finite(self.change));

        Ok(Quote {
            name: normalize::display_name([self.name.as_deref()], symbol),
            price,
            change,
            change_percent,
            previous_close,
            open: normalize::or_zero(self.open),
            day_high: normalize::or_zero(self.day_high),
            day_low: normalize::or_zero(self.day_low),
            volume: self.volume.unwrap_or(0),
            market_cap: normalize::or_zero(self.market_cap),
            currency: self.currency.unwrap_or_default(),
            exchange: self.exchange.unwrap_or_default(),
            market_state: self.market_state.unwrap_or_default(),
            resolved_at: Utc::now(),
            symbol: symbol.clone(),
        })
    }
}

/// Compact projection of a quote used in movers and sector listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoverEntry {
    /// Ticker.
    pub symbol: Symbol,
    /// Display name.
    pub name: String,
    /// Last price.
    pub price: f64,
    /// Absolute change.
    pub change: f64,
    /// Percent change.
    pub change_percent: f64,
    /// ISO currency code.
    pub currency: String,
}

impl From<&Quote> for MoverEntry {
    fn from(q: &Quote) -> Self {
        Self {
            symbol: q.symbol.clone(),
            name: q.name.clone(),
            price: q.price,
            change: q.change,
            change_percent: q.change_percent,
            currency: q.currency.clone(),
        }
    }
}
