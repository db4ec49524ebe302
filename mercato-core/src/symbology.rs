//! Symbol translation between the canonical form and provider conventions.
//!
//! Canonical symbols keep whatever suffix the caller used. Yahoo wants
//! `.NS`/`.BO` suffixes and caret-prefixed index codes; the NSE equity API wants
//! the bare ticker.

use crate::Symbol;

/// Local-market equities recognised without a suffix.
pub const LOCAL_EQUITIES: &[&str] = &[
    "RELIANCE",
    "TCS",
    "HDFCBANK",
    "INFY",
    "ICICIBANK",
    "HINDUNILVR",
    "ITC",
    "SBIN",
    "BHARTIARTL",
    "KOTAKBANK",
    "LT",
    "AXISBANK",
    "ASIANPAINT",
    "MARUTI",
    "TITAN",
    "SUNPHARMA",
    "BAJFINANCE",
    "WIPRO",
    "HCLTECH",
    "ULTRACEMCO",
    "TECHM",
    "APOLLOHOSP",
    "MAXHEALTH",
    "FORTIS",
    "DRREDDY",
    "CIPLA",
    "DIVISLAB",
    "LUPIN",
    "TATAMOTORS",
    "ADANIENT",
];

/// Friendly index names and the caret codes providers expect.
pub const INDEX_ALIASES: &[(&str, &str)] = &[
    ("NIFTY", "^NSEI"),
    ("NIFTY50", "^NSEI"),
    ("SENSEX", "^BSESN"),
    ("BANKNIFTY", "^NSEBANK"),
    ("NIFTYBANK", "^NSEBANK"),
    ("NIFTYIT", "^CNXIT"),
    ("SPX", "^GSPC"),
    ("SP500", "^GSPC"),
    ("DOW", "^DJI"),
    ("DJIA", "^DJI"),
    ("NASDAQ", "^IXIC"),
    ("RUSSELL2000", "^RUT"),
];

/// Indian venue a symbol trades on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalVenue {
    /// National Stock Exchange of India.
    Nse,
    /// Bombay Stock Exchange.
    Bse,
}

fn split_suffix(s: &str) -> (&str, Option<&str>) {
    match s.rsplit_once('.') {
        Some((base, suffix)) if !base.is_empty() => (base, Some(suffix)),
        _ => (s, None),
    }
}

/// Venue for local symbols; `None` for everything else, indices included.
#[must_use]
pub fn local_venue(symbol: &Symbol) -> Option<LocalVenue> {
    match split_suffix(symbol.as_str()) {
        (_, Some("NS" | "NSE")) => Some(LocalVenue::Nse),
        (_, Some("BO" | "BSE")) => Some(LocalVenue::Bse),
        (base, None) if LOCAL_EQUITIES.contains(&base) => Some(LocalVenue::Nse),
        _ => None,
    }
}

/// Translate to Yahoo's convention.
///
/// Applies index aliases, rewrites `.NSE`/`.BSE` to `.NS`/`.BO`, and appends
/// `.NS` to bare known local tickers. Everything else passes through.
#[must_use]
pub fn to_yahoo(symbol: &Symbol) -> String {
    let s = symbol.as_str();
    if let Some((_, code)) = INDEX_ALIASES.iter().find(|(alias, _)| *alias == s) {
        return (*code).to_string();
    }
    match split_suffix(s) {
        (base, Some("NSE")) => format!("{base}.NS"),
        (base, Some("BSE")) => format!("{base}.BO"),
        (base, None) if LOCAL_EQUITIES.contains(&base) => format!("{base}.NS"),
        _ => s.to_string(),
    }
}

/// Bare ticker for the NSE equity API, for NSE-listed equities only.
#[must_use]
pub fn to_nse(symbol: &Symbol) -> Option<String> {
    match local_venue(symbol)? {
        LocalVenue::Nse => Some(split_suffix(symbol.as_str()).0.to_string()),
        LocalVenue::Bse => None,
    }
}
