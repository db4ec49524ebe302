//! Exchange trading hours, used to infer `MarketState` when a provider's
//! payload does not carry one.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::MarketState;

/// Regular-session hours of one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeSession {
    /// Venue codes providers use for this exchange.
    pub codes: &'static [&'static str],
    /// Display name.
    pub name: &'static str,
    /// Exchange-local time zone.
    pub tz: Tz,
    /// Opening time as `(hour, minute)`, exchange-local.
    pub open: (u32, u32),
    /// Closing time as `(hour, minute)`, exchange-local.
    pub close: (u32, u32),
    /// Trading currency.
    pub currency: &'static str,
}

const fn minutes((h, m): (u32, u32)) -> u32 {
    h * 60 + m
}

impl ExchangeSession {
    /// Session state at `now`: `Regular` on a weekday between open
    /// (inclusive) and close (exclusive), `Closed` otherwise. Exchange
    /// holidays are not modelled.
    #[must_use]
    pub fn state_at(&self, now: DateTime<Utc>) -> MarketState {
        let local = now.with_timezone(&self.tz);
        if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return MarketState::Closed;
        }
        let minute = local.hour() * 60 + local.minute();
        if (minutes(self.open)..minutes(self.close)).contains(&minute) {
            MarketState::Regular
        } else {
            MarketState::Closed
        }
    }
}

/// Known exchanges.
pub const SESSIONS: &[ExchangeSession] = &[
    ExchangeSession {
        codes: &["NYQ", "NYSE"],
        name: "NYSE",
        tz: chrono_tz::America::New_York,
        open: (9, 30),
        close: (16, 0),
        currency: "USD",
    },
    ExchangeSession {
        codes: &["NMS", "NASDAQ", "NGM", "NCM"],
        name: "NASDAQ",
        tz: chrono_tz::America::New_York,
        open: (9, 30),
        close: (16, 0),
        currency: "USD",
    },
    ExchangeSession {
        codes: &["NSE", "NSI"],
        name: "National Stock Exchange of India",
        tz: chrono_tz::Asia::Kolkata,
        open: (9, 15),
        close: (15, 30),
        currency: "INR",
    },
    ExchangeSession {
        codes: &["BSE", "BOM"],
        name: "Bombay Stock Exchange",
        tz: chrono_tz::Asia::Kolkata,
        open: (9, 15),
        close: (15, 30),
        currency: "INR",
    },
    ExchangeSession {
        codes: &["LSE", "LONE"],
        name: "London Stock Exchange",
        tz: chrono_tz::Europe::London,
        open: (8, 0),
        close: (16, 30),
        currency: "GBP",
    },
    ExchangeSession {
        codes: &["JPX", "TSE"],
        name: "Tokyo Stock Exchange",
        tz: chrono_tz::Asia::Tokyo,
        open: (9, 0),
        close: (15, 0),
        currency: "JPY",
    },
    ExchangeSession {
        codes: &["HKG"],
        name: "Hong Kong Stock Exchange",
        tz: chrono_tz::Asia::Hong_Kong,
        open: (9, 30),
        close: (16, 0),
        currency: "HKD",
    },
    ExchangeSession {
        codes: &["SHH"],
        name: "Shanghai Stock Exchange",
        tz: chrono_tz::Asia::Shanghai,
        open: (9, 30),
        close: (15, 0),
        currency: "CNY",
    },
    ExchangeSession {
        codes: &["FRA"],
        name: "Frankfurt Stock Exchange",
        tz: chrono_tz::Europe::Berlin,
        open: (9, 0),
        close: (17, 30),
        currency: "EUR",
    },
    ExchangeSession {
        codes: &["PAR"],
        name: "Euronext Paris",
        tz: chrono_tz::Europe::Paris,
        open: (9, 0),
        close: (17, 30),
        currency: "EUR",
    },
    ExchangeSession {
        codes: &["AMS"],
        name: "Euronext Amsterdam",
        tz: chrono_tz::Europe::Amsterdam,
        open: (9, 0),
        close: (17, 30),
        currency: "EUR",
    },
    ExchangeSession {
        codes: &["TOR", "TSX"],
        name: "Toronto Stock Exchange",
        tz: chrono_tz::America::Toronto,
        open: (9, 30),
        close: (16, 0),
        currency: "CAD",
    },
    ExchangeSession {
        codes: &["ASX"],
        name: "Australian Securities Exchange",
        tz: chrono_tz::Australia::Sydney,
        open: (10, 0),
        close: (16, 0),
        currency: "AUD",
    },
];

// Euro listings default to Frankfurt.
const CURRENCY_FALLBACK: &[(&str, &str)] = &[
    ("INR", "NSE"),
    ("USD", "NYSE"),
    ("GBP", "LSE"),
    ("JPY", "JPX"),
    ("EUR", "FRA"),
    ("AUD", "ASX"),
    ("CAD", "TOR"),
    ("HKD", "HKG"),
];

fn by_code(code: &str) -> Option<&'static ExchangeSession> {
    let code = code.trim();
    SESSIONS
        .iter()
        .find(|s| s.codes.iter().any(|c| c.eq_ignore_ascii_case(code)))
}

/// Find the session for an exchange code, falling back to the currency's
/// home exchange when the code is missing or unknown.
#[must_use]
pub fn lookup(exchange: Option<&str>, currency: Option<&str>) -> Option<&'static ExchangeSession> {
    exchange.and_then(by_code).or_else(|| {
        let currency = currency?.trim();
        CURRENCY_FALLBACK
            .iter()
            .find(|(cur, _)| cur.eq_ignore_ascii_case(currency))
            .and_then(|(_, code)| by_code(code))
    })
}

/// Infer the session state; `Closed` when the exchange cannot be identified.
#[must_use]
pub fn infer_state(exchange: Option<&str>, currency: Option<&str>, now: DateTime<Utc>) -> MarketState {
    lookup(exchange, currency).map_or(MarketState::Closed, |s| s.state_at(now))
}
