use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::MercatoError;

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Bar open time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Volume traded in the bar.
    pub volume: u64,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, what = $what:literal,
        { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[doc = concat!("`", $wire, "`")]
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in ascending span order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire label as providers expect it.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = MercatoError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(MercatoError::InvalidArg(format!(concat!("unsupported ", $what, ": {}"), s)))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }
    };
}

wire_enum! {
    /// Lookback window for a history request.
    Period, default = OneMonth, what = "period",
    {
        OneDay => "1d",
        FiveDays => "5d",
        OneMonth => "1mo",
        ThreeMonths => "3mo",
        SixMonths => "6mo",
        OneYear => "1y",
        TwoYears => "2y",
        FiveYears => "5y",
        TenYears => "10y",
        YearToDate => "ytd",
        Max => "max",
    }
}

wire_enum! {
    /// Bar width for a history request.
    Interval, default = OneDay, what = "interval",
    {
        OneMinute => "1m",
        TwoMinutes => "2m",
        FiveMinutes => "5m",
        FifteenMinutes => "15m",
        ThirtyMinutes => "30m",
        SixtyMinutes => "60m",
        NinetyMinutes => "90m",
        OneHour => "1h",
        OneDay => "1d",
        FiveDays => "5d",
        OneWeek => "1wk",
        OneMonth => "1mo",
        ThreeMonths => "3mo",
    }
}

/// Period and interval pair for a history lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HistoryRequest {
    /// Lookback window; defaults to one month.
    pub period: Period,
    /// Bar width; defaults to daily.
    pub interval: Interval,
}

impl HistoryRequest {
    /// Build a request from already-parsed parts.
    #[must_use]
    pub const fn new(period: Period, interval: Interval) -> Self {
        Self { period, interval }
    }

    /// Parse a request from wire labels, falling back to the defaults for
    /// absent values.
    ///
    /// # Errors
    /// Returns `InvalidArg` for labels outside the accepted sets.
    pub fn parse(period: Option<&str>, interval: Option<&str>) -> Result<Self, MercatoError> {
        Ok(Self {
            period: period.map(str::parse).transpose()?.unwrap_or_default(),
            interval: interval.map(str::parse).transpose()?.unwrap_or_default(),
        })
    }
}
