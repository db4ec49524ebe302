//! Market regions and mover rankings.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MercatoError;

/// Market region selecting curated symbol sets and provider strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// US-listed indices and large caps.
    #[default]
    Global,
    /// The Indian market (NSE/BSE listings).
    Local,
}

impl Region {
    /// Stable lowercase identifier used in cache keys and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = MercatoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" | "us" => Ok(Self::Global),
            "local" | "india" | "indian" => Ok(Self::Local),
            other => Err(MercatoError::InvalidArg(format!("unknown region: {other}"))),
        }
    }
}

/// Which side of the ranking a movers query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoverKind {
    /// Positive percent change, largest first.
    #[default]
    Gainers,
    /// Negative percent change, most negative first.
    Losers,
}

impl MoverKind {
    /// Stable lowercase identifier used in cache keys and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gainers => "gainers",
            Self::Losers => "losers",
        }
    }
}

impl fmt::Display for MoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoverKind {
    type Err = MercatoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gainers" | "gainer" => Ok(Self::Gainers),
            "losers" | "loser" => Ok(Self::Losers),
            other => Err(MercatoError::InvalidArg(format!("unknown mover kind: {other}"))),
        }
    }
}
