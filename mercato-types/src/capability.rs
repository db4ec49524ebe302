use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, cache families, errors, and telemetry.
///
/// Connector-facing capabilities (`Quote`, `History`, `Search`) select provider
/// chains; the aggregate ones (`Overview`, `Movers`, `SectorBasket`) only name
/// engine operations and their cache families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Point-in-time quote for a single symbol.
    Quote,
    /// Historical OHLCV series.
    History,
    /// Free-text symbol search.
    Search,
    /// Index overview for a region.
    Overview,
    /// Ranked gainers/losers for a region.
    Movers,
    /// Curated sector basket for a region.
    SectorBasket,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::History => "history",
            Self::Search => "search",
            Self::Overview => "overview",
            Self::Movers => "movers",
            Self::SectorBasket => "sector-basket",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
