//! Curated symbol lists behind the aggregate operations.

use std::collections::BTreeMap;

use mercato_core::{Region, Symbol};

const GLOBAL_INDICES: &[&str] = &["^GSPC", "^DJI", "^IXIC", "^RUT"];
const LOCAL_INDICES: &[&str] = &["^NSEI", "^BSESN", "^NSEBANK", "^CNXIT"];

const GLOBAL_MOVERS: &[&str] = &[
    "NVDA", "TSLA", "AAPL", "MSFT", "AMD", "AMZN", "GOOGL", "META", "NFLX", "INTC", "PLTR",
    "COIN", "MARA", "RIOT", "DKNG", "UBER", "ABNB", "HOOD", "PYPL", "SQ", "PFE", "MRNA", "JNJ",
    "LLY", "UNH", "XOM", "CVX", "JPM", "BAC", "WFC",
];

const LOCAL_MOVERS: &[&str] = &[
    "RELIANCE.NS", "TCS.NS", "HDFCBANK.NS", "INFY.NS", "ICICIBANK.NS", "HINDUNILVR.NS",
    "SBIN.NS", "BHARTIARTL.NS", "ITC.NS", "KOTAKBANK.NS", "LT.NS", "AXISBANK.NS",
    "ASIANPAINT.NS", "MARUTI.NS", "BAJFINANCE.NS", "TITAN.NS", "SUNPHARMA.NS",
    "TATAMOTORS.NS", "WIPRO.NS", "ADANIENT.NS",
];

const GLOBAL_SECTORS: &[(&str, &[&str])] = &[
    ("tech", &["AAPL", "MSFT", "NVDA", "ORCL", "ADBE"]),
    ("health", &["UNH", "JNJ", "LLY", "MRK", "ABBV"]),
    ("pharma", &["PFE", "BMY", "GILD", "AMGN", "BIIB"]),
];

const LOCAL_SECTORS: &[(&str, &[&str])] = &[
    ("tech", &["TCS.NS", "INFY.NS", "WIPRO.NS", "HCLTECH.NS", "TECHM.NS"]),
    ("health", &["APOLLOHOSP.NS", "MAXHEALTH.NS", "FORTIS.NS"]),
    (
        "pharma",
        &["SUNPHARMA.NS", "DRREDDY.NS", "CIPLA.NS", "DIVISLAB.NS", "LUPIN.NS"],
    ),
];

/// Symbol lists for one region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionCatalog {
    /// Benchmark indices shown by the overview.
    pub indices: Vec<Symbol>,
    /// Universe ranked by the movers query.
    pub movers: Vec<Symbol>,
    /// Sector name (lowercase) to members.
    pub sectors: BTreeMap<String, Vec<Symbol>>,
}

impl RegionCatalog {
    fn from_static(indices: &[&str], movers: &[&str], sectors: &[(&str, &[&str])]) -> Self {
        Self {
            indices: symbols(indices),
            movers: symbols(movers),
            sectors: sectors
                .iter()
                .map(|(name, members)| ((*name).to_string(), symbols(members)))
                .collect(),
        }
    }
}

fn symbols(raw: &[&str]) -> Vec<Symbol> {
    raw.iter().filter_map(|s| Symbol::new(s).ok()).collect()
}

/// Curated lists for both regions.
///
/// The default holds the stock lists; replace it through
/// [`MercatoBuilder::catalog`](crate::MercatoBuilder::catalog).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// US lists.
    pub global: RegionCatalog,
    /// Indian lists.
    pub local: RegionCatalog,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            global: RegionCatalog::from_static(GLOBAL_INDICES, GLOBAL_MOVERS, GLOBAL_SECTORS),
            local: RegionCatalog::from_static(LOCAL_INDICES, LOCAL_MOVERS, LOCAL_SECTORS),
        }
    }
}

impl Catalog {
    /// Lists for `region`.
    #[must_use]
    pub const fn region(&self, region: Region) -> &RegionCatalog {
        match region {
            Region::Global => &self.global,
            Region::Local => &self.local,
        }
    }

    /// Index symbols for `region`.
    #[must_use]
    pub fn indices(&self, region: Region) -> &[Symbol] {
        &self.region(region).indices
    }

    /// Movers universe for `region`.
    #[must_use]
    pub fn movers(&self, region: Region) -> &[Symbol] {
        &self.region(region).movers
    }

    /// Members of `sector` in `region`, matched case-insensitively.
    /// Unknown sectors have no members.
    #[must_use]
    pub fn sector(&self, region: Region, sector: &str) -> &[Symbol] {
        self.region(region)
            .sectors
            .get(&sector.trim().to_ascii_lowercase())
            .map_or(&[][..], Vec::as_slice)
    }

    /// Sector names known for `region`.
    pub fn sectors(&self, region: Region) -> impl Iterator<Item = &str> {
        self.region(region).sectors.keys().map(String::as_str)
    }
}
