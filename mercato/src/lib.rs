//! Mercato resolves market data across an ordered chain of providers.
//!
//! Overview
//! - Routes requests to connectors that implement the `mercato_core` contracts.
//! - Walks connectors in registration order (or a per-capability preference)
//!   until one succeeds; skips and failures are logged, never surfaced.
//! - Caches every result family with its own TTL and serves the last known
//!   value, however old, when the whole chain fails.
//! - Fans batch requests (overview, movers, sector baskets) out with bounded
//!   concurrency and drops symbols that fail.
//!
//! Key behaviors and trade-offs
//! - First success wins: there is no cross-provider reconciliation, so a
//!   lower-priority provider is only consulted when the ones above it fail.
//! - Stale serving favors availability over freshness; callers that need to
//!   know the age of a quote can compare `resolved_at` with the clock.
//! - Restricted providers are wrapped in a cooldown (`mercato-middleware`)
//!   before registration; a cooled-down provider is skipped, not failed.
//!
//! Examples
//! Building an engine over the regional, general-purpose and scraping
//! connectors:
//! ```rust,ignore
//! use std::sync::Arc;
//! use mercato::{Capability, Mercato};
//! use mercato_middleware::CooldownLimiter;
//! use mercato_nse::NseConnector;
//! use mercato_yahoo::{ScrapeConnector, YahooConnector};
//!
//! let limiter = Arc::new(CooldownLimiter::new());
//! let yahoo: Arc<dyn mercato::MercatoConnector> = Arc::new(YahooConnector::new_default());
//!
//! let engine = Mercato::builder()
//!     .with_connector(NseConnector::rate_limited(limiter).build())
//!     .with_connector(yahoo.clone())
//!     .with_connector(Arc::new(ScrapeConnector::new_default()))
//!     .prefer_for(Capability::History, &[yahoo])
//!     .build()?;
//! ```
//!
//! Quotes, movers and history:
//! ```rust,ignore
//! use mercato::{HistoryRequest, MoverKind, Region, Symbol};
//!
//! let tcs = engine.quote(&Symbol::new("TCS.NS")?).await?;
//! let gainers = engine.movers(Region::Local, MoverKind::Gainers, None).await;
//! let bars = engine.history(&Symbol::new("AAPL")?, HistoryRequest::default()).await;
//! ```
//!
//! See `mercato/examples/` for runnable demonstrations against the mock
//! connector.
#![warn(missing_docs)]

mod batch;
pub mod catalog;
pub(crate) mod core;
mod router;

pub use batch::rank_movers;
pub use catalog::{Catalog, RegionCatalog};
pub use core::{Mercato, MercatoBuilder};
pub use router::util::collapse_errors;

// Re-export core types for convenience
pub use mercato_core::{
    CacheConfig, Capability, ConnectorKey, HistoryPoint, HistoryRequest, Interval, MarketState,
    MercatoConfig, MercatoConnector, MercatoError, MoverEntry, MoverKind, Period, Quote, Region,
    SearchRequest, SearchResult, Symbol,
};
