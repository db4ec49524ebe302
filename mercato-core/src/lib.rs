//! mercato-core
//!
//! Canonical records, connector traits, and normalization helpers shared by
//! every mercato connector and by the resolution engine.
//!
//! - `Quote`, `HistoryPoint`, `MoverEntry`, `SearchResult`: the one schema all
//!   provider payloads are normalized into.
//! - `connector`: the `MercatoConnector` trait and its capability traits.
//! - `middleware`: the `Middleware` trait implemented by connector wrappers.
//! - `normalize`, `symbology`, `sessions`, `timeseries`: pure helpers used by
//!   provider normalizers.
#![warn(missing_docs)]

/// Connector capability traits and the primary `MercatoConnector` interface.
pub mod connector;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
pub mod normalize;
pub mod sessions;
pub mod symbology;
pub mod timeseries;

mod history;
mod quote;
mod search;
mod symbol;

pub use connector::{
    ConnectorKey, HistoryProvider, MercatoConnector, QuoteProvider, SearchProvider,
};
pub use history::{HistoryPoint, HistoryRequest, Interval, Period};
pub use mercato_types::{
    CacheConfig, Capability, CooldownConfig, MercatoConfig, MercatoError, MoverKind, Region,
};
pub use middleware::{CallContext, CallHooks, Middleware};
pub use quote::{MarketState, MoverEntry, Quote, QuoteFields};
pub use search::{SearchRequest, SearchResult};
pub use symbol::Symbol;
