//! Configuration types shared across the engine, middleware, and connectors.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Capability, ConnectorKey};

/// Time-to-live and capacity per cache family.
///
/// A zero TTL disables the fresh path for that family: every lookup misses,
/// but written values remain available to stale reads. Capacities bound the
/// number of entries; the least recently used entry goes first when a family
/// is full.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL for single quotes.
    pub quote_ttl: Duration,
    /// TTL for history series.
    pub history_ttl: Duration,
    /// TTL for search results.
    pub search_ttl: Duration,
    /// TTL for regional index overviews.
    pub overview_ttl: Duration,
    /// TTL for ranked movers.
    pub movers_ttl: Duration,
    /// TTL for sector baskets.
    pub sector_ttl: Duration,
    /// Entry bound for single quotes.
    pub quote_capacity: usize,
    /// Entry bound for history series.
    pub history_capacity: usize,
    /// Entry bound for search results.
    pub search_capacity: usize,
    /// Entry bound for regional index overviews.
    pub overview_capacity: usize,
    /// Entry bound for ranked movers.
    pub movers_capacity: usize,
    /// Entry bound for sector baskets.
    pub sector_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            quote_ttl: Duration::from_secs(60),
            history_ttl: Duration::from_secs(300),
            search_ttl: Duration::from_secs(3600),
            overview_ttl: Duration::from_secs(60),
            movers_ttl: Duration::from_secs(120),
            sector_ttl: Duration::from_secs(120),
            ..Self::uniform(Duration::ZERO)
        }
    }
}

impl CacheConfig {
    /// TTL that applies to the cache family named by `capability`.
    #[must_use]
    pub const fn ttl(&self, capability: Capability) -> Duration {
        match capability {
            Capability::Quote => self.quote_ttl,
            Capability::History => self.history_ttl,
            Capability::Search => self.search_ttl,
            Capability::Overview => self.overview_ttl,
            Capability::Movers => self.movers_ttl,
            Capability::SectorBasket => self.sector_ttl,
        }
    }

    /// Entry bound for the cache family named by `capability`.
    #[must_use]
    pub const fn capacity(&self, capability: Capability) -> usize {
        match capability {
            Capability::Quote => self.quote_capacity,
            Capability::History => self.history_capacity,
            Capability::Search => self.search_capacity,
            Capability::Overview => self.overview_capacity,
            Capability::Movers => self.movers_capacity,
            Capability::SectorBasket => self.sector_capacity,
        }
    }

    /// Same TTL for every family, default capacities. Handy in tests.
    #[must_use]
    pub const fn uniform(ttl: Duration) -> Self {
        Self {
            quote_ttl: ttl,
            history_ttl: ttl,
            search_ttl: ttl,
            overview_ttl: ttl,
            movers_ttl: ttl,
            sector_ttl: ttl,
            quote_capacity: 2048,
            history_capacity: 512,
            search_capacity: 512,
            overview_capacity: 16,
            movers_capacity: 64,
            sector_capacity: 64,
        }
    }
}

/// Minimum spacing between attempts against a restricted provider family.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CooldownConfig {
    /// Required gap between two attempts.
    pub cooldown: Duration,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(2),
        }
    }
}

/// Global configuration for the `Mercato` resolution engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MercatoConfig {
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Upper bound on in-flight symbol resolutions within one batch request.
    pub batch_concurrency: usize,
    /// Result cap for movers queries when the caller passes none.
    pub movers_cap: usize,
    /// Per-family cache TTLs.
    pub cache: CacheConfig,
    /// Optional per-capability provider ordering; unlisted connectors keep
    /// their registration order after the listed ones.
    #[serde(skip)]
    pub per_capability_priority: HashMap<Capability, Vec<ConnectorKey>>,
}

impl Default for MercatoConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(5),
            batch_concurrency: 10,
            movers_cap: 5,
            cache: CacheConfig::default(),
            per_capability_priority: HashMap::new(),
        }
    }
}
