use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use mercato_core::connector::{ConnectorKey, MercatoConnector};
use mercato_core::{
    CacheConfig, Capability, HistoryPoint, MercatoConfig, MercatoError, MoverEntry, Quote,
    SearchResult, Symbol,
};
use mercato_middleware::{Lookup, TtlCache};

use crate::catalog::Catalog;
use crate::router::util::collapse_errors;

/// Resolution engine that routes requests across registered connectors.
pub struct Mercato {
    pub(crate) connectors: Vec<Arc<dyn MercatoConnector>>,
    pub(crate) cfg: MercatoConfig,
    pub(crate) catalog: Catalog,
    pub(crate) caches: Caches,
}

/// One store per cached record shape. Keys are namespaced per family
/// (`quote:AAPL`, `history:AAPL:1mo:1d`, ...), see [`cache_key`].
pub(crate) struct Caches {
    pub(crate) quotes: TtlCache<Quote>,
    pub(crate) history: TtlCache<Vec<HistoryPoint>>,
    pub(crate) search: TtlCache<Vec<SearchResult>>,
    pub(crate) baskets: TtlCache<Vec<Quote>>,
    pub(crate) movers: TtlCache<Vec<MoverEntry>>,
}

impl Caches {
    /// Stores sized from `cfg`. Overviews and sector baskets share one store.
    fn new(cfg: &CacheConfig) -> Self {
        Self {
            quotes: TtlCache::with_capacity(cfg.capacity(Capability::Quote)),
            history: TtlCache::with_capacity(cfg.capacity(Capability::History)),
            search: TtlCache::with_capacity(cfg.capacity(Capability::Search)),
            baskets: TtlCache::with_capacity(
                cfg.capacity(Capability::Overview)
                    .saturating_add(cfg.capacity(Capability::SectorBasket)),
            ),
            movers: TtlCache::with_capacity(cfg.capacity(Capability::Movers)),
        }
    }
}

/// Deterministic cache keys built from the request kind and its parameters.
pub(crate) mod cache_key {
    use mercato_core::{HistoryRequest, MoverKind, Region, SearchRequest, Symbol};

    pub(crate) fn quote(symbol: &Symbol) -> String {
        format!("quote:{symbol}")
    }

    pub(crate) fn history(symbol: &Symbol, req: HistoryRequest) -> String {
        format!("history:{symbol}:{}:{}", req.period, req.interval)
    }

    pub(crate) fn search(req: &SearchRequest) -> String {
        let query = req.query().to_lowercase();
        match req.limit() {
            Some(n) => format!("search:{query}:{n}"),
            None => format!("search:{query}"),
        }
    }

    pub(crate) fn overview(region: Region) -> String {
        format!("overview:{region}")
    }

    pub(crate) fn movers(region: Region, kind: MoverKind, cap: usize) -> String {
        format!("movers:{region}:{kind}:{cap}")
    }

    pub(crate) fn sector(region: Region, sector: &str) -> String {
        format!("sector:{region}:{sector}")
    }
}

/// Builder for constructing a `Mercato` engine with custom configuration.
pub struct MercatoBuilder {
    connectors: Vec<Arc<dyn MercatoConnector>>,
    cfg: MercatoConfig,
    catalog: Catalog,
}

impl Default for MercatoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MercatoBuilder {
    /// Create a new builder with default configuration and catalog.
    ///
    /// Starts with no connectors; register at least one via
    /// [`with_connector`](Self::with_connector).
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: MercatoConfig::default(),
            catalog: Catalog::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is the fallback order unless a capability has an
    /// explicit preference (see [`prefer_for`](Self::prefer_for)). Wrap
    /// restricted providers in a cooldown before registering them.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn MercatoConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set preferred providers for one capability.
    ///
    /// This is an ordering hint: unlisted connectors are still tried, after
    /// the listed ones, in registration order.
    #[must_use]
    pub fn prefer_for(
        mut self,
        capability: Capability,
        connectors_desc: &[Arc<dyn MercatoConnector>],
    ) -> Self {
        let keys: Vec<ConnectorKey> = connectors_desc.iter().map(|c| c.key()).collect();
        self.cfg.per_capability_priority.insert(capability, keys);
        self
    }

    /// Set the per-provider call timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set per-family cache TTLs and capacities.
    #[must_use]
    pub fn cache_config(mut self, cache: CacheConfig) -> Self {
        self.cfg.cache = cache;
        self
    }

    /// Bound the number of in-flight symbol resolutions per batch request.
    #[must_use]
    pub const fn batch_concurrency(mut self, n: usize) -> Self {
        self.cfg.batch_concurrency = n;
        self
    }

    /// Default result cap for movers queries.
    #[must_use]
    pub const fn movers_cap(mut self, cap: usize) -> Self {
        self.cfg.movers_cap = cap;
        self
    }

    /// Replace the whole configuration (priorities included).
    #[must_use]
    pub fn config(mut self, cfg: MercatoConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Replace the curated symbol lists used by the aggregate operations.
    #[must_use]
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Build the engine.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors are registered or the batch
    /// concurrency is zero.
    pub fn build(mut self) -> Result<Mercato, MercatoError> {
        // Drop preference keys that name no registered connector, and dedup.
        let known: HashSet<&'static str> = self.connectors.iter().map(|c| c.name()).collect();
        for keys in self.cfg.per_capability_priority.values_mut() {
            let mut seen = HashSet::new();
            keys.retain(|k| known.contains(k.as_str()) && seen.insert(k.as_str()));
        }

        if self.connectors.is_empty() {
            return Err(MercatoError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if self.cfg.batch_concurrency == 0 {
            return Err(MercatoError::InvalidArg(
                "batch_concurrency must be at least 1".to_string(),
            ));
        }

        Ok(Mercato {
            caches: Caches::new(&self.cfg.cache),
            connectors: self.connectors,
            cfg: self.cfg,
            catalog: self.catalog,
        })
    }
}

impl Mercato {
    /// Start building a new `Mercato` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use mercato::Mercato;
    /// use mercato_middleware::CooldownLimiter;
    /// use mercato_nse::NseConnector;
    /// use mercato_yahoo::{ScrapeConnector, YahooConnector};
    ///
    /// let limiter = Arc::new(CooldownLimiter::new());
    /// let engine = Mercato::builder()
    ///     .with_connector(NseConnector::rate_limited(limiter).build())
    ///     .with_connector(Arc::new(YahooConnector::new_default()))
    ///     .with_connector(Arc::new(ScrapeConnector::new_default()))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> MercatoBuilder {
        MercatoBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &MercatoConfig {
        &self.cfg
    }

    /// Curated symbol lists in use.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[tracing::instrument(
        name = "mercato::core::provider_call_with_timeout",
        skip(fut),
        fields(
            connector = connector_name,
            capability = capability,
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        ),
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, MercatoError>
    where
        Fut: core::future::Future<Output = Result<T, MercatoError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(MercatoError::provider_timeout(connector_name, capability)))
    }

    /// Connectors in fallback order for `capability`.
    pub(crate) fn ordered(&self, capability: Capability) -> Vec<Arc<dyn MercatoConnector>> {
        let mut out: Vec<(usize, Arc<dyn MercatoConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();
        if let Some(pref) = self.cfg.per_capability_priority.get(&capability) {
            let pos: HashMap<_, _> = pref
                .iter()
                .enumerate()
                .map(|(i, k)| (k.as_str(), i))
                .collect();
            out.sort_by_key(|(orig_i, c)| {
                (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i)
            });
        }
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Names of the connectors that serve `capability`, in the order they
    /// are tried. Aggregate capabilities report the quote chain they fan out
    /// over.
    #[must_use]
    pub fn chain(&self, capability: Capability) -> Vec<&'static str> {
        let routed = match capability {
            Capability::History => Capability::History,
            Capability::Search => Capability::Search,
            _ => Capability::Quote,
        };
        self.ordered(routed)
            .into_iter()
            .filter(|c| match routed {
                Capability::History => c.as_history_provider().is_some(),
                Capability::Search => c.as_search_provider().is_some(),
                _ => c.as_quote_provider().is_some(),
            })
            .map(|c| c.name())
            .collect()
    }

    /// Walk the chain for `capability` until one connector succeeds.
    ///
    /// `call` returns `None` for connectors that cannot serve the request
    /// (capability missing, symbol not claimed); those are not attempts.
    /// Skips (`RateLimited`, `Unsupported`) are logged at info level, failures
    /// at warn level. When every attempt fails the errors are collapsed with
    /// [`collapse_errors`].
    #[tracing::instrument(
        name = "mercato::core::fetch_single",
        skip(self, call),
        fields(symbol = %symbol, capability = %capability),
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        symbol: &Symbol,
        capability: Capability,
        call: F,
    ) -> Result<T, MercatoError>
    where
        T: Send,
        F: Fn(Arc<dyn MercatoConnector>, Symbol) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, MercatoError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<MercatoError> = Vec::new();

        for c in self.ordered(capability) {
            let Some(fut) = call(Arc::clone(&c), symbol.clone()) else {
                continue;
            };
            attempted_any = true;
            match Self::provider_call_with_timeout(
                c.name(),
                capability.as_str(),
                self.cfg.provider_timeout,
                fut,
            )
            .await
            {
                Ok(v) => {
                    tracing::debug!(connector = c.name(), "resolved");
                    return Ok(v);
                }
                Err(e) if e.is_skip() => {
                    tracing::info!(connector = c.name(), reason = %e, "provider skipped");
                    errors.push(e);
                }
                Err(e) => {
                    tracing::warn!(connector = c.name(), error = %e, "provider failed");
                    errors.push(tag_err(c.name(), e));
                }
            }
        }

        Err(collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(format!("{capability} for {symbol}")),
        ))
    }
}

impl Mercato {
    /// Fresh → Resolving → {Hit, Fallback, Fail} for one cache entry.
    ///
    /// `keep` decides whether a resolved value is worth caching; a value it
    /// rejects (an empty basket, say) is treated like a failed resolution
    /// when a stale value exists, and returned as-is otherwise. The stale
    /// candidate is whatever the store holds at fallback time (a concurrent
    /// writer wins) or else the entry the fresh lookup evicted, which is put
    /// back with its original age.
    pub(crate) async fn cached<V, Fut>(
        cache: &TtlCache<V>,
        key: String,
        ttl: Duration,
        keep: impl Fn(&V) -> bool,
        resolve: Fut,
    ) -> Result<V, MercatoError>
    where
        V: Clone,
        Fut: core::future::Future<Output = Result<V, MercatoError>>,
    {
        let evicted = match cache.lookup(&key, ttl) {
            Lookup::Hit(v) => {
                tracing::debug!(key = %key, "cache hit");
                return Ok(v);
            }
            Lookup::Expired { value, age } => Some((value, age)),
            Lookup::Miss => None,
        };

        let outcome = resolve.await;
        if let Ok(v) = &outcome
            && keep(v)
        {
            cache.set(key, v.clone());
            return outcome;
        }

        let stale = match cache.get_stale(&key) {
            Some(v) => Some(v),
            None => evicted.map(|(value, age)| {
                // Keep it around for the next failure without making it fresh.
                cache.reinstate(key.clone(), value.clone(), age);
                value
            }),
        };
        if let Some(stale) = stale {
            match &outcome {
                Ok(_) => tracing::info!(key = %key, "fresh result empty; serving stale"),
                Err(e) => tracing::info!(key = %key, error = %e, "resolution failed; serving stale"),
            }
            return Ok(stale);
        }
        outcome
    }
}

/// Attribute untagged errors to the connector that produced them.
pub(crate) fn tag_err(connector: &str, e: MercatoError) -> MercatoError {
    match e {
        e @ (MercatoError::NotFound { .. }
        | MercatoError::ProviderTimeout { .. }
        | MercatoError::Connector { .. }
        | MercatoError::RateLimited { .. }
        | MercatoError::AllProvidersTimedOut { .. }
        | MercatoError::AllProvidersFailed(_)) => e,
        other => MercatoError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}
