use mercato_core::{Capability, MercatoError, MoverEntry, MoverKind, Quote, Region, Symbol};

use crate::Mercato;
use crate::batch::rank_movers;
use crate::core::cache_key;

impl Mercato {
    /// Quotes for the region's benchmark indices, in catalog order.
    ///
    /// Indices that cannot be resolved are left out. If none resolve, the
    /// last cached overview is served; failing that the list is empty.
    #[tracing::instrument(target = "mercato::router", skip(self))]
    pub async fn overview(&self, region: Region) -> Vec<Quote> {
        let symbols = self.catalog.indices(region);
        self.basket(
            cache_key::overview(region),
            Capability::Overview,
            symbols,
            "overview",
        )
        .await
    }

    /// Top movers of the region's universe.
    ///
    /// `cap` defaults to the configured movers cap. Ranking follows
    /// [`rank_movers`]. Symbols that fail to resolve are skipped; when the
    /// whole universe fails the last cached ranking is served, else the list
    /// is empty.
    #[tracing::instrument(target = "mercato::router", skip(self))]
    pub async fn movers(
        &self,
        region: Region,
        kind: MoverKind,
        cap: Option<usize>,
    ) -> Vec<MoverEntry> {
        let cap = cap.unwrap_or(self.cfg.movers_cap);
        let universe = self.catalog.movers(region);
        let resolve = async {
            let quotes = self.resolve_many(universe).await;
            if quotes.is_empty() {
                return Err(MercatoError::not_found(format!("movers for {region}")));
            }
            Ok(rank_movers(&quotes, kind, cap))
        };
        Self::cached(
            &self.caches.movers,
            cache_key::movers(region, kind, cap),
            self.cfg.cache.ttl(Capability::Movers),
            |_| true,
            resolve,
        )
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(region = %region, kind = %kind, error = %e, "movers unavailable");
            Vec::new()
        })
    }

    /// Quotes for one curated sector, in catalog order.
    ///
    /// Unknown sectors yield an empty list without any upstream call.
    #[tracing::instrument(target = "mercato::router", skip(self))]
    pub async fn sector_basket(&self, region: Region, sector: &str) -> Vec<Quote> {
        let symbols = self.catalog.sector(region, sector);
        if symbols.is_empty() {
            tracing::debug!(region = %region, sector, "unknown sector");
            return Vec::new();
        }
        self.basket(
            cache_key::sector(region, &sector.trim().to_ascii_lowercase()),
            Capability::SectorBasket,
            symbols,
            "sector basket",
        )
        .await
    }

    async fn basket(
        &self,
        key: String,
        family: Capability,
        symbols: &[Symbol],
        what: &str,
    ) -> Vec<Quote> {
        let resolve = async {
            let quotes = self.resolve_many(symbols).await;
            if quotes.is_empty() {
                return Err(MercatoError::not_found(format!("{what} {key}")));
            }
            Ok(quotes)
        };
        Self::cached(
            &self.caches.baskets,
            key.clone(),
            self.cfg.cache.ttl(family),
            |_| true,
            resolve,
        )
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(key = %key, error = %e, "{what} unavailable");
            Vec::new()
        })
    }
}
