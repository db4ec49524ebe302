use mercato_core::{Capability, HistoryPoint, HistoryRequest, MercatoError, Symbol};

use crate::Mercato;
use crate::core::cache_key;

impl Mercato {
    /// Fetch an OHLCV series for `symbol`.
    ///
    /// History connectors are tried in order and the first non-empty series
    /// wins; an empty series counts as not found and moves on to the next
    /// connector. Non-empty series are cached per `(symbol, period, interval)`.
    ///
    /// Never fails: an exhausted chain yields the last cached series, or an
    /// empty one.
    #[tracing::instrument(
        target = "mercato::router",
        skip(self),
        fields(symbol = %symbol, period = %req.period, interval = %req.interval),
    )]
    pub async fn history(&self, symbol: &Symbol, req: HistoryRequest) -> Vec<HistoryPoint> {
        let ttl = self.cfg.cache.ttl(Capability::History);
        Self::cached(
            &self.caches.history,
            cache_key::history(symbol, req),
            ttl,
            |bars| !bars.is_empty(),
            self.resolve_history(symbol, req),
        )
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(symbol = %symbol, error = %e, "history unavailable; returning empty series");
            Vec::new()
        })
    }

    async fn resolve_history(
        &self,
        symbol: &Symbol,
        req: HistoryRequest,
    ) -> Result<Vec<HistoryPoint>, MercatoError> {
        self.fetch_single(symbol, Capability::History, move |c, s| {
            if !c.supports_symbol(&s) || c.as_history_provider().is_none() {
                return None;
            }
            Some(async move {
                let Some(p) = c.as_history_provider() else {
                    return Err(MercatoError::connector(
                        c.name(),
                        "missing history capability during call",
                    ));
                };
                let bars = p.history(&s, req).await?;
                if bars.is_empty() {
                    return Err(MercatoError::not_found(format!("history for {s}")));
                }
                Ok(bars)
            })
        })
        .await
    }
}
