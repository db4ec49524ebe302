use futures::StreamExt;
use mercato_core::{Capability, MercatoError, Quote, Symbol};

use crate::Mercato;
use crate::core::cache_key;

impl Mercato {
    /// Fetch a point-in-time quote for a single symbol.
    ///
    /// Behavior:
    /// - A cached quote younger than the quote TTL is returned without any
    ///   upstream call.
    /// - Otherwise the quote chain is walked in order; the first connector to
    ///   produce a quote wins and the result is cached.
    /// - When every connector fails or is skipped, the last cached quote is
    ///   served even if expired.
    ///
    /// # Errors
    /// Returns `NotFound` when the chain is exhausted and nothing was ever
    /// cached for the symbol.
    #[tracing::instrument(target = "mercato::router", skip(self), fields(symbol = %symbol))]
    pub async fn quote(&self, symbol: &Symbol) -> Result<Quote, MercatoError> {
        let ttl = self.cfg.cache.ttl(Capability::Quote);
        Self::cached(
            &self.caches.quotes,
            cache_key::quote(symbol),
            ttl,
            |_| true,
            self.resolve_quote(symbol),
        )
        .await
        .map_err(|e| {
            tracing::warn!(symbol = %symbol, error = %e, "quote unavailable");
            MercatoError::not_found(format!("quote for {symbol}"))
        })
    }

    /// Walk the quote chain without touching the cache.
    pub(crate) async fn resolve_quote(&self, symbol: &Symbol) -> Result<Quote, MercatoError> {
        self.fetch_single(symbol, Capability::Quote, |c, s| {
            if !c.supports_symbol(&s) || c.as_quote_provider().is_none() {
                return None;
            }
            Some(async move {
                match c.as_quote_provider() {
                    Some(p) => p.quote(&s).await,
                    None => Err(MercatoError::connector(
                        c.name(),
                        "missing quote capability during call",
                    )),
                }
            })
        })
        .await
    }

    /// Fetch quotes for multiple symbols.
    ///
    /// Behavior:
    /// - Each symbol goes through [`quote`](Self::quote) independently, so
    ///   cache hits and stale fallback apply per symbol.
    /// - At most `batch_concurrency` resolutions are in flight at once.
    /// - Returns `(successful_quotes, failures)`, both in input order. One
    ///   symbol failing never fails the batch.
    pub async fn quotes(&self, symbols: &[Symbol]) -> (Vec<Quote>, Vec<(Symbol, MercatoError)>) {
        let results: Vec<(Symbol, Result<Quote, MercatoError>)> =
            futures::stream::iter(symbols.iter().cloned())
                .map(|s| async move {
                    let res = self.quote(&s).await;
                    (s, res)
                })
                .buffered(self.cfg.batch_concurrency.max(1))
                .collect()
                .await;

        let mut ok_quotes: Vec<Quote> = Vec::new();
        let mut failures: Vec<(Symbol, MercatoError)> = Vec::new();
        for (symbol, res) in results {
            match res {
                Ok(q) => ok_quotes.push(q),
                Err(e) => failures.push((symbol, e)),
            }
        }
        (ok_quotes, failures)
    }
}
