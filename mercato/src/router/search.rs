use std::collections::HashSet;

use mercato_core::{Capability, MercatoError, SearchRequest, SearchResult};

use crate::Mercato;
use crate::core::cache_key;

impl Mercato {
    /// Search instruments by free text.
    ///
    /// Convenience wrapper over [`search_request`](Self::search_request) with
    /// no result cap.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `query` is blank. Upstream failures never
    /// error; they yield an empty list.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MercatoError> {
        let req = SearchRequest::new(query)?;
        Ok(self.search_request(&req).await)
    }

    /// Search with a validated request.
    ///
    /// Every search connector is queried concurrently. Results are merged in
    /// chain order, de-duplicated by symbol (first occurrence wins) and
    /// truncated to the request limit. Non-empty merges are cached per
    /// `(query, limit)`; when every connector fails the last cached merge,
    /// if any, is returned.
    #[tracing::instrument(
        target = "mercato::router",
        skip(self, req),
        fields(query = %req.query(), limit = req.limit()),
    )]
    pub async fn search_request(&self, req: &SearchRequest) -> Vec<SearchResult> {
        let ttl = self.cfg.cache.ttl(Capability::Search);
        Self::cached(
            &self.caches.search,
            cache_key::search(req),
            ttl,
            |hits| !hits.is_empty(),
            self.resolve_search(req),
        )
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(query = %req.query(), error = %e, "search unavailable; returning no results");
            Vec::new()
        })
    }

    async fn resolve_search(&self, req: &SearchRequest) -> Result<Vec<SearchResult>, MercatoError> {
        let call_timeout = self.cfg.provider_timeout;
        let tasks = self.ordered(Capability::Search).into_iter().map(|c| {
            let r = req.clone();
            async move {
                let name = c.name();
                let Some(p) = c.as_search_provider() else {
                    return (name, false, Ok(Vec::new()));
                };
                let res = Self::provider_call_with_timeout(
                    name,
                    Capability::Search.as_str(),
                    call_timeout,
                    p.search(&r),
                )
                .await;
                (name, true, res)
            }
        });
        let joined = futures::future::join_all(tasks).await;

        let mut merged: Vec<SearchResult> = Vec::new();
        let mut seen = HashSet::<String>::new();
        let mut errors: Vec<MercatoError> = Vec::new();
        let mut attempted_any = false;
        for (name, attempted, res) in joined {
            if !attempted {
                continue;
            }
            attempted_any = true;
            match res {
                Ok(hits) => {
                    for item in hits {
                        if seen.insert(item.symbol.to_ascii_uppercase()) {
                            merged.push(item);
                        }
                    }
                }
                Err(e) if e.is_skip() => {
                    tracing::info!(connector = name, reason = %e, "provider skipped");
                    errors.push(e);
                }
                Err(e) => {
                    tracing::warn!(connector = name, error = %e, "provider failed");
                    errors.push(crate::core::tag_err(name, e));
                }
            }
        }

        if !attempted_any {
            return Err(MercatoError::unsupported(Capability::Search.as_str()));
        }

        if let Some(limit) = req.limit()
            && merged.len() > limit
        {
            merged.truncate(limit);
        }

        if merged.is_empty() && !errors.is_empty() {
            return Err(MercatoError::AllProvidersFailed(errors));
        }
        Ok(merged)
    }
}
