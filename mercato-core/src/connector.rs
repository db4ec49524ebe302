use async_trait::async_trait;

use crate::{HistoryPoint, HistoryRequest, MercatoError, Quote, SearchRequest, SearchResult, Symbol};
pub use mercato_types::ConnectorKey;

/// Focused role trait for connectors that provide quotes.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch a point-in-time quote for one symbol.
    async fn quote(&self, symbol: &Symbol) -> Result<Quote, MercatoError>;

    /// Fetch several quotes at once.
    ///
    /// Connectors with a native batch endpoint override this. The default
    /// resolves symbols one by one and leaves out those that are not found;
    /// any other error aborts the batch.
    async fn quotes(&self, symbols: &[Symbol]) -> Result<Vec<Quote>, MercatoError> {
        let mut out = Vec::with_capacity(symbols.len());
        for s in symbols {
            match self.quote(s).await {
                Ok(q) => out.push(q),
                Err(MercatoError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }
}

/// Focused role trait for connectors that provide OHLCV history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch bars for `symbol`. An empty vector is a valid answer.
    async fn history(
        &self,
        symbol: &Symbol,
        req: HistoryRequest,
    ) -> Result<Vec<HistoryPoint>, MercatoError>;
}

/// Focused role trait for connectors that provide instrument search.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search instruments by free text.
    async fn search(&self, req: &SearchRequest) -> Result<Vec<SearchResult>, MercatoError>;
}

/// Main connector trait implemented by every market-data source.
///
/// A connector advertises capabilities through the `as_*_provider` accessors;
/// the engine only calls a capability when the accessor returns `Some`.
pub trait MercatoConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g. "mercato-yahoo").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector can serve `symbol` at all.
    ///
    /// Default: every symbol. Region-specific sources narrow this so the
    /// engine does not waste an attempt (or a cooldown slot) on them.
    fn supports_symbol(&self, symbol: &Symbol) -> bool {
        let _ = symbol;
        true
    }

    /// Advertise quote capability.
    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        None
    }

    /// Advertise history capability.
    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        None
    }

    /// Advertise search capability.
    fn as_search_provider(&self) -> Option<&dyn SearchProvider> {
        None
    }
}

/// Generate `as_*_provider` accessors for a wrapper that implements
/// `MercatoConnector` by delegating to an inner field.
#[macro_export]
macro_rules! mercato_connector_accessors {
    ($inner:ident) => {
        fn as_quote_provider(&self) -> Option<&dyn $crate::connector::QuoteProvider> {
            if self.$inner.as_quote_provider().is_some() {
                Some(self as &dyn $crate::connector::QuoteProvider)
            } else {
                None
            }
        }
        fn as_history_provider(&self) -> Option<&dyn $crate::connector::HistoryProvider> {
            if self.$inner.as_history_provider().is_some() {
                Some(self as &dyn $crate::connector::HistoryProvider)
            } else {
                None
            }
        }
        fn as_search_provider(&self) -> Option<&dyn $crate::connector::SearchProvider> {
            if self.$inner.as_search_provider().is_some() {
                Some(self as &dyn $crate::connector::SearchProvider)
            } else {
                None
            }
        }
    };
}

/// Generate provider trait impls for a wrapper type `$self_ty`, delegating to
/// an inner field `$inner` and running the wrapper's [`CallHooks`] around
/// every call.
///
/// The wrapper must implement [`CallHooks`], and the calling crate must depend
/// on `async-trait`.
///
/// [`CallHooks`]: crate::middleware::CallHooks
#[macro_export]
macro_rules! mercato_delegate_provider_impls {
    ($self_ty:ty, $inner:ident) => {
        #[async_trait::async_trait]
        impl $crate::connector::QuoteProvider for $self_ty {
            async fn quote(
                &self,
                symbol: &$crate::Symbol,
            ) -> Result<$crate::Quote, $crate::MercatoError> {
                let ctx = $crate::middleware::CallContext::new($crate::Capability::Quote);
                <Self as $crate::middleware::CallHooks>::pre_call(self, &ctx).await?;
                let inner = self
                    .$inner
                    .as_quote_provider()
                    .ok_or_else(|| $crate::MercatoError::unsupported("quote"))?;
                inner
                    .quote(symbol)
                    .await
                    .map_err(|e| <Self as $crate::middleware::CallHooks>::map_error(self, e, &ctx))
            }

            async fn quotes(
                &self,
                symbols: &[$crate::Symbol],
            ) -> Result<Vec<$crate::Quote>, $crate::MercatoError> {
                let ctx = $crate::middleware::CallContext::new($crate::Capability::Quote);
                <Self as $crate::middleware::CallHooks>::pre_call(self, &ctx).await?;
                let inner = self
                    .$inner
                    .as_quote_provider()
                    .ok_or_else(|| $crate::MercatoError::unsupported("quote"))?;
                inner
                    .quotes(symbols)
                    .await
                    .map_err(|e| <Self as $crate::middleware::CallHooks>::map_error(self, e, &ctx))
            }
        }

        #[async_trait::async_trait]
        impl $crate::connector::HistoryProvider for $self_ty {
            async fn history(
                &self,
                symbol: &$crate::Symbol,
                req: $crate::HistoryRequest,
            ) -> Result<Vec<$crate::HistoryPoint>, $crate::MercatoError> {
                let ctx = $crate::middleware::CallContext::new($crate::Capability::History);
                <Self as $crate::middleware::CallHooks>::pre_call(self, &ctx).await?;
                let inner = self
                    .$inner
                    .as_history_provider()
                    .ok_or_else(|| $crate::MercatoError::unsupported("history"))?;
                inner
                    .history(symbol, req)
                    .await
                    .map_err(|e| <Self as $crate::middleware::CallHooks>::map_error(self, e, &ctx))
            }
        }

        #[async_trait::async_trait]
        impl $crate::connector::SearchProvider for $self_ty {
            async fn search(
                &self,
                req: &$crate::SearchRequest,
            ) -> Result<Vec<$crate::SearchResult>, $crate::MercatoError> {
                let ctx = $crate::middleware::CallContext::new($crate::Capability::Search);
                <Self as $crate::middleware::CallHooks>::pre_call(self, &ctx).await?;
                let inner = self
                    .$inner
                    .as_search_provider()
                    .ok_or_else(|| $crate::MercatoError::unsupported("search"))?;
                inner
                    .search(req)
                    .await
                    .map_err(|e| <Self as $crate::middleware::CallHooks>::map_error(self, e, &ctx))
            }
        }
    };
}
