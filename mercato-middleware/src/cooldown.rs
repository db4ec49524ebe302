//! Cooldown-gated connector wrapper.
//!
//! Every delegated call first takes a slot from the shared [`CooldownLimiter`].
//! When the family's last attempt is too recent the call fails immediately
//! with [`MercatoError::RateLimited`], which the engine treats as a skip.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mercato_core::connector::MercatoConnector;
use mercato_core::{CallContext, CallHooks, Middleware, Symbol};
use mercato_types::{ConnectorKey, CooldownConfig, MercatoError};

use crate::CooldownLimiter;

/// Wrapper that enforces a minimum gap between attempts against its inner
/// connector.
pub struct CooldownConnector {
    inner: Arc<dyn MercatoConnector>,
    limiter: Arc<CooldownLimiter>,
    family: ConnectorKey,
    cooldown: Duration,
}

impl CooldownConnector {
    /// Gate `inner` on `limiter`, keyed by the inner connector's own key.
    pub fn new(
        inner: Arc<dyn MercatoConnector>,
        limiter: Arc<CooldownLimiter>,
        config: CooldownConfig,
    ) -> Self {
        let family = inner.key();
        Self {
            inner,
            limiter,
            family,
            cooldown: config.cooldown,
        }
    }

    /// Share the clock with other connectors under a common family key.
    #[must_use]
    pub fn with_family(mut self, family: ConnectorKey) -> Self {
        self.family = family;
        self
    }

    /// Access the inner connector.
    pub fn inner(&self) -> &Arc<dyn MercatoConnector> {
        &self.inner
    }

    /// Key of the limiter slot this wrapper consumes.
    pub const fn family(&self) -> ConnectorKey {
        self.family
    }

    /// Take a cooldown slot for one attempt.
    ///
    /// # Errors
    /// Returns `MercatoError::RateLimited` while the cooldown is running.
    pub fn acquire(&self) -> Result<(), MercatoError> {
        self.limiter
            .try_acquire(self.family, self.cooldown)
            .map_err(|left| {
                let retry_in_ms = u64::try_from(left.as_millis()).unwrap_or(u64::MAX).max(1);
                tracing::debug!(
                    connector = self.inner.name(),
                    family = %self.family,
                    retry_in_ms,
                    "cooldown active; refusing attempt"
                );
                MercatoError::rate_limited(self.inner.name(), retry_in_ms)
            })
    }
}

impl MercatoConnector for CooldownConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn supports_symbol(&self, symbol: &Symbol) -> bool {
        self.inner.supports_symbol(symbol)
    }

    mercato_core::mercato_connector_accessors!(inner);
}

#[async_trait]
impl CallHooks for CooldownConnector {
    async fn pre_call(&self, _ctx: &CallContext) -> Result<(), MercatoError> {
        self.acquire()
    }
}

mercato_core::mercato_delegate_provider_impls!(CooldownConnector, inner);

/// Middleware config for constructing a [`CooldownConnector`].
pub struct CooldownMiddleware {
    limiter: Arc<CooldownLimiter>,
    config: CooldownConfig,
    family: Option<ConnectorKey>,
}

impl CooldownMiddleware {
    /// Middleware drawing slots from `limiter`.
    #[must_use]
    pub const fn new(limiter: Arc<CooldownLimiter>, config: CooldownConfig) -> Self {
        Self {
            limiter,
            config,
            family: None,
        }
    }

    /// Override the limiter key (defaults to the wrapped connector's key).
    #[must_use]
    pub fn with_family(mut self, family: ConnectorKey) -> Self {
        self.family = Some(family);
        self
    }

    /// Configured cooldown.
    pub const fn config(&self) -> CooldownConfig {
        self.config
    }
}

impl Middleware for CooldownMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn MercatoConnector>) -> Arc<dyn MercatoConnector> {
        let wrapped = CooldownConnector::new(inner, self.limiter, self.config);
        match self.family {
            Some(family) => Arc::new(wrapped.with_family(family)),
            None => Arc::new(wrapped),
        }
    }

    fn name(&self) -> &'static str {
        "CooldownConnector"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "cooldown_ms": self.config.cooldown.as_millis(),
            "family": self.family.map(ConnectorKey::as_str),
        })
    }
}
