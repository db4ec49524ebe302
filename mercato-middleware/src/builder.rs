//! Builder for composing connectors with middleware layers.
//!
//! Layers form an onion around the raw connector. The `layers` vector stores
//! them outermost-first (last added = outermost) and `build()` applies them in
//! reverse to get the nesting right:
//!
//! ```text
//! builder.layer(a).layer(b)
//!
//! Storage: [b, a]
//! Applied: Raw -> a -> b
//! Result:  b(a(Raw))
//! ```

use std::sync::Arc;

use mercato_core::Middleware;
use mercato_core::connector::MercatoConnector;
use mercato_types::CooldownConfig;
use serde_json::json;

use crate::{CooldownLimiter, CooldownMiddleware};

const COOLDOWN: &str = "CooldownConnector";

/// Generic middleware builder for composing a connector with layered wrappers.
pub struct ConnectorBuilder {
    raw: Arc<dyn MercatoConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn MercatoConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace cooldown gating at the outermost position.
    #[must_use]
    pub fn with_cooldown(self, limiter: Arc<CooldownLimiter>, cfg: CooldownConfig) -> Self {
        self.without_cooldown()
            .layer(Box::new(CooldownMiddleware::new(limiter, cfg)))
    }

    /// Remove cooldown gating if present.
    #[must_use]
    pub fn without_cooldown(mut self) -> Self {
        self.layers.retain(|m| m.name() != COOLDOWN);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Layer names and configs, outermost first, ending with the raw
    /// connector.
    #[must_use]
    pub fn describe(&self) -> Vec<(&'static str, serde_json::Value)> {
        self.layers
            .iter()
            .map(|l| (l.name(), l.config_json()))
            .chain(std::iter::once((
                "RawConnector",
                json!({ "name": self.raw.name() }),
            )))
            .collect()
    }

    /// Build the wrapped connector, applying layers innermost first.
    #[must_use]
    pub fn build(self) -> Arc<dyn MercatoConnector> {
        let mut acc: Arc<dyn MercatoConnector> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
