//! Middleware trait for wrapping `MercatoConnector` implementations.

use std::sync::Arc;

use async_trait::async_trait;

use crate::connector::MercatoConnector;
use crate::{Capability, MercatoError};

/// Trait implemented by connector middleware layers.
///
/// A middleware consumes an inner `MercatoConnector` and returns a wrapped
/// connector that augments or restricts behavior (e.g. cooldown gating).
pub trait Middleware: Send + Sync {
    /// Wrap an inner connector and return the wrapped connector.
    fn apply(self: Box<Self>, inner: Arc<dyn MercatoConnector>) -> Arc<dyn MercatoConnector>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}

/// Per-call information handed to wrapper hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// Capability being invoked.
    pub capability: Capability,
}

impl CallContext {
    /// Context for a call to `capability`.
    #[must_use]
    pub const fn new(capability: Capability) -> Self {
        Self { capability }
    }
}

/// Hooks a wrapper runs around each delegated provider call.
///
/// Used together with [`mercato_delegate_provider_impls!`](crate::mercato_delegate_provider_impls).
#[async_trait]
pub trait CallHooks: Send + Sync {
    /// Runs before the inner call. Returning an error short-circuits it.
    async fn pre_call(&self, ctx: &CallContext) -> Result<(), MercatoError> {
        let _ = ctx;
        Ok(())
    }

    /// Rewrites an error coming back from the inner connector.
    fn map_error(&self, err: MercatoError, ctx: &CallContext) -> MercatoError {
        let _ = ctx;
        err
    }
}
