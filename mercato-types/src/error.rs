use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the mercato workspace.
///
/// Connector-level variants (`Connector`, `Data`, `ProviderTimeout`, `RateLimited`)
/// are recovered locally by the resolution engine, which moves on to the next
/// provider. Only `NotFound` (and caller mistakes such as `InvalidArg`) cross the
/// engine boundary.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MercatoError {
    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "history").
        capability: String,
    },

    /// The upstream payload did not match the expected shape (missing fields,
    /// zero prices, markup drift on scraped pages).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector failed transiently (HTTP error, network error).
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "quote for AAPL".
        what: String,
    },

    /// All selected providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<MercatoError>),

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "history", "search", "quote").
        capability: String,
    },

    /// All attempted providers timed out for the requested capability.
    #[error("all providers timed out: {capability}")]
    AllProvidersTimedOut {
        /// Capability label that timed out across all providers.
        capability: String,
    },

    /// A cooldown-gated connector was skipped because its last attempt is too recent.
    #[error("{connector} rate limited: retry_in_ms={retry_in_ms}")]
    RateLimited {
        /// Connector name that was skipped.
        connector: String,
        /// Milliseconds until the cooldown elapses.
        retry_in_ms: u64,
    },
}

impl MercatoError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `RateLimited` error.
    pub fn rate_limited(connector: impl Into<String>, retry_in_ms: u64) -> Self {
        Self::RateLimited {
            connector: connector.into(),
            retry_in_ms,
        }
    }

    /// True when the error marks a skipped attempt rather than a failed one.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Unsupported { .. })
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Non-actionable errors are those indicating capability absence, a skipped
    /// attempt, or a benign not-found condition. Aggregates are classified based
    /// on their contents.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::Unsupported { .. } | Self::NotFound { .. } | Self::RateLimited { .. } => false,
            Self::AllProvidersFailed(inner) => inner.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    ///
    /// This preserves other error variants as-is and unwraps recursively.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
