use std::sync::Arc;

use mercato_core::CooldownConfig;
use mercato_core::connector::MercatoConnector;
use mercato_middleware::{ConnectorBuilder, CooldownLimiter};

use crate::{ScrapeConnector, YahooConnector};

/// Builder type alias specialized for Yahoo connectors.
pub type YahooConnectorBuilder = ConnectorBuilder;

impl YahooConnector {
    /// Returns an unwrapped builder around the default connector.
    ///
    /// Customize with the builder methods before calling `.build()`.
    #[must_use]
    pub fn builder() -> YahooConnectorBuilder {
        let raw: Arc<dyn MercatoConnector> = Arc::new(Self::new_default());
        ConnectorBuilder::new(raw)
    }

    /// Returns a builder gated on `limiter` with a conservative 1 s cooldown.
    #[must_use]
    pub fn rate_limited(limiter: Arc<CooldownLimiter>) -> YahooConnectorBuilder {
        Self::builder().with_cooldown(
            limiter,
            CooldownConfig {
                cooldown: std::time::Duration::from_secs(1),
            },
        )
    }
}

impl ScrapeConnector {
    /// Returns an unwrapped builder around the default scraper.
    #[must_use]
    pub fn builder() -> YahooConnectorBuilder {
        let raw: Arc<dyn MercatoConnector> = Arc::new(Self::new_default());
        ConnectorBuilder::new(raw)
    }
}
