use std::sync::Arc;

use mercato::MercatoConnector;
use mercato_middleware::CooldownLimiter;
use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Mock connectors when `MERCATO_EXAMPLES_USE_MOCK` is set, live ones otherwise.
///
/// Live connectors share one cooldown limiter, NSE first so Indian symbols try
/// the exchange before Yahoo.
#[must_use]
pub fn get_connectors() -> Vec<Arc<dyn MercatoConnector>> {
    if std::env::var("MERCATO_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        vec![Arc::new(mercato_mock::MockConnector::new())]
    } else {
        let limiter = Arc::new(CooldownLimiter::new());
        vec![
            mercato_nse::NseConnector::rate_limited(limiter.clone()).build(),
            mercato_yahoo::YahooConnector::rate_limited(limiter).build(),
        ]
    }
}

#[must_use]
pub fn engine() -> mercato::Mercato {
    get_connectors()
        .into_iter()
        .fold(mercato::Mercato::builder(), mercato::MercatoBuilder::with_connector)
        .build()
        .expect("at least one connector")
}
