use std::time::Duration;

use mercato::{Catalog, Mercato, MercatoError, Region};

use crate::helpers::m_quote;

#[test]
fn build_without_connectors_is_invalid() {
    let err = Mercato::builder().build().err().expect("must fail");
    assert!(matches!(err, MercatoError::InvalidArg(_)), "got {err:?}");
}

#[test]
fn build_rejects_zero_batch_concurrency() {
    let err = Mercato::builder()
        .with_connector(m_quote("a", 101.0).build())
        .batch_concurrency(0)
        .build()
        .err()
        .expect("must fail");
    assert!(matches!(err, MercatoError::InvalidArg(_)));
}

#[test]
fn builder_settings_land_in_config() {
    let mut catalog = Catalog::default();
    catalog.local.indices.clear();

    let engine = Mercato::builder()
        .with_connector(m_quote("a", 101.0).build())
        .provider_timeout(Duration::from_millis(250))
        .batch_concurrency(3)
        .movers_cap(7)
        .catalog(catalog)
        .build()
        .expect("build");

    let cfg = engine.config();
    assert_eq!(cfg.provider_timeout, Duration::from_millis(250));
    assert_eq!(cfg.batch_concurrency, 3);
    assert_eq!(cfg.movers_cap, 7);
    assert_eq!(cfg.cache.quote_ttl, Duration::from_secs(60));
    assert!(engine.catalog().indices(Region::Local).is_empty());
    assert_eq!(engine.catalog().indices(Region::Global).len(), 4);
}
