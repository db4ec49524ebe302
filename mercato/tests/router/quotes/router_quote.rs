use mercato::{Mercato, MercatoError};

use crate::helpers::{AAPL, MSFT, MockConnector, m_failing, m_not_found, m_quote, quote_at, sym};

#[tokio::test]
async fn repeated_quote_within_ttl_hits_upstream_once() {
    let up = m_quote("up", 190.0).build();
    let engine = Mercato::builder().with_connector(up.clone()).build().unwrap();

    let first = engine.quote(&sym(AAPL)).await.unwrap();
    let second = engine.quote(&sym(AAPL)).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(up.call_count(), 1);
}

#[tokio::test]
async fn cache_is_keyed_per_symbol() {
    let up = m_quote("up", 190.0).build();
    let engine = Mercato::builder().with_connector(up.clone()).build().unwrap();

    engine.quote(&sym(AAPL)).await.unwrap();
    let msft = engine.quote(&sym(MSFT)).await.unwrap();
    engine.quote(&sym("aapl")).await.unwrap();

    assert_eq!(msft.symbol.as_str(), MSFT);
    assert_eq!(up.call_count(), 2);
}

#[tokio::test]
async fn failed_provider_falls_through_to_next() {
    let broken = m_failing("broken").build();
    let backup = m_quote("backup", 42.0).build();
    let engine = Mercato::builder()
        .with_connector(broken.clone())
        .with_connector(backup.clone())
        .build()
        .unwrap();

    let q = engine.quote(&sym(AAPL)).await.unwrap();
    assert!((q.price - 42.0).abs() < 1e-9);
    assert_eq!(broken.call_count(), 1);
    assert_eq!(backup.call_count(), 1);
}

#[tokio::test]
async fn data_errors_also_fall_through() {
    let zero_price = MockConnector::builder()
        .name("zero")
        .with_quote_fn(|s| Err(MercatoError::Data(format!("no usable price for {s}"))))
        .build();
    let engine = Mercato::builder()
        .with_connector(zero_price)
        .with_connector(m_quote("backup", 42.0).build())
        .build()
        .unwrap();

    let q = engine.quote(&sym(AAPL)).await.unwrap();
    assert!((q.price - 42.0).abs() < 1e-9);
}

#[tokio::test]
async fn unknown_symbol_with_empty_cache_is_not_found() {
    let engine = Mercato::builder()
        .with_connector(m_not_found("a").build())
        .with_connector(m_failing("b").build())
        .build()
        .unwrap();

    let err = engine.quote(&sym("ZZZZ")).await.expect_err("nothing to serve");
    match err {
        MercatoError::NotFound { what } => assert_eq!(what, "quote for ZZZZ"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn first_success_wins_without_reconciliation() {
    let engine = Mercato::builder()
        .with_connector(
            MockConnector::builder()
                .name("first")
                .with_quote_fn(|s| Ok(quote_at(s.as_str(), 10.0)))
                .build(),
        )
        .with_connector(m_quote("second", 20.0).build())
        .build()
        .unwrap();

    let q = engine.quote(&sym(AAPL)).await.unwrap();
    assert!((q.price - 10.0).abs() < 1e-9);
    assert!((q.change - (10.0 - 100.0)).abs() < 1e-9);
}
