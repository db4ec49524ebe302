use std::sync::Arc;
use std::time::Duration;

use mercato::{Mercato, MercatoConnector, MercatoError};
use mercato_core::CooldownConfig;
use mercato_middleware::{ConnectorBuilder, CooldownLimiter};

use crate::helpers::{AAPL, LogBuffer, MockConnector, m_quote, quote_at, sym};

fn regional(price: f64) -> Arc<MockConnector> {
    MockConnector::builder()
        .name("regional")
        .supports(|s| s.as_str().ends_with(".NS"))
        .with_quote_fn(move |s| Ok(quote_at(s.as_str(), price)))
        .build()
}

fn gated(raw: Arc<MockConnector>, limiter: &Arc<CooldownLimiter>) -> Arc<dyn MercatoConnector> {
    ConnectorBuilder::new(raw)
        .with_cooldown(
            Arc::clone(limiter),
            CooldownConfig {
                cooldown: Duration::from_secs(2),
            },
        )
        .build()
}

#[tokio::test(start_paused = true)]
async fn cooled_down_provider_is_skipped_not_failed() {
    let logs = LogBuffer::default();
    let _guard = logs.install();

    let limiter = Arc::new(CooldownLimiter::new());
    let nse = regional(3_900.0);
    let general = m_quote("general", 150.0).build();
    let engine = Mercato::builder()
        .with_connector(gated(nse.clone(), &limiter))
        .with_connector(general.clone())
        .build()
        .unwrap();

    let tcs = engine.quote(&sym("TCS.NS")).await.unwrap();
    assert!((tcs.price - 3_900.0).abs() < 1e-9);

    // Same family inside the cooldown: regional refuses, general answers.
    let infy = engine.quote(&sym("INFY.NS")).await.unwrap();
    assert!((infy.price - 150.0).abs() < 1e-9);
    assert_eq!(nse.call_count(), 1);
    assert_eq!(general.call_count(), 1);

    let out = logs.contents();
    assert!(out.contains("provider skipped"), "logs: {out}");
    assert!(out.contains("rate limited"), "logs: {out}");

    tokio::time::advance(Duration::from_secs(2)).await;
    let wipro = engine.quote(&sym("WIPRO.NS")).await.unwrap();
    assert!((wipro.price - 3_900.0).abs() < 1e-9);
    assert_eq!(nse.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn unclaimed_symbols_do_not_spend_the_cooldown() {
    let limiter = Arc::new(CooldownLimiter::new());
    let nse = regional(3_900.0);
    let engine = Mercato::builder()
        .with_connector(gated(nse.clone(), &limiter))
        .with_connector(m_quote("general", 150.0).build())
        .build()
        .unwrap();

    engine.quote(&sym(AAPL)).await.unwrap();
    assert_eq!(nse.call_count(), 0);

    let tcs = engine.quote(&sym("TCS.NS")).await.unwrap();
    assert!((tcs.price - 3_900.0).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn only_skips_and_nothing_cached_is_not_found() {
    let limiter = Arc::new(CooldownLimiter::new());
    let nse = regional(3_900.0);
    let engine = Mercato::builder()
        .with_connector(gated(nse, &limiter))
        .build()
        .unwrap();

    engine.quote(&sym("TCS.NS")).await.unwrap();
    let err = engine.quote(&sym("INFY.NS")).await.expect_err("cooldown and no cache");
    assert!(matches!(err, MercatoError::NotFound { .. }), "got {err:?}");
    // Non-local symbols are never attempted, so they are simply not found.
    let err = engine.quote(&sym(AAPL)).await.expect_err("nobody serves AAPL");
    assert!(matches!(err, MercatoError::NotFound { .. }));
}

#[tokio::test(start_paused = true)]
async fn slow_provider_times_out_and_falls_through() {
    let slow = MockConnector::builder()
        .name("slow")
        .delay(500)
        .with_quote_fn(|s| Ok(quote_at(s.as_str(), 1.0)))
        .build();
    let fast = m_quote("fast", 2.0).build();
    let engine = Mercato::builder()
        .with_connector(slow.clone())
        .with_connector(fast.clone())
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let q = engine.quote(&sym(AAPL)).await.unwrap();
    assert!((q.price - 2.0).abs() < 1e-9);
    assert_eq!(slow.call_count(), 1);
    assert_eq!(fast.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn every_provider_timing_out_is_not_found() {
    let engine = Mercato::builder()
        .with_connector(
            MockConnector::builder()
                .name("slow")
                .delay(500)
                .with_quote_fn(|s| Ok(quote_at(s.as_str(), 1.0)))
                .build(),
        )
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = engine.quote(&sym(AAPL)).await.expect_err("timed out");
    assert!(matches!(err, MercatoError::NotFound { .. }));
}
