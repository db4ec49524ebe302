use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use mercato::{CacheConfig, Mercato, MercatoError};

use crate::helpers::{AAPL, LogBuffer, MockConnector, quote_at, sym};

/// Connector that serves quotes until `down` is flipped.
fn flaky(down: Arc<AtomicBool>) -> Arc<MockConnector> {
    MockConnector::builder()
        .name("flaky")
        .with_quote_fn(move |s| {
            if down.load(Ordering::SeqCst) {
                Err(MercatoError::connector("flaky", "HTTP 502"))
            } else {
                Ok(quote_at(s.as_str(), 150.0))
            }
        })
        .build()
}

#[tokio::test(start_paused = true)]
async fn expired_entry_is_served_when_chain_fails() {
    let down = Arc::new(AtomicBool::new(false));
    let up = flaky(down.clone());
    let engine = Mercato::builder().with_connector(up.clone()).build().unwrap();

    let fresh = engine.quote(&sym(AAPL)).await.unwrap();

    tokio::time::advance(Duration::from_secs(61)).await;
    down.store(true, Ordering::SeqCst);

    let stale = engine.quote(&sym(AAPL)).await.expect("stale value");
    assert_eq!(stale, fresh);
    assert_eq!(up.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn expired_entry_is_refreshed_when_chain_recovers() {
    let down = Arc::new(AtomicBool::new(false));
    let up = flaky(down.clone());
    let engine = Mercato::builder().with_connector(up.clone()).build().unwrap();

    engine.quote(&sym(AAPL)).await.unwrap();
    tokio::time::advance(Duration::from_secs(59)).await;
    engine.quote(&sym(AAPL)).await.unwrap();
    assert_eq!(up.call_count(), 1);

    tokio::time::advance(Duration::from_secs(2)).await;
    engine.quote(&sym(AAPL)).await.unwrap();
    assert_eq!(up.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn stale_value_survives_repeated_failures() {
    let down = Arc::new(AtomicBool::new(false));
    let engine = Mercato::builder()
        .with_connector(flaky(down.clone()))
        .build()
        .unwrap();

    let fresh = engine.quote(&sym(AAPL)).await.unwrap();
    down.store(true, Ordering::SeqCst);

    for _ in 0..3 {
        tokio::time::advance(Duration::from_secs(120)).await;
        let q = engine.quote(&sym(AAPL)).await.expect("still stale");
        assert_eq!(q, fresh);
    }
}

#[tokio::test]
async fn zero_ttl_always_resolves_but_still_serves_stale() {
    let down = Arc::new(AtomicBool::new(false));
    let up = flaky(down.clone());
    let engine = Mercato::builder()
        .with_connector(up.clone())
        .cache_config(CacheConfig::uniform(Duration::ZERO))
        .build()
        .unwrap();

    engine.quote(&sym(AAPL)).await.unwrap();
    engine.quote(&sym(AAPL)).await.unwrap();
    assert_eq!(up.call_count(), 2);

    down.store(true, Ordering::SeqCst);
    assert!(engine.quote(&sym(AAPL)).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn serving_stale_is_logged() {
    let logs = LogBuffer::default();
    let _guard = logs.install();

    let down = Arc::new(AtomicBool::new(false));
    let engine = Mercato::builder()
        .with_connector(flaky(down.clone()))
        .build()
        .unwrap();
    engine.quote(&sym(AAPL)).await.unwrap();
    tokio::time::advance(Duration::from_secs(61)).await;
    down.store(true, Ordering::SeqCst);
    engine.quote(&sym(AAPL)).await.unwrap();

    let out = logs.contents();
    assert!(out.contains("provider failed"), "logs: {out}");
    assert!(out.contains("serving stale"), "logs: {out}");
}
