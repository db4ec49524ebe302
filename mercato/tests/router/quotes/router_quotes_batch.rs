use std::time::Duration;

use mercato::{Mercato, MercatoError};
use tokio::time::Instant;

use crate::helpers::{AAPL, MSFT, MockConnector, TSLA, quote_at, sym};

#[tokio::test]
async fn quotes_keep_input_order_and_report_failures() {
    let up = MockConnector::builder()
        .name("up")
        .with_quote_fn(|s| match s.as_str() {
            "ZZZZ" => Err(MercatoError::not_found(format!("quote for {s}"))),
            other => Ok(quote_at(other, 120.0)),
        })
        .build();
    let engine = Mercato::builder().with_connector(up).build().unwrap();

    let (ok, failed) = engine
        .quotes(&[sym(TSLA), sym("ZZZZ"), sym(AAPL), sym(MSFT)])
        .await;

    let symbols: Vec<&str> = ok.iter().map(|q| q.symbol.as_str()).collect();
    assert_eq!(symbols, vec![TSLA, AAPL, MSFT]);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0.as_str(), "ZZZZ");
    assert!(matches!(failed[0].1, MercatoError::NotFound { .. }));
}

#[tokio::test]
async fn empty_batch_makes_no_calls() {
    let up = MockConnector::builder()
        .name("up")
        .with_quote_fn(|s| Ok(quote_at(s.as_str(), 1.0)))
        .build();
    let engine = Mercato::builder().with_connector(up.clone()).build().unwrap();

    let (ok, failed) = engine.quotes(&[]).await;
    assert!(ok.is_empty() && failed.is_empty());
    assert_eq!(up.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn batch_fan_out_is_bounded() {
    let up = MockConnector::builder()
        .name("up")
        .delay(10)
        .with_quote_fn(|s| Ok(quote_at(s.as_str(), 1.0)))
        .build();
    let engine = Mercato::builder()
        .with_connector(up.clone())
        .batch_concurrency(2)
        .build()
        .unwrap();

    let symbols: Vec<_> = (0..6).map(|i| sym(&format!("S{i}"))).collect();
    let started = Instant::now();
    let (ok, failed) = engine.quotes(&symbols).await;
    let elapsed = started.elapsed();

    assert_eq!(ok.len(), 6);
    assert!(failed.is_empty());
    assert_eq!(up.call_count(), 6);
    // Two at a time, 10ms each: three rounds.
    assert!(elapsed >= Duration::from_millis(30), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(60), "elapsed {elapsed:?}");
}
