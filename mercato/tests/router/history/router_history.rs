use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use mercato::{HistoryRequest, Interval, Mercato, MercatoError, Period};

use crate::helpers::{AAPL, MockConnector, bars, sym};

#[tokio::test]
async fn empty_series_moves_on_to_the_next_provider() {
    let empty = MockConnector::builder()
        .name("empty")
        .returns_history_ok(vec![])
        .build();
    let full = MockConnector::builder()
        .name("full")
        .returns_history_ok(bars(3, 10.0))
        .build();
    let engine = Mercato::builder()
        .with_connector(empty.clone())
        .with_connector(full.clone())
        .build()
        .unwrap();

    let series = engine.history(&sym(AAPL), HistoryRequest::default()).await;
    assert_eq!(series.len(), 3);
    assert_eq!(empty.call_count(), 1);
    assert_eq!(full.call_count(), 1);
}

#[tokio::test]
async fn exhausted_chain_yields_an_empty_series() {
    let broken = MockConnector::builder()
        .name("broken")
        .with_history_fn(|_s, _r| Err(MercatoError::connector("broken", "HTTP 500")))
        .build();
    let engine = Mercato::builder()
        .with_connector(broken)
        .with_connector(MockConnector::builder().name("empty").returns_history_ok(vec![]).build())
        .build()
        .unwrap();

    let series = engine.history(&sym(AAPL), HistoryRequest::default()).await;
    assert!(series.is_empty());
}

#[tokio::test]
async fn quote_only_connectors_are_not_asked_for_history() {
    let engine = Mercato::builder()
        .with_connector(crate::helpers::m_quote("quotes", 1.0).build())
        .build()
        .unwrap();
    assert!(engine.history(&sym(AAPL), HistoryRequest::default()).await.is_empty());
}

#[tokio::test]
async fn cache_is_keyed_by_period_and_interval() {
    let up = MockConnector::builder()
        .name("up")
        .with_history_fn(|_s, r| {
            let n = match r.period {
                Period::FiveDays => 5,
                _ => 21,
            };
            Ok(bars(n, 1.0))
        })
        .build();
    let engine = Mercato::builder().with_connector(up.clone()).build().unwrap();

    let five = HistoryRequest::new(Period::FiveDays, Interval::OneDay);
    let month = HistoryRequest::default();
    assert_eq!(engine.history(&sym(AAPL), five).await.len(), 5);
    assert_eq!(engine.history(&sym(AAPL), month).await.len(), 21);
    assert_eq!(engine.history(&sym(AAPL), five).await.len(), 5);
    assert_eq!(up.call_count(), 2);

    let hourly = HistoryRequest::new(Period::FiveDays, Interval::OneHour);
    engine.history(&sym(AAPL), hourly).await;
    assert_eq!(up.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn expired_series_is_served_when_every_provider_fails() {
    let down = Arc::new(AtomicBool::new(false));
    let flag = down.clone();
    let up = MockConnector::builder()
        .name("up")
        .with_history_fn(move |_s, _r| {
            if flag.load(Ordering::SeqCst) {
                Err(MercatoError::connector("up", "HTTP 503"))
            } else {
                Ok(bars(4, 7.0))
            }
        })
        .build();
    let engine = Mercato::builder().with_connector(up).build().unwrap();

    let fresh = engine.history(&sym(AAPL), HistoryRequest::default()).await;
    tokio::time::advance(Duration::from_secs(301)).await;
    down.store(true, Ordering::SeqCst);

    let stale = engine.history(&sym(AAPL), HistoryRequest::default()).await;
    assert_eq!(stale, fresh);
}
