use mercato::{CacheConfig, Mercato, MercatoError, SearchRequest};

use crate::helpers::{MockConnector, hit};

#[tokio::test]
async fn results_merge_in_chain_order_without_duplicates() {
    let a = MockConnector::builder()
        .name("a")
        .returns_search_ok(vec![hit("TCS.NS", "Tata Consultancy"), hit("TATAMOTORS.NS", "Tata Motors")])
        .build();
    let b = MockConnector::builder()
        .name("b")
        .returns_search_ok(vec![hit("tcs.ns", "dup"), hit("TATASTEEL.NS", "Tata Steel")])
        .build();
    let engine = Mercato::builder().with_connector(a).with_connector(b).build().unwrap();

    let hits = engine.search("tata").await.unwrap();
    let symbols: Vec<&str> = hits.iter().map(|h| h.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["TCS.NS", "TATAMOTORS.NS", "TATASTEEL.NS"]);
    assert_eq!(hits[0].name, "Tata Consultancy");
}

#[tokio::test]
async fn limit_truncates_the_merge() {
    let a = MockConnector::builder()
        .name("a")
        .returns_search_ok(vec![hit("A", "a"), hit("B", "b"), hit("C", "c")])
        .build();
    let engine = Mercato::builder().with_connector(a).build().unwrap();

    let req = SearchRequest::new("x").unwrap().with_limit(2);
    assert_eq!(engine.search_request(&req).await.len(), 2);
}

#[tokio::test]
async fn blank_query_is_invalid() {
    let engine = Mercato::builder()
        .with_connector(MockConnector::builder().name("a").returns_search_ok(vec![]).build())
        .build()
        .unwrap();
    let err = engine.search("   ").await.expect_err("blank");
    assert!(matches!(err, MercatoError::InvalidArg(_)));
}

#[tokio::test]
async fn failing_provider_does_not_hide_others() {
    let broken = MockConnector::builder()
        .name("broken")
        .with_search_fn(|_r| Err(MercatoError::connector("broken", "HTTP 500")))
        .build();
    let ok = MockConnector::builder()
        .name("ok")
        .returns_search_ok(vec![hit("AAPL", "Apple Inc.")])
        .build();
    let engine = Mercato::builder().with_connector(broken).with_connector(ok).build().unwrap();

    let hits = engine.search("apple").await.unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn upstream_failure_yields_empty_list() {
    let broken = MockConnector::builder()
        .name("broken")
        .with_search_fn(|_r| Err(MercatoError::connector("broken", "HTTP 500")))
        .build();
    let engine = Mercato::builder().with_connector(broken).build().unwrap();
    assert!(engine.search("apple").await.unwrap().is_empty());
}

#[tokio::test]
async fn results_are_cached_per_query_case_insensitively() {
    let up = MockConnector::builder()
        .name("up")
        .returns_search_ok(vec![hit("AAPL", "Apple Inc.")])
        .build();
    let engine = Mercato::builder().with_connector(up.clone()).build().unwrap();

    engine.search("Apple").await.unwrap();
    engine.search("apple ").await.unwrap();
    assert_eq!(up.call_count(), 1);

    engine.search("microsoft").await.unwrap();
    assert_eq!(up.call_count(), 2);
}

#[tokio::test]
async fn least_recent_query_is_forgotten_when_the_cache_is_full() {
    let up = MockConnector::builder()
        .name("up")
        .returns_search_ok(vec![hit("AAPL", "Apple Inc.")])
        .build();
    let engine = Mercato::builder()
        .with_connector(up.clone())
        .cache_config(CacheConfig {
            search_capacity: 2,
            ..CacheConfig::default()
        })
        .build()
        .unwrap();

    engine.search("apple").await.unwrap();
    engine.search("banana").await.unwrap();
    engine.search("apple").await.unwrap();
    assert_eq!(up.call_count(), 2);

    // "banana" is now the least recent and makes room for "cherry".
    engine.search("cherry").await.unwrap();
    engine.search("apple").await.unwrap();
    assert_eq!(up.call_count(), 3);
    engine.search("banana").await.unwrap();
    assert_eq!(up.call_count(), 4);
}
