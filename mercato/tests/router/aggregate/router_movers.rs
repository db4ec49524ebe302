use std::collections::HashMap;
use std::sync::Arc;

use mercato::{Catalog, Mercato, MercatoError, MoverKind, Region};

use crate::helpers::{LogBuffer, MockConnector, quote_with_change, sym};

/// Engine over a global movers universe whose quotes move by `changes`.
fn engine_with_changes(changes: &[(&str, f64)]) -> (Mercato, Arc<MockConnector>) {
    let table: HashMap<String, f64> = changes
        .iter()
        .map(|(s, pct)| ((*s).to_string(), *pct))
        .collect();
    let up = MockConnector::builder()
        .name("up")
        .with_quote_fn(move |s| match table.get(s.as_str()) {
            Some(pct) => Ok(quote_with_change(s.as_str(), *pct)),
            None => Err(MercatoError::connector("up", format!("HTTP 500 for {s}"))),
        })
        .build();

    let mut catalog = Catalog::default();
    catalog.global.movers = changes.iter().map(|(s, _)| sym(s)).collect();
    let engine = Mercato::builder()
        .with_connector(up.clone())
        .catalog(catalog)
        .build()
        .unwrap();
    (engine, up)
}

fn symbols(entries: &[mercato::MoverEntry]) -> Vec<&str> {
    entries.iter().map(|m| m.symbol.as_str()).collect()
}

const EXAMPLE: &[(&str, f64)] = &[
    ("P5", 5.0),
    ("M3", -3.0),
    ("P10", 10.0),
    ("P2", 2.0),
    ("M7", -7.0),
    ("FLAT", 0.0),
    ("P8", 8.0),
    ("M1", -1.0),
];

#[tokio::test]
async fn gainers_and_losers_from_the_reference_example() {
    let (engine, _) = engine_with_changes(EXAMPLE);

    let gainers = engine.movers(Region::Global, MoverKind::Gainers, Some(5)).await;
    assert_eq!(symbols(&gainers), vec!["P10", "P8", "P5", "P2"]);

    let losers = engine.movers(Region::Global, MoverKind::Losers, Some(5)).await;
    assert_eq!(symbols(&losers), vec!["M7", "M3", "M1"]);
}

#[tokio::test]
async fn default_cap_comes_from_config() {
    let (engine, _) = engine_with_changes(&[
        ("A", 1.0),
        ("B", 2.0),
        ("C", 3.0),
        ("D", 4.0),
        ("E", 5.0),
        ("F", 6.0),
        ("G", 7.0),
    ]);

    let gainers = engine.movers(Region::Global, MoverKind::Gainers, None).await;
    assert_eq!(symbols(&gainers), vec!["G", "F", "E", "D", "C"]);

    let top2 = engine.movers(Region::Global, MoverKind::Gainers, Some(2)).await;
    assert_eq!(symbols(&top2), vec!["G", "F"]);
}

#[tokio::test]
async fn failed_symbols_are_dropped_and_logged() {
    let logs = LogBuffer::default();
    let _guard = logs.install();

    let up = MockConnector::builder()
        .name("up")
        .with_quote_fn(|s| match s.as_str() {
            "BAD1" | "BAD2" => Err(MercatoError::connector("up", "HTTP 503")),
            "A" => Ok(quote_with_change("A", 1.5)),
            "B" => Ok(quote_with_change("B", -2.5)),
            _ => Ok(quote_with_change(s.as_str(), 4.0)),
        })
        .build();
    let mut catalog = Catalog::default();
    catalog.global.movers = ["A", "BAD1", "B", "BAD2", "C"].iter().map(|s| sym(s)).collect();
    let engine = Mercato::builder()
        .with_connector(up)
        .catalog(catalog)
        .build()
        .unwrap();

    let gainers = engine.movers(Region::Global, MoverKind::Gainers, None).await;
    assert_eq!(symbols(&gainers), vec!["C", "A"]);

    let out = logs.contents();
    assert_eq!(out.matches("dropping symbol from batch").count(), 2, "logs: {out}");
    assert!(out.contains("BAD1") && out.contains("BAD2"), "logs: {out}");

    let losers = engine.movers(Region::Global, MoverKind::Losers, None).await;
    assert_eq!(symbols(&losers), vec!["B"]);
}

#[tokio::test]
async fn movers_are_cached_per_region_kind_and_cap() {
    let (engine, up) = engine_with_changes(EXAMPLE);

    engine.movers(Region::Global, MoverKind::Gainers, Some(5)).await;
    assert_eq!(up.call_count(), EXAMPLE.len());

    // Same key: no new resolution at all.
    engine.movers(Region::Global, MoverKind::Gainers, Some(5)).await;
    assert_eq!(up.call_count(), EXAMPLE.len());

    // Different key: re-ranked from the per-symbol quote cache.
    let losers = engine.movers(Region::Global, MoverKind::Losers, Some(2)).await;
    assert_eq!(symbols(&losers), vec!["M7", "M3"]);
    assert_eq!(up.call_count(), EXAMPLE.len());
}

#[tokio::test]
async fn universe_that_fails_entirely_yields_empty() {
    let down = MockConnector::builder()
        .name("down")
        .with_quote_fn(|_s| Err(MercatoError::connector("down", "HTTP 503")))
        .build();
    let mut catalog = Catalog::default();
    catalog.global.movers = vec![sym("NOPE")];
    let engine = Mercato::builder()
        .with_connector(down)
        .catalog(catalog)
        .build()
        .unwrap();

    assert!(engine.movers(Region::Global, MoverKind::Gainers, None).await.is_empty());
}
