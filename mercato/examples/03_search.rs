mod common;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let engine = common::engine();

    let query = std::env::args().nth(1).unwrap_or_else(|| "apple".to_string());
    let hits = engine.search(&query).await?;
    println!("{} result(s) for {query:?}", hits.len());
    for hit in hits {
        println!("{:<14} {:<40} {}", hit.symbol, hit.name, hit.exchange);
    }

    Ok(())
}
