mod common;
use mercato::Symbol;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    // 1. Build the engine over the demo connectors.
    let engine = common::engine();

    // 2. Resolve a quote. The engine walks the chain until a provider answers.
    let symbol = Symbol::new("AAPL")?;
    println!("quote chain: {:?}", engine.chain(mercato::Capability::Quote));
    let quote = engine.quote(&symbol).await?;
    println!("{quote:#?}");

    // 3. A second call within the TTL is served from the cache.
    let again = engine.quote(&symbol).await?;
    println!("cached price: {}", again.price);

    Ok(())
}
