mod common;
use mercato::Symbol;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let engine = common::engine();

    let symbols = ["AAPL", "TCS.NS", "NOPE", "TSLA"]
        .iter()
        .map(|s| Symbol::new(s))
        .collect::<Result<Vec<_>, _>>()?;

    let (quotes, failures) = engine.quotes(&symbols).await;
    for q in &quotes {
        println!("{:<10} {:>10.2} {}", q.symbol.as_str(), q.price, q.currency);
    }
    for (symbol, err) in &failures {
        println!("{symbol}: {err}");
    }

    Ok(())
}
