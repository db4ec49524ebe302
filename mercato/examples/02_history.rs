mod common;
use mercato::{HistoryRequest, Interval, Period, Symbol};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let engine = common::engine();

    let symbol = Symbol::new("MSFT")?;
    let req = HistoryRequest::new(Period::FiveDays, Interval::OneDay);
    let bars = engine.history(&symbol, req).await;
    if bars.is_empty() {
        println!("no history for {symbol}");
    }
    for bar in &bars {
        println!(
            "{}  o={:.2} h={:.2} l={:.2} c={:.2} v={}",
            bar.timestamp, bar.open, bar.high, bar.low, bar.close, bar.volume
        );
    }

    Ok(())
}
