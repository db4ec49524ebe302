mod common;
use mercato::{MoverKind, Region};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let engine = common::engine();

    for region in [Region::Global, Region::Local] {
        println!("== {region} overview ==");
        for q in engine.overview(region).await {
            println!("{:<10} {:>12.2} {:>+7.2}%", q.symbol.as_str(), q.price, q.change_percent);
        }

        for kind in [MoverKind::Gainers, MoverKind::Losers] {
            println!("-- {region} {kind} --");
            for m in engine.movers(region, kind, Some(5)).await {
                println!("{:<14} {:>10.2} {:>+7.2}%", m.symbol.as_str(), m.price, m.change_percent);
            }
        }
    }

    println!("== tech sector ==");
    for q in engine.sector_basket(Region::Global, "tech").await {
        println!("{:<10} {}", q.symbol.as_str(), q.name);
    }

    Ok(())
}
