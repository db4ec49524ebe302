use mercato_core::{MarketState, Quote, QuoteFields, Symbol};

// (symbol, name, price, previous close, volume, currency, exchange)
type Row = (&'static str, &'static str, f64, f64, u64, &'static str, &'static str);

const ROWS: &[Row] = &[
    ("^GSPC", "S&P 500", 5_200.0, 5_150.0, 0, "USD", "SNP"),
    ("^DJI", "Dow Jones Industrial Average", 39_000.0, 39_200.0, 0, "USD", "DJI"),
    ("^IXIC", "NASDAQ Composite", 16_400.0, 16_300.0, 0, "USD", "NIM"),
    ("^RUT", "Russell 2000", 2_050.0, 2_060.0, 0, "USD", "WCB"),
    ("^NSEI", "NIFTY 50", 22_400.0, 22_300.0, 0, "INR", "NSI"),
    ("^BSESN", "S&P BSE SENSEX", 73_800.0, 73_500.0, 0, "INR", "BSE"),
    ("^NSEBANK", "NIFTY BANK", 47_800.0, 48_000.0, 0, "INR", "NSI"),
    ("^CNXIT", "NIFTY IT", 36_000.0, 35_500.0, 0, "INR", "NSI"),
    ("AAPL", "Apple Inc.", 190.0, 188.0, 52_000_000, "USD", "NMS"),
    ("MSFT", "Microsoft Corporation", 420.0, 418.0, 21_000_000, "USD", "NMS"),
    ("NVDA", "NVIDIA Corporation", 1_000.0, 950.0, 45_000_000, "USD", "NMS"),
    ("TSLA", "Tesla, Inc.", 170.0, 178.0, 90_000_000, "USD", "NMS"),
    ("AMD", "Advanced Micro Devices, Inc.", 180.0, 176.0, 60_000_000, "USD", "NMS"),
    ("AMZN", "Amazon.com, Inc.", 180.0, 181.0, 40_000_000, "USD", "NMS"),
    ("GOOGL", "Alphabet Inc.", 150.0, 148.0, 25_000_000, "USD", "NMS"),
    ("META", "Meta Platforms, Inc.", 500.0, 505.0, 15_000_000, "USD", "NMS"),
    ("INTC", "Intel Corporation", 30.0, 31.5, 70_000_000, "USD", "NMS"),
    ("PFE", "Pfizer Inc.", 28.0, 28.0, 30_000_000, "USD", "NYQ"),
    ("JNJ", "Johnson & Johnson", 155.0, 154.0, 7_000_000, "USD", "NYQ"),
    ("UNH", "UnitedHealth Group Incorporated", 490.0, 500.0, 4_000_000, "USD", "NYQ"),
    ("LLY", "Eli Lilly and Company", 780.0, 770.0, 3_000_000, "USD", "NYQ"),
    ("ORCL", "Oracle Corporation", 125.0, 123.0, 9_000_000, "USD", "NYQ"),
    ("ADBE", "Adobe Inc.", 480.0, 490.0, 3_000_000, "USD", "NMS"),
    ("RELIANCE.NS", "Reliance Industries Limited", 2_900.0, 2_880.0, 6_000_000, "INR", "NSI"),
    ("TCS.NS", "Tata Consultancy Services Limited", 3_900.0, 3_950.0, 2_000_000, "INR", "NSI"),
    ("INFY.NS", "Infosys Limited", 1_500.0, 1_480.0, 7_000_000, "INR", "NSI"),
    ("HDFCBANK.NS", "HDFC Bank Limited", 1_450.0, 1_460.0, 15_000_000, "INR", "NSI"),
    ("ICICIBANK.NS", "ICICI Bank Limited", 1_090.0, 1_080.0, 12_000_000, "INR", "NSI"),
    ("SBIN.NS", "State Bank of India", 760.0, 750.0, 14_000_000, "INR", "NSI"),
    ("WIPRO.NS", "Wipro Limited", 480.0, 490.0, 8_000_000, "INR", "NSI"),
    ("SUNPHARMA.NS", "Sun Pharmaceutical Industries Limited", 1_600.0, 1_590.0, 2_500_000, "INR", "NSI"),
];

pub fn by_symbol(symbol: &Symbol) -> Option<Quote> {
    let (_, name, price, prev, volume, currency, exchange) =
        ROWS.iter().find(|row| row.0 == symbol.as_str())?;
    QuoteFields {
        name: Some((*name).to_string()),
        price: Some(*price),
        previous_close: Some(*prev),
        open: Some(*prev),
        day_high: Some(price.max(*prev)),
        day_low: Some(price.min(*prev)),
        volume: Some(*volume),
        currency: Some((*currency).to_string()),
        exchange: Some((*exchange).to_string()),
        market_state: Some(MarketState::Regular),
        ..QuoteFields::default()
    }
    .into_quote(symbol)
    .ok()
}

pub fn symbols() -> impl Iterator<Item = &'static str> {
    ROWS.iter().map(|row| row.0)
}

pub fn row_name(symbol: &str) -> Option<(&'static str, &'static str)> {
    ROWS.iter()
        .find(|row| row.0 == symbol)
        .map(|row| (row.1, row.6))
}
