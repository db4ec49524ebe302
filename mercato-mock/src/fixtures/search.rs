use mercato_core::{SearchRequest, SearchResult};

use super::quotes;

/// Case-insensitive substring match over fixture symbols and names.
pub fn search(req: &SearchRequest) -> Vec<SearchResult> {
    let q = req.query().to_ascii_lowercase();
    let limit = req.limit().unwrap_or(usize::MAX);
    quotes::symbols()
        .filter_map(|sym| {
            let (name, exchange) = quotes::row_name(sym)?;
            let hit = sym.to_ascii_lowercase().contains(&q) || name.to_ascii_lowercase().contains(&q);
            hit.then(|| SearchResult {
                symbol: sym.to_string(),
                name: name.to_string(),
                exchange: exchange.to_string(),
                kind: if sym.starts_with('^') { "INDEX" } else { "EQUITY" }.to_string(),
            })
        })
        .take(limit)
        .collect()
}
