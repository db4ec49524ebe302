use chrono::DateTime;
use mercato_core::{HistoryPoint, HistoryRequest, Period, Symbol};

use super::quotes;

// 2024-01-01T00:00:00Z
const ORIGIN: i64 = 1_704_067_200;
const DAY: i64 = 86_400;

const fn bars_for(period: Period) -> usize {
    match period {
        Period::OneDay => 1,
        Period::FiveDays => 5,
        Period::OneMonth => 21,
        Period::ThreeMonths => 63,
        _ => 126,
    }
}

/// Synthetic daily series that walks from the previous close toward the
/// current price.
pub fn by_symbol(symbol: &Symbol, req: HistoryRequest) -> Option<Vec<HistoryPoint>> {
    let q = quotes::by_symbol(symbol)?;
    let n = bars_for(req.period);
    let step = (q.price - q.previous_close) / n as f64;
    let points = (0..n)
        .filter_map(|i| {
            let ts = DateTime::from_timestamp(ORIGIN + i as i64 * DAY, 0)?;
            let open = q.previous_close + step * i as f64;
            let close = open + step;
            Some(HistoryPoint {
                timestamp: ts,
                open,
                high: open.max(close),
                low: open.min(close),
                close,
                volume: q.volume / 2 + i as u64,
            })
        })
        .collect();
    Some(points)
}
