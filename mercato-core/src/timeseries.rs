//! History series tidy-up applied to every connector's output.

use crate::HistoryPoint;

/// Sort bars ascending by timestamp and drop duplicates.
///
/// - The first bar seen for a timestamp wins.
/// - Bars whose close is not a positive finite number are discarded.
#[must_use]
pub fn tidy_series(mut points: Vec<HistoryPoint>) -> Vec<HistoryPoint> {
    points.retain(|p| p.close.is_finite() && p.close > 0.0);
    // Stable sort keeps arrival order among equal timestamps.
    points.sort_by_key(|p| p.timestamp);
    points.dedup_by_key(|p| p.timestamp);
    points
}
