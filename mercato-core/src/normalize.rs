//! Shared numeric normalization used by every provider mapping.

use crate::Symbol;

/// Keep a value only when it is present and finite.
#[must_use]
pub fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

/// Missing or non-finite numbers default to zero.
#[must_use]
pub fn or_zero(v: Option<f64>) -> f64 {
    finite(v).unwrap_or(0.0)
}

/// Percent change of `change` relative to `previous_close`.
///
/// Returns `0` when the previous close is not positive; the result is never
/// `NaN` or infinite.
#[must_use]
pub fn percent_change(change: f64, previous_close: f64) -> f64 {
    if previous_close > 0.0 && change.is_finite() {
        change / previous_close * 100.0
    } else {
        0.0
    }
}

/// Derive `(change, change_percent)` from price and previous close.
///
/// The absolute change is recomputed whenever both inputs are positive;
/// otherwise the provider's own figure is used, and failing that, zero.
/// The percent is always derived from the chosen change so the two never
/// disagree.
#[must_use]
pub fn derive_change(price: f64, previous_close: f64, reported: Option<f64>) -> (f64, f64) {
    let change = if price > 0.0 && previous_close > 0.0 {
        price - previous_close
    } else {
        reported.filter(|c| c.is_finite()).unwrap_or(0.0)
    };
    (change, percent_change(change, previous_close))
}

/// First non-blank candidate, or the symbol itself.
pub fn display_name<'a, I>(candidates: I, symbol: &Symbol) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map_or_else(|| symbol.as_str().to_string(), str::to_string)
}

/// Parse a human-formatted number such as `"1,234.50"` or `"+2.31%"`.
///
/// Thousands separators, a leading `+`, surrounding parentheses, and a
/// trailing `%` are ignored.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_matches(|c: char| c == '(' || c == ')')
        .trim_end_matches('%')
        .trim_start_matches('+')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
