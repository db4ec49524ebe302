//! Batch resolution and movers ranking.

use futures::StreamExt;
use mercato_core::{MoverEntry, MoverKind, Quote, Symbol};

use crate::Mercato;

/// Rank quotes into gainers or losers.
///
/// Gainers keep strictly positive percent changes, largest first; losers keep
/// strictly negative ones, most negative first. Unchanged quotes appear in
/// neither list. Equal changes keep their input order. The result holds at
/// most `cap` entries.
#[must_use]
pub fn rank_movers(quotes: &[Quote], kind: MoverKind, cap: usize) -> Vec<MoverEntry> {
    let mut picked: Vec<&Quote> = quotes
        .iter()
        .filter(|q| match kind {
            MoverKind::Gainers => q.change_percent > 0.0,
            MoverKind::Losers => q.change_percent < 0.0,
        })
        .collect();
    match kind {
        MoverKind::Gainers => picked.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent)),
        MoverKind::Losers => picked.sort_by(|a, b| a.change_percent.total_cmp(&b.change_percent)),
    }
    picked.into_iter().take(cap).map(MoverEntry::from).collect()
}

impl Mercato {
    /// Resolve every symbol through the quote chain with bounded concurrency.
    ///
    /// Failed symbols are dropped and logged; survivors keep input order.
    pub(crate) async fn resolve_many(&self, symbols: &[Symbol]) -> Vec<Quote> {
        let total = symbols.len();
        let resolved: Vec<Option<Quote>> = futures::stream::iter(symbols.iter().cloned())
            .map(|s| async move {
                match self.quote(&s).await {
                    Ok(q) => Some(q),
                    Err(e) => {
                        tracing::warn!(symbol = %s, error = %e, "dropping symbol from batch");
                        None
                    }
                }
            })
            .buffered(self.cfg.batch_concurrency.max(1))
            .collect()
            .await;
        let out: Vec<Quote> = resolved.into_iter().flatten().collect();
        tracing::debug!(requested = total, resolved = out.len(), "batch resolved");
        out
    }
}
