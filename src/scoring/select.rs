//! Top-K selection: deterministic ordering, identity dedup, truncation.

use std::collections::HashSet;

use crate::model::ScoredRecord;

/// Selected rows plus the number of duplicate rows collapsed.
#[derive(Debug, Clone)]
pub struct Selection {
    pub rows: Vec<ScoredRecord>,
    pub duplicate_rows: usize,
}

/// Sort by `total_score` descending, collapse duplicate `product_url`s
/// to their highest-scoring occurrence, and truncate to `top_k`.
///
/// The sort is stable, so score ties keep input order and results are
/// deterministic across runs.
#[must_use]
pub fn select_top_k(mut scored: Vec<ScoredRecord>, top_k: usize) -> Selection {
    scored.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let before = scored.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(before);
    scored.retain(|row| seen.insert(row.record.product_url.clone()));
    let duplicate_rows = before - scored.len();

    scored.truncate(top_k);
    Selection {
        rows: scored,
        duplicate_rows,
    }
}
