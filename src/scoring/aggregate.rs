//! Sub-score aggregation and the conversion quality gate.

use tracing::debug;

use super::dimensions::{self, Dimension};
use super::weights::WeightVector;
use crate::config::ScoreConfig;
use crate::model::{Field, ProductRecord, ScoredRecord};
use crate::normalize::ColumnPresence;

/// Gate-filtered, scored rows plus the number of rows the gate removed.
#[derive(Debug, Clone)]
pub struct AggregateOutcome {
    pub scored: Vec<ScoredRecord>,
    pub gated_rows: usize,
}

fn column(records: &[ProductRecord], field: Field) -> Vec<Option<f64>> {
    records.iter().map(|r| r.numeric(field)).collect()
}

/// Score every dimension, combine with the resolved weights, and drop
/// rows failing the conversion-rate gate.
///
/// Gated rows are removed outright, not merely scored low. Rows keep
/// all canonical fields regardless of which dimensions
/// the active scenario weights.
#[must_use]
pub fn aggregate(
    records: Vec<ProductRecord>,
    presence: &ColumnPresence,
    weights: &WeightVector,
    config: &ScoreConfig,
) -> AggregateOutcome {
    let rows = records.len();
    let mut totals = vec![0.0_f64; rows];

    // Volume dimensions: computed only where the scenario kept weight.
    for dimension in Dimension::ALL {
        if let Some(field) = dimension.volume_field() {
            let weight = weights.get(dimension);
            if weight > 0.0 {
                let scores =
                    dimensions::clip_log_normalize(&column(&records, field), config.clip_percentile);
                accumulate(&mut totals, &scores, weight);
            }
        }
    }

    accumulate(
        &mut totals,
        &dimensions::commission_score(&column(&records, Field::Commission)),
        weights.commission,
    );
    accumulate(
        &mut totals,
        &dimensions::influencer_score(&column(&records, Field::Influencer7d)),
        weights.influencer,
    );

    let rank_types: Vec<&str> = records.iter().map(|r| r.rank_type.as_str()).collect();
    accumulate(
        &mut totals,
        &dimensions::rank_score(&rank_types, &column(&records, Field::RankNo)),
        weights.rank,
    );

    accumulate(
        &mut totals,
        &dimensions::growth_score(
            &column(&records, Field::Sales30d),
            &column(&records, Field::Sales7d),
            &column(&records, Field::Sales1y),
            presence.has(Field::Sales30d),
            presence.has(Field::Sales7d),
            presence.has(Field::Sales1y),
        ),
        weights.growth,
    );

    accumulate(
        &mut totals,
        &dimensions::channel_score(
            &column(&records, Field::LiveGmv30d),
            &column(&records, Field::LiveGmv7d),
            &column(&records, Field::CardGmv30d),
            &column(&records, Field::Gmv30d),
            &column(&records, Field::Gmv7d),
        ),
        weights.channel,
    );

    let (conv_scores, keep) = dimensions::conversion_score(
        &column(&records, Field::Conv30d),
        presence.has(Field::Conv30d),
        config.conversion_floor,
    );
    accumulate(&mut totals, &conv_scores, weights.conversion);

    let mut scored = Vec::with_capacity(rows);
    let mut gated_rows = 0;
    for ((record, total), keep) in records.into_iter().zip(totals).zip(keep) {
        if keep {
            scored.push(ScoredRecord {
                record,
                total_score: total,
            });
        } else {
            gated_rows += 1;
        }
    }

    debug!(rows, gated_rows, "aggregated batch");
    AggregateOutcome { scored, gated_rows }
}

fn accumulate(totals: &mut [f64], scores: &[f64], weight: f64) {
    if weight <= 0.0 {
        return;
    }
    for (total, score) in totals.iter_mut().zip(scores) {
        *total += weight * score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawCell, RawTable};
    use crate::normalize::normalize_table;

    fn batch(rows: &[(&str, f64, f64, f64, f64, f64)]) -> (Vec<ProductRecord>, ColumnPresence) {
        let mut table = RawTable::new();
        let col = |f: fn(&(&str, f64, f64, f64, f64, f64)) -> RawCell| {
            rows.iter().map(f).collect::<Vec<_>>()
        };
        table.insert_column("product_url", col(|r| r.0.into()));
        table.insert_column("sales_7d", col(|r| RawCell::Number(r.1)));
        table.insert_column("gmv_7d", col(|r| RawCell::Number(r.2)));
        table.insert_column("sales_30d", col(|r| RawCell::Number(r.3)));
        table.insert_column("gmv_30d", col(|r| RawCell::Number(r.4)));
        table.insert_column("conv_30d", col(|r| RawCell::Number(r.5)));
        let normalized = normalize_table(&table).expect("normalize");
        (normalized.records, normalized.presence)
    }

    #[test]
    fn test_gate_removes_rows_outright() {
        let (records, presence) = batch(&[
            ("u1", 10.0, 100.0, 40.0, 400.0, 0.05),
            ("u2", 20.0, 200.0, 80.0, 800.0, 0.019_999),
            ("u3", 30.0, 300.0, 120.0, 1_200.0, 0.02),
        ]);
        let outcome = aggregate(
            records,
            &presence,
            &WeightVector::default(),
            &ScoreConfig::default(),
        );
        assert_eq!(outcome.gated_rows, 1);
        let urls: Vec<_> = outcome
            .scored
            .iter()
            .map(|s| s.record.product_url.as_str())
            .collect();
        assert_eq!(urls, vec!["u1", "u3"]);
    }

    #[test]
    fn test_higher_volume_scores_higher() {
        let (records, presence) = batch(&[
            ("low", 1.0, 10.0, 4.0, 40.0, 0.05),
            ("high", 100.0, 1_000.0, 400.0, 4_000.0, 0.05),
        ]);
        let outcome = aggregate(
            records,
            &presence,
            &WeightVector::default(),
            &ScoreConfig::default(),
        );
        assert_eq!(outcome.scored.len(), 2);
        assert!(outcome.scored[1].total_score > outcome.scored[0].total_score);
    }

    #[test]
    fn test_all_fields_retained_in_output() {
        let (records, presence) = batch(&[("u1", 10.0, 100.0, 40.0, 400.0, 0.05)]);
        let outcome = aggregate(
            records,
            &presence,
            &WeightVector::default(),
            &ScoreConfig::default(),
        );
        let rec = &outcome.scored[0].record;
        // unscored fields survive untouched, missing metrics stay missing
        assert_eq!(rec.product_url, "u1");
        assert_eq!(rec.sales_1y, None);
        assert_eq!(rec.rank_no, None);
    }
}
