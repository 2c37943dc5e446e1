//! Dimension scorers.
//!
//! Each scorer is a pure function over whole columns of the batch:
//! `&[Option<f64>] -> Vec<f64>`. Missing values degrade to worst-case
//! scores; degenerate statistics (constant columns, zero means) resolve
//! to fixed fallback constants. Nothing here can fail.

use serde::{Deserialize, Serialize};

use crate::model::Field;

/// Guard against zero denominators in ratio computations.
const EPSILON: f64 = 1e-9;

/// Flat penalty applied to growth when yearly sales exceed the
/// large-merchant threshold.
const INCUMBENT_PENALTY: f64 = 0.2;
const INCUMBENT_SALES_1Y: f64 = 50_000.0;

/// Estimation factor for 30-day sales from 7-day sales (30/7 ≈ 4.3).
const WEEKLY_TO_MONTHLY: f64 = 4.3;

/// The scored dimensions, fixed at compile time.
///
/// Identity, input columns, and output range of every scorer are part of
/// the model: four tail-clipped log-normalized volume dimensions in
/// [0,1], commission in [0,1.20], channel in roughly [0,0.10], the rest
/// in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Sales30d,
    Gmv30d,
    Sales7d,
    Gmv7d,
    Commission,
    Influencer,
    Rank,
    Growth,
    Channel,
    Conversion,
}

impl Dimension {
    /// All dimensions, in weight-vector order.
    pub const ALL: [Self; 10] = [
        Self::Sales30d,
        Self::Gmv30d,
        Self::Sales7d,
        Self::Gmv7d,
        Self::Commission,
        Self::Influencer,
        Self::Rank,
        Self::Growth,
        Self::Channel,
        Self::Conversion,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sales30d => "sales_30d",
            Self::Gmv30d => "gmv_30d",
            Self::Sales7d => "sales_7d",
            Self::Gmv7d => "gmv_7d",
            Self::Commission => "commission",
            Self::Influencer => "influencer",
            Self::Rank => "rank",
            Self::Growth => "growth",
            Self::Channel => "channel",
            Self::Conversion => "conversion",
        }
    }

    /// The source volume column for the four clip-normalized dimensions.
    #[must_use]
    pub const fn volume_field(self) -> Option<Field> {
        match self {
            Self::Sales30d => Some(Field::Sales30d),
            Self::Gmv30d => Some(Field::Gmv30d),
            Self::Sales7d => Some(Field::Sales7d),
            Self::Gmv7d => Some(Field::Gmv7d),
            _ => None,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Linear-interpolated quantile of a sorted slice, `p` in [0,100].
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted {
        [] => 0.0,
        [only] => *only,
        _ => {
            let pos = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            let frac = pos - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * frac
        }
    }
}

/// Tail-clip & log-normalize a volume column to [0,1].
///
/// Values are clipped at the batch's `percentile`-th quantile to suppress
/// outliers, transformed with `ln(x+1)`, then min-max scaled against the
/// batch's own range. Missing values count as zero volume. A degenerate
/// batch (min == max, e.g. a single row or constant column) scores 0.5
/// for every row; an entirely missing column scores 0.
#[must_use]
pub fn clip_log_normalize(values: &[Option<f64>], percentile: f64) -> Vec<f64> {
    if values.iter().all(Option::is_none) {
        return vec![0.0; values.len()];
    }

    let filled: Vec<f64> = values.iter().map(|v| v.unwrap_or(0.0)).collect();
    let mut sorted = filled.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let upper = percentile_sorted(&sorted, percentile);

    let logs: Vec<f64> = filled.iter().map(|v| (v.min(upper) + 1.0).ln()).collect();
    let min = logs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < EPSILON {
        return vec![0.5; values.len()];
    }
    logs.iter().map(|v| (v - min) / (max - min)).collect()
}

/// Commission segment score in [0, 1.20].
///
/// Linear below the 25% tier, then stepped bonuses rewarding higher
/// commission tiers. Exceeds 1 at the top tiers: downstream weighting
/// treats it as a raw multiplier, not a probability.
#[must_use]
pub fn commission_score(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .map(|v| match v.unwrap_or(0.0) {
            c if c < 0.25 => (c / 0.25).max(0.0),
            c if c < 0.30 => 1.10,
            c if c < 0.35 => 1.15,
            _ => 1.20,
        })
        .collect()
}

/// Cosine-decay influencer score `n / sqrt(n² + mean²)` in [0,1).
///
/// The mean is taken over the whole batch with missing counted as zero.
/// A batch with no influencer activity anywhere scores 0 for every row.
#[must_use]
pub fn influencer_score(values: &[Option<f64>]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let mean =
        values.iter().map(|v| v.unwrap_or(0.0)).sum::<f64>() / values.len() as f64;
    if mean <= 0.0 {
        return vec![0.0; values.len()];
    }
    let mean_sq = mean * mean;
    values
        .iter()
        .map(|v| {
            let n = v.unwrap_or(0.0).max(0.0);
            n / (n * n + mean_sq).sqrt()
        })
        .collect()
}

/// Rank score: list-type base blended with exponential positional decay.
///
/// A missing or sub-1 `rank_no` is treated as rank 1, so unranked rows
/// take no decay penalty.
#[must_use]
pub fn rank_score(rank_types: &[&str], rank_nos: &[Option<f64>]) -> Vec<f64> {
    rank_types
        .iter()
        .zip(rank_nos)
        .map(|(kind, no)| {
            let base = match kind.trim() {
                "潜力榜" | "potential" => 0.4,
                "销量榜" | "sales" => 0.3,
                _ => 0.2,
            };
            let rank = match no {
                Some(r) if *r >= 1.0 => *r,
                _ => 1.0,
            };
            let decay = (-0.015 * (rank - 1.0)).exp();
            0.4 * base + 0.6 * decay
        })
        .collect()
}

/// Growth-potential score in [0,1].
///
/// `growth = sales_30d / (sales_1y/12 + 1)`, with a flat penalty for
/// large incumbents (`sales_1y > 50k`). When the 30-day column is absent
/// the 7-day column stands in (scaled by 30/7); with no usable volume or
/// no yearly column every row scores a neutral 0.5.
#[must_use]
pub fn growth_score(
    sales_30d: &[Option<f64>],
    sales_7d: &[Option<f64>],
    sales_1y: &[Option<f64>],
    has_30d: bool,
    has_7d: bool,
    has_1y: bool,
) -> Vec<f64> {
    let rows = sales_1y.len();
    if !has_1y || (!has_30d && !has_7d) {
        return vec![0.5; rows];
    }
    (0..rows)
        .map(|i| {
            let monthly = if has_30d {
                sales_30d[i].unwrap_or(0.0)
            } else {
                sales_7d[i].unwrap_or(0.0) * WEEKLY_TO_MONTHLY
            };
            let yearly = sales_1y[i].unwrap_or(0.0);
            let growth = monthly / (yearly / 12.0 + 1.0);
            let penalty = if yearly > INCUMBENT_SALES_1Y {
                INCUMBENT_PENALTY
            } else {
                0.0
            };
            (growth - penalty).clamp(0.0, 1.0)
        })
        .collect()
}

/// Prior channel ratios assumed when a denominator is missing or zero:
/// 30% of GMV from live-stream, 20% from product cards.
const DEFAULT_LIVE_RATIO: f64 = 0.3;
const DEFAULT_CARD_RATIO: f64 = 0.2;

/// Channel-distribution bonus, roughly [0, 0.10].
///
/// Rewards low reliance on the live-stream channel and high reliance on
/// the product-card channel. Not a [0,1] score: the coefficients cap it
/// as a small additive bonus.
#[must_use]
pub fn channel_score(
    live_gmv_30d: &[Option<f64>],
    live_gmv_7d: &[Option<f64>],
    card_gmv_30d: &[Option<f64>],
    gmv_30d: &[Option<f64>],
    gmv_7d: &[Option<f64>],
) -> Vec<f64> {
    let ratio = |part: Option<f64>, whole: Option<f64>, default: f64| match (part, whole) {
        (Some(p), Some(w)) if w > 0.0 => p / (w + EPSILON),
        _ => default,
    };
    (0..gmv_30d.len())
        .map(|i| {
            let live_30 = ratio(live_gmv_30d[i], gmv_30d[i], DEFAULT_LIVE_RATIO);
            let live_7 = ratio(live_gmv_7d[i], gmv_7d[i], DEFAULT_LIVE_RATIO);
            let card_30 = ratio(card_gmv_30d[i], gmv_30d[i], DEFAULT_CARD_RATIO);
            let score = 0.03 * (1.0 - live_30) + 0.02 * (1.0 - live_7) + 0.05 * card_30;
            score.clamp(0.0, 1.0)
        })
        .collect()
}

/// Conversion sub-scores plus the hard quality-gate mask.
///
/// The sub-score maps `conv_30d` linearly over [0, 0.20] onto [0,1]. Rows
/// below `floor` are marked for exclusion; the gate itself is applied at
/// aggregation. A batch without a usable conversion column
/// (`column_present == false`) disables the gate and scores a neutral
/// 0.5 everywhere; a missing cell in a present column scores 0 and is
/// gated out.
#[must_use]
pub fn conversion_score(
    values: &[Option<f64>],
    column_present: bool,
    floor: f64,
) -> (Vec<f64>, Vec<bool>) {
    if !column_present {
        return (vec![0.5; values.len()], vec![true; values.len()]);
    }
    let mut scores = Vec::with_capacity(values.len());
    let mut keep = Vec::with_capacity(values.len());
    for v in values {
        let c = v.unwrap_or(0.0);
        keep.push(c >= floor);
        scores.push((c.min(0.20) / 0.20).max(0.0));
    }
    (scores, keep)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_clip_log_normalize_outlier() {
        // p99 of [1,1,1,1,100] interpolates to 96.04, so the outlier is
        // clipped toward the bound and the four 1s score identically at 0.
        let scores = clip_log_normalize(&some(&[1.0, 1.0, 1.0, 1.0, 100.0]), 99.0);
        assert!((scores[4] - 1.0).abs() < TOL);
        for s in &scores[..4] {
            assert!((s - scores[0]).abs() < TOL);
            assert!(s.abs() < TOL);
        }
    }

    #[test]
    fn test_clip_log_normalize_degenerate_constant() {
        let scores = clip_log_normalize(&some(&[7.0, 7.0, 7.0]), 99.0);
        assert_eq!(scores, vec![0.5, 0.5, 0.5]);
        let single = clip_log_normalize(&some(&[42.0]), 99.0);
        assert_eq!(single, vec![0.5]);
    }

    #[test]
    fn test_clip_log_normalize_all_missing() {
        let scores = clip_log_normalize(&[None, None], 99.0);
        assert_eq!(scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_clip_log_normalize_missing_is_worst_case() {
        let scores = clip_log_normalize(&[Some(10.0), None, Some(5.0)], 99.0);
        assert!(scores[1].abs() < TOL);
        assert!(scores[0] > scores[2]);
    }

    #[test]
    fn test_commission_boundaries() {
        let scores = commission_score(&some(&[0.249_999, 0.25, 0.30, 0.35, 0.10]));
        assert!((scores[0] - 0.999_996).abs() < 1e-5);
        assert!((scores[1] - 1.10).abs() < TOL);
        assert!((scores[2] - 1.15).abs() < TOL);
        assert!((scores[3] - 1.20).abs() < TOL);
        assert!((scores[4] - 0.4).abs() < TOL);
    }

    #[test]
    fn test_commission_missing_and_negative() {
        let scores = commission_score(&[None, Some(-0.1)]);
        assert_eq!(scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_influencer_zero_mean_special_case() {
        let scores = influencer_score(&some(&[0.0, 0.0, 0.0]));
        assert_eq!(scores, vec![0.0, 0.0, 0.0]);
        let all_missing = influencer_score(&[None, None]);
        assert_eq!(all_missing, vec![0.0, 0.0]);
    }

    #[test]
    fn test_influencer_cosine_decay() {
        // mean = 10; n = 10 scores 1/sqrt(2)
        let scores = influencer_score(&some(&[0.0, 10.0, 20.0, 10.0]));
        assert!(scores[0].abs() < TOL);
        assert!((scores[1] - 1.0 / 2.0_f64.sqrt()).abs() < TOL);
        assert!(scores[2] > scores[1]);
        assert!(scores[2] < 1.0);
    }

    #[test]
    fn test_rank_score_bases_and_decay() {
        let types = ["潜力榜", "销量榜", "日榜", "potential"];
        let nos = some(&[1.0, 1.0, 1.0, 101.0]);
        let scores = rank_score(&types, &nos);
        assert!((scores[0] - (0.4 * 0.4 + 0.6)).abs() < TOL);
        assert!((scores[1] - (0.4 * 0.3 + 0.6)).abs() < TOL);
        assert!((scores[2] - (0.4 * 0.2 + 0.6)).abs() < TOL);
        let decay = (-0.015_f64 * 100.0).exp();
        assert!((scores[3] - (0.4 * 0.4 + 0.6 * decay)).abs() < TOL);
    }

    #[test]
    fn test_rank_score_missing_rank_is_rank_one() {
        let scores = rank_score(&["其他", "其他", "其他"], &[None, Some(0.0), Some(1.0)]);
        assert!((scores[0] - scores[2]).abs() < TOL);
        assert!((scores[1] - scores[2]).abs() < TOL);
    }

    #[test]
    fn test_growth_score_penalty() {
        // monthly avg = 60000/12 = 5000; growth = 5000/5001; penalty 0.2
        let scores = growth_score(
            &some(&[5_000.0]),
            &[None],
            &some(&[60_000.0]),
            true,
            false,
            true,
        );
        let expected: f64 = 5_000.0 / 5_001.0 - 0.2;
        assert!((scores[0] - expected).abs() < TOL);
    }

    #[test]
    fn test_growth_score_clipped_and_estimated() {
        // explosive growth clips at 1.0
        let scores = growth_score(&some(&[1_000.0]), &[None], &some(&[0.0]), true, false, true);
        assert!((scores[0] - 1.0).abs() < TOL);
        // 7-day fallback: 100 * 4.3 = 430 monthly
        let est = growth_score(&[None], &some(&[100.0]), &some(&[1_200.0]), false, true, true);
        let expected: f64 = 430.0 / 101.0;
        assert!((est[0] - expected.clamp(0.0, 1.0)).abs() < TOL);
    }

    #[test]
    fn test_growth_score_neutral_without_inputs() {
        let scores = growth_score(&[None, None], &[None, None], &[None, None], false, false, false);
        assert_eq!(scores, vec![0.5, 0.5]);
    }

    #[test]
    fn test_channel_score_favors_card_channel() {
        // all GMV from cards, none live: max bonus 0.03 + 0.02 + 0.05 = 0.10
        let best = channel_score(
            &some(&[0.0]),
            &some(&[0.0]),
            &some(&[1_000.0]),
            &some(&[1_000.0]),
            &some(&[100.0]),
        );
        assert!((best[0] - 0.10).abs() < 1e-6);
        // all live, no cards: 0.0
        let worst = channel_score(
            &some(&[1_000.0]),
            &some(&[100.0]),
            &some(&[0.0]),
            &some(&[1_000.0]),
            &some(&[100.0]),
        );
        assert!(worst[0].abs() < 1e-6);
    }

    #[test]
    fn test_channel_score_missing_uses_priors() {
        let scores = channel_score(&[None], &[None], &[None], &[None], &[None]);
        let expected = 0.03 * (1.0 - 0.3) + 0.02 * (1.0 - 0.3) + 0.05 * 0.2;
        assert!((scores[0] - expected).abs() < TOL);
    }

    #[test]
    fn test_conversion_gate_boundary() {
        let (scores, keep) = conversion_score(&some(&[0.019_999, 0.02, 0.25]), true, 0.02);
        assert!(!keep[0]);
        assert!(keep[1]);
        assert!((scores[1] - 0.1).abs() < TOL);
        // clipped at 0.20 before the linear map
        assert!((scores[2] - 1.0).abs() < TOL);
    }

    #[test]
    fn test_conversion_missing_cell_gated() {
        let (scores, keep) = conversion_score(&[None], true, 0.02);
        assert!(!keep[0]);
        assert!(scores[0].abs() < TOL);
    }

    #[test]
    fn test_conversion_absent_column_neutral_ungated() {
        let (scores, keep) = conversion_score(&[None, None], false, 0.02);
        assert_eq!(scores, vec![0.5, 0.5]);
        assert_eq!(keep, vec![true, true]);
    }

    #[test]
    fn test_percentile_interpolation() {
        let sorted = [1.0, 1.0, 1.0, 1.0, 100.0];
        let p99 = percentile_sorted(&sorted, 99.0);
        assert!((p99 - 96.04).abs() < 1e-9);
        assert!((percentile_sorted(&sorted, 100.0) - 100.0).abs() < TOL);
        assert!((percentile_sorted(&sorted, 0.0) - 1.0).abs() < TOL);
    }
}
