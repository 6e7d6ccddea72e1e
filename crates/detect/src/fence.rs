//! Tukey's fences computation and point-set partitioning.
//!
//! Quartiles use linear interpolation between order statistics (for a sorted
//! list of n values and target percentile p, rank = p * (n - 1), interpolated
//! between the two bracketing values). Alternative quantile conventions
//! (nearest-rank, midpoint) yield different fences and are deliberately not
//! used.

use ordered_float::OrderedFloat;
use tickfence_core::{Error, Point, Result};
use tracing::warn;

/// Quartiles and fences computed over a point set's prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fences {
    /// 25th percentile.
    pub q1: f64,
    /// 75th percentile.
    pub q3: f64,
    /// Interquartile range, `q3 - q1`.
    pub iqr: f64,
    /// Lower fence, `q1 - k * iqr`.
    pub lower: f64,
    /// Upper fence, `q3 + k * iqr`.
    pub upper: f64,
}

impl Fences {
    /// Compute the fences of a non-empty point set with multiplier `k`.
    ///
    /// `k = 0` collapses the fences to `[q1, q3]`; negative `k` narrows them
    /// further and is accepted. For a single point both quartiles equal the
    /// point's price, so the fences collapse to that value.
    pub fn compute(points: &[Point], k: f64) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::invalid_input(
                "quartiles are undefined for an empty point set",
            ));
        }

        let mut prices: Vec<OrderedFloat<f64>> =
            points.iter().map(Point::price_key).collect();
        prices.sort_unstable();

        let q1 = quantile(&prices, 0.25);
        let q3 = quantile(&prices, 0.75);
        let iqr = q3 - q1;

        Ok(Self {
            q1,
            q3,
            iqr,
            lower: q1 - k * iqr,
            upper: q3 + k * iqr,
        })
    }

    /// Whether a price lies within the fences (inclusive both ends).
    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        self.lower <= price && price <= self.upper
    }
}

/// Linear-interpolation quantile over an ascending-sorted slice.
fn quantile(sorted: &[OrderedFloat<f64>], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0].into_inner();
    }

    let rank = p * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let lo_value = sorted[lo].into_inner();
    if lo == hi {
        return lo_value;
    }

    let frac = rank - lo as f64;
    lo_value + (sorted[hi].into_inner() - lo_value) * frac
}

/// Result of partitioning a point set against its own fences.
#[derive(Debug, Clone)]
pub struct FencePartition {
    /// Points within the fences, in original relative order.
    pub kept: Vec<Point>,
    /// Points outside the fences, in original relative order.
    pub outliers: Vec<Point>,
    /// The fences the partition was evaluated against.
    pub fences: Fences,
}

/// Partition a point set into within-fences and outside-fences subsets.
///
/// Takes the set by value: the caller's buffer is consumed and becomes the
/// `kept` subset, so an evicted point cannot silently alias back into the
/// window. Both subsets preserve the input's relative order. A pass that
/// flags at least one outlier logs a notice listing the offenders; a pass
/// with none logs nothing.
pub fn partition(points: Vec<Point>, k: f64) -> Result<FencePartition> {
    let fences = Fences::compute(&points, k)?;

    let mut kept = Vec::with_capacity(points.len());
    let mut outliers = Vec::new();
    for point in points {
        if fences.contains(point.price) {
            kept.push(point);
        } else {
            outliers.push(point);
        }
    }

    if !outliers.is_empty() {
        let listing = outliers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        warn!(
            lower = fences.lower,
            upper = fences.upper,
            "outliers found: {listing}"
        );
    }

    Ok(FencePartition {
        kept,
        outliers,
        fences,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_points(prices: &[f64]) -> Vec<Point> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                let date = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64);
                Point::new(date, price)
            })
            .collect()
    }

    #[test]
    fn test_quantile_interpolation() {
        // [1, 2, 3, 4]: q1 rank = 0.75 -> 1.75, q3 rank = 2.25 -> 3.25
        let fences = Fences::compute(&make_points(&[1.0, 2.0, 3.0, 4.0]), 0.0).unwrap();
        assert!((fences.q1 - 1.75).abs() < 1e-10);
        assert!((fences.q3 - 3.25).abs() < 1e-10);
        assert!((fences.iqr - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_quantile_exact_order_statistic() {
        // [10, 20, 30, 40, 50]: q1 rank = 1.0 and q3 rank = 3.0 land exactly.
        let fences = Fences::compute(&make_points(&[10.0, 20.0, 30.0, 40.0, 50.0]), 0.0).unwrap();
        assert!((fences.q1 - 20.0).abs() < 1e-10);
        assert!((fences.q3 - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_unsorted_input_is_sorted_internally() {
        let fences = Fences::compute(&make_points(&[4.0, 1.0, 3.0, 2.0]), 0.0).unwrap();
        assert!((fences.q1 - 1.75).abs() < 1e-10);
        assert!((fences.q3 - 3.25).abs() < 1e-10);
    }

    #[test]
    fn test_empty_set_is_invalid_input() {
        let err = Fences::compute(&[], 1.5).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_singleton_fences_collapse() {
        let points = make_points(&[42.0]);
        let fences = Fences::compute(&points, 1.5).unwrap();
        assert!((fences.lower - 42.0).abs() < 1e-10);
        assert!((fences.upper - 42.0).abs() < 1e-10);

        let part = partition(points, 1.5).unwrap();
        assert_eq!(part.kept.len(), 1);
        assert!(part.outliers.is_empty());
    }

    #[test]
    fn test_k_zero_collapses_to_quartiles() {
        let part = partition(make_points(&[1.0, 2.0, 3.0, 4.0]), 0.0).unwrap();
        // Fences are [1.75, 3.25]: only 2 and 3 survive.
        let kept: Vec<f64> = part.kept.iter().map(|p| p.price).collect();
        assert_eq!(kept, vec![2.0, 3.0]);
        assert_eq!(part.outliers.len(), 2);
    }

    #[test]
    fn test_negative_k_does_not_error() {
        let part = partition(make_points(&[1.0, 2.0, 3.0, 4.0]), -0.5).unwrap();
        assert_eq!(part.kept.len() + part.outliers.len(), 4);
    }

    #[test]
    fn test_partition_preserves_relative_order() {
        // Sorted: [10, 11, 12, 13, 999, 1000]; q1 = 11.25, q3 = 752.5.
        // With k = 0 the fences are the quartiles themselves.
        let part = partition(
            make_points(&[12.0, 1000.0, 11.0, 999.0, 13.0, 10.0]),
            0.0,
        )
        .unwrap();
        let kept: Vec<f64> = part.kept.iter().map(|p| p.price).collect();
        let out: Vec<f64> = part.outliers.iter().map(|p| p.price).collect();
        assert_eq!(kept, vec![12.0, 13.0]);
        assert_eq!(out, vec![1000.0, 11.0, 999.0, 10.0]);
    }

    #[test]
    fn test_partition_is_a_partition() {
        let points = make_points(&[5.0, 6.0, 500.0, 7.0]);
        let part = partition(points.clone(), 1.5).unwrap();
        assert_eq!(part.kept.len() + part.outliers.len(), points.len());
        for point in &points {
            let in_kept = part.kept.contains(point);
            let in_out = part.outliers.contains(point);
            assert!(in_kept != in_out);
        }
    }

    #[test]
    fn test_idempotent_on_clean_set() {
        let first = partition(make_points(&[10.0, 11.0, 12.0, 13.0]), 1.5).unwrap();
        assert!(first.outliers.is_empty());

        let second = partition(first.kept.clone(), 1.5).unwrap();
        assert!(second.outliers.is_empty());
        assert_eq!(second.kept, first.kept);
    }

    #[test]
    fn test_k_monotonicity() {
        let points = make_points(&[1.0, 2.0, 3.0, 4.0, 100.0, 200.0]);
        let mut previous_kept = 0;
        for k in [0.0, 0.5, 1.0, 1.5, 3.0, 10.0] {
            let part = partition(points.clone(), k).unwrap();
            assert!(part.kept.len() >= previous_kept, "kept shrank at k={k}");
            previous_kept = part.kept.len();
        }
    }

    #[test]
    fn test_inclusive_bounds() {
        // With k = 0 the quartiles themselves sit exactly on the fences.
        let part = partition(make_points(&[10.0, 20.0, 30.0, 40.0, 50.0]), 0.0).unwrap();
        let kept: Vec<f64> = part.kept.iter().map(|p| p.price).collect();
        assert!(kept.contains(&20.0));
        assert!(kept.contains(&40.0));
    }
}
