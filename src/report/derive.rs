//! Series derived from loaded columns. Results are fresh values; the
//! source table is never touched.

use crate::report::chart::{Bin, value_range};

pub const HISTOGRAM_BINS: usize = 50;

/// Running total, restarting from zero for every call.
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

/// Equal-width bins over `[min, max]`; `max` lands in the last bin and
/// NaN cells are skipped.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let bins = bins.max(1);
    let (lo, hi) = value_range(values.iter().copied());

    // A span wider than f64::MAX is measured at half scale.
    let scale = if (hi - lo).is_finite() { 1.0 } else { 0.5 };
    let width = (hi * scale - lo * scale) / bins as f64;
    let edge = |i: usize| {
        let t = i as f64 / bins as f64;
        lo * (1.0 - t) + hi * t
    };

    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lower: if i == 0 { lo } else { edge(i) },
            upper: if i + 1 == bins { hi } else { edge(i + 1) },
            count: 0,
        })
        .collect();

    for v in values.iter().filter(|v| v.is_finite()) {
        let idx = (((v * scale - lo * scale) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cumulative_sum_accumulates() {
        assert_eq!(cumulative_sum(&[1.0, 2.0, 0.0, 4.5]), vec![1.0, 3.0, 3.0, 7.5]);
        assert_eq!(cumulative_sum(&[]), Vec::<f64>::new());
    }

    #[test]
    fn cumulative_sum_is_non_decreasing_for_durations() {
        let cpu_used = [3.0, 0.0, 12.0, 7.0, 0.0, 1.0];
        let sums = cumulative_sum(&cpu_used);
        assert!(sums.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn histogram_spans_min_to_max() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let bins = histogram(&values, HISTOGRAM_BINS);
        assert_eq!(bins.len(), 50);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[49].upper, 100.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 101);
        // 100.0 sits on the upper edge and belongs to the last bin.
        assert_eq!(bins[49].count, 3);
    }

    #[test]
    fn histogram_of_constant_column() {
        let bins = histogram(&[7.0, 7.0, 7.0], 10);
        assert_eq!(bins.first().unwrap().lower, 6.5);
        assert_eq!(bins.last().unwrap().upper, 7.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u64>(), 3);
    }

    #[test]
    fn histogram_edges_stay_finite_across_the_whole_f64_range() {
        let bins = histogram(&[-1e308, 0.0, 1e308], 2);
        let finite = bins.iter().all(|b| b.lower.is_finite() && b.upper.is_finite());
        assert!(finite, "{:?}", bins);
        assert_eq!(bins[0].lower, -1e308);
        assert_eq!(bins[0].upper, 0.0);
        assert_eq!(bins[1].upper, 1e308);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn histogram_skips_nan() {
        let bins = histogram(&[1.0, f64::NAN, 2.0], 2);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1]);
    }
}
