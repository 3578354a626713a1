use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub range_start: f64,
    pub range_end: f64,
    pub count: u64,
}

impl HistogramBin {
    pub fn midpoint(&self) -> f64 {
        (self.range_start + self.range_end) / 2.0
    }
    pub fn width(&self) -> f64 {
        self.range_end - self.range_start
    }
}

/// Equal-width histogram over `[min, max]` of `values`.
///
/// Bins are half-open except the last, which also takes the maximum. A
/// constant column is spread over `[v - 0.5, v + 0.5]` so the bin count
/// does not collapse. Empty input (or `bins == 0`) yields no bins.
pub fn build_histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 { return Vec::new(); }
    let mut min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }
    // divide before subtracting so a range wider than f64::MAX stays finite
    let width = max / bins as f64 - min / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { max } else { min + i as f64 * width })
        .collect();
    let mut counts = vec![0u64; bins];
    for &v in values {
        let mut idx = ((v / width - min / width) as usize).min(bins - 1);
        // float division can land one bin off near an edge
        if idx > 0 && v < edges[idx] {
            idx -= 1;
        } else if idx + 1 < bins && v >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }
    counts.iter().enumerate().map(|(i, &c)| HistogramBin {
        range_start: edges[i],
        range_end: edges[i + 1],
        count: c,
    }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(h: &[HistogramBin]) -> u64 { h.iter().map(|b| b.count).sum() }

    #[test] fn empty_values_no_bins() { assert!(build_histogram(&[], 30).is_empty()); }
    #[test] fn zero_bins_no_bins() { assert!(build_histogram(&[1.0, 2.0], 0).is_empty()); }

    #[test]
    fn thirty_bins_and_counts_sum() {
        let vals: Vec<f64> = (0..1000).map(|i| (i as f64).sin() * 50.0).collect();
        let h = build_histogram(&vals, 30);
        assert_eq!(h.len(), 30);
        assert_eq!(total(&h), 1000);
    }

    #[test]
    fn max_lands_in_last_bin() {
        let h = build_histogram(&[1.0, 2.0, 2.0, 3.0, 3.0, 3.0], 30);
        assert_eq!(h.len(), 30);
        assert_eq!(h[29].count, 3);
        assert_eq!(h[0].count, 1);
        assert_eq!(total(&h), 6);
        let with_two = h.iter().find(|b| b.range_start <= 2.0 && 2.0 < b.range_end).unwrap();
        assert_eq!(with_two.count, 2);
    }

    #[test]
    fn constant_column_keeps_bin_count() {
        let h = build_histogram(&[7.0, 7.0, 7.0], 30);
        assert_eq!(h.len(), 30);
        assert_eq!(total(&h), 3);
        assert!((h[0].range_start - 6.5).abs() < 1e-12);
        assert!((h[29].range_end - 7.5).abs() < 1e-12);
        let hit = h.iter().find(|b| b.count == 3).unwrap();
        assert!(hit.range_start <= 7.0 && 7.0 < hit.range_end);
    }

    #[test]
    fn extreme_range_keeps_finite_edges() {
        let h = build_histogram(&[-1e308, 0.0, 1e308], 30);
        assert_eq!(h.len(), 30);
        assert!(h.iter().all(|b| b.range_start.is_finite() && b.range_end.is_finite()));
        assert_eq!(h[0].count, 1);
        assert_eq!(h[29].count, 1);
        let zero = h.iter().find(|b| b.range_start <= 0.0 && 0.0 < b.range_end).unwrap();
        assert_eq!(zero.count, 1);
        assert_eq!(total(&h), 3);
    }

    #[test]
    fn edges_are_contiguous() {
        let h = build_histogram(&[0.0, 10.0], 4);
        for w in h.windows(2) { assert_eq!(w[0].range_end, w[1].range_start); }
        assert!((h[1].width() - 2.5).abs() < 1e-12);
        assert!((h[0].midpoint() - 1.25).abs() < 1e-12);
    }
}
