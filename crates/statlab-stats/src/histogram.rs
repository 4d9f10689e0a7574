use std::ops::Range;

use serde::Serialize;

/// Equal-width histogram spanning the sample range.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// Bins in ascending order. The last bin is closed on the right so the
    /// sample maximum is counted.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    /// Value range covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// Number of values in this bin.
    pub count: u64,
}

/// Smallest bin count [`sturges_bin_count`] returns.
pub const MIN_BINS: usize = 5;
/// Largest bin count [`sturges_bin_count`] returns.
pub const MAX_BINS: usize = 20;

/// Sturges' rule `ceil(log2(n) + 1)`, clamped to `[MIN_BINS, MAX_BINS]`.
///
/// # Examples
///
/// ```
/// # use statlab_stats::histogram::sturges_bin_count;
/// assert_eq!(sturges_bin_count(10), 5);
/// assert_eq!(sturges_bin_count(100), 8);
/// assert_eq!(sturges_bin_count(10_000_000), 20);
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
#[must_use]
pub fn sturges_bin_count(n: usize) -> usize {
    if n == 0 {
        return MIN_BINS;
    }
    let bins = ((n as f64).log2() + 1.0).ceil() as usize;
    bins.clamp(MIN_BINS, MAX_BINS)
}

impl Histogram {
    /// Creates an equal-width histogram from unsorted values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlab_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::new(&values, 3);
    /// let total: u64 = histogram.bins.iter().map(|b| b.count).sum();
    /// assert_eq!(total, 10);
    /// ```
    #[must_use]
    pub fn new(values: &[f64], num_bins: usize) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, num_bins)
    }

    /// Creates an equal-width histogram from pre-sorted values.
    ///
    /// A sample concentrated on a single value gets unit-width bins starting
    /// at that value.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], num_bins: usize) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        if sorted_values.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let min = sorted_values[0];
        let max = sorted_values[sorted_values.len() - 1];
        let mut width = (max - min) / num_bins as f64;
        if width <= 0.0 {
            width = 1.0;
        }

        let mut bins = (0..num_bins)
            .map(|i| {
                // Recompute edges from the origin to avoid accumulating error
                let start = min + i as f64 * width;
                let end = if i + 1 == num_bins {
                    max.max(start + width).next_up()
                } else {
                    min + (i + 1) as f64 * width
                };
                HistogramBin {
                    range: start..end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for &val in sorted_values {
            let idx = (((val - min) / width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maximum_lands_in_last_bin() {
        let histogram = Histogram::new(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(histogram.bins.len(), 4);
        assert_eq!(histogram.bins[3].count, 2);
        assert!(histogram.bins[3].range.contains(&4.0));
    }

    #[test]
    fn test_constant_sample() {
        let histogram = Histogram::new(&[2.0; 7], 5);
        assert_eq!(histogram.bins[0].count, 7);
        assert!(histogram.bins[1..].iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_empty_input() {
        assert!(Histogram::new(&[], 5).bins.is_empty());
        assert!(Histogram::new(&[1.0, 2.0], 0).bins.is_empty());
    }

    #[test]
    fn test_sturges_small_samples_clamp() {
        assert_eq!(sturges_bin_count(0), MIN_BINS);
        assert_eq!(sturges_bin_count(2), MIN_BINS);
        // log2(64) + 1 = 7
        assert_eq!(sturges_bin_count(64), 7);
    }
}
