use serde::Serialize;

use crate::{
    descriptive::{BasicStats, mad, sorted_copy},
    error::Result,
    histogram::{Histogram, sturges_bin_count},
    percentiles::{Percentiles, Quartiles},
};

/// Percentile points reported by [`SampleSummary::new`].
pub const SUMMARY_PERCENTILES: [f64; 7] = [5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 95.0];

/// Overview of a sample combining several measures.
///
/// - Descriptive statistics (moments, median, mode)
/// - Order-statistic quartiles with outlier fences
/// - A fixed set of percentiles and the median absolute deviation
/// - An equal-width histogram with a Sturges bin count
///
/// # Examples
///
/// ```
/// use statlab_stats::summary::SampleSummary;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let summary = SampleSummary::new(&values).unwrap();
///
/// assert_eq!(summary.stats.mean, 5.5);
/// assert_eq!(summary.percentiles.get(50.0), Some(6.0));
/// assert_eq!(summary.histogram.bins.len(), 5);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SampleSummary {
    pub stats: BasicStats,
    pub quartiles: Quartiles,
    pub percentiles: Percentiles,
    pub mad: f64,
    pub histogram: Histogram,
}

impl SampleSummary {
    /// Summarizes unsorted values; needs at least two of them.
    pub fn new(data: &[f64]) -> Result<Self> {
        let stats = BasicStats::new(data)?;
        let sorted = sorted_copy(data);
        Ok(Self {
            stats,
            quartiles: Quartiles::from_sorted(&sorted),
            percentiles: Percentiles::from_sorted(&sorted, &SUMMARY_PERCENTILES),
            mad: mad(data)?,
            histogram: Histogram::from_sorted(&sorted, sturges_bin_count(sorted.len())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_every_value() {
        let data = (0..100).map(|i| f64::from(i * 7 % 31)).collect::<Vec<_>>();
        let summary = SampleSummary::new(&data).unwrap();
        let total = summary.histogram.bins.iter().map(|b| b.count).sum::<u64>();
        assert_eq!(total, 100);
        assert_eq!(summary.histogram.bins.len(), sturges_bin_count(100));
    }

    #[test]
    fn test_quartiles_bracket_the_median() {
        let data = [9.0, 3.0, 7.0, 1.0, 5.0, 8.0, 2.0, 6.0, 4.0];
        let summary = SampleSummary::new(&data).unwrap();
        assert!(summary.quartiles.q1 <= summary.stats.median);
        assert!(summary.stats.median <= summary.quartiles.q3);
        assert!(summary.mad > 0.0);
    }

    #[test]
    fn test_single_value_is_rejected() {
        assert!(SampleSummary::new(&[1.0]).is_err());
    }
}
