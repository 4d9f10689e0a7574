use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Result, require_len};

/// Descriptive statistics summarizing a sample.
///
/// Dispersion and higher moments are normalized by `n - 1`. Skewness and
/// kurtosis divide the `n - 1` normalized central moments by powers of the
/// sample standard deviation, which mixes bias conventions; the values match
/// what the dashboard has always shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicStats {
    /// Number of observations.
    pub count: usize,
    /// The minimum value in the sample.
    pub min: f64,
    /// The maximum value in the sample.
    pub max: f64,
    /// The arithmetic mean.
    pub mean: f64,
    /// The median (average of the two middle values for even `n`).
    pub median: f64,
    /// The most frequent value, or the minimum when every value is unique.
    pub mode: f64,
    /// Unbiased sample variance.
    pub variance: f64,
    /// Square root of [`Self::variance`].
    pub std_dev: f64,
    /// Third standardized moment; `None` for a constant sample.
    pub skewness: Option<f64>,
    /// Excess kurtosis; `None` for a constant sample.
    pub kurtosis: Option<f64>,
}

impl BasicStats {
    /// Computes descriptive statistics of `data`.
    ///
    /// The input is never reordered; a sorted copy is taken for the median.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InsufficientSamples`](crate::StatsError::InsufficientSamples)
    /// when `data` has fewer than two values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlab_stats::descriptive::BasicStats;
    /// let stats = BasicStats::new(&[5.0, 2.0, 4.0, 1.0, 3.0, 3.0]).unwrap();
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.mode, 3.0);
    /// assert_eq!(stats.min, 1.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn new(data: &[f64]) -> Result<Self> {
        require_len(data, 2)?;

        let sorted = sorted_copy(data);
        let n = data.len() as f64;
        let mean = mean(data);
        let (m2, m3, m4) = data.iter().fold((0.0, 0.0, 0.0), |(m2, m3, m4), &x| {
            let d = x - mean;
            let d2 = d * d;
            (m2 + d2, m3 + d2 * d, m4 + d2 * d2)
        });
        let variance = m2 / (n - 1.0);
        let std_dev = variance.sqrt();
        let (skewness, kurtosis) = if std_dev > 0.0 {
            (
                Some(m3 / (n - 1.0) / std_dev.powi(3)),
                Some(m4 / (n - 1.0) / std_dev.powi(4) - 3.0),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            count: data.len(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean,
            median: median_of_sorted(&sorted),
            mode: mode(data),
            variance,
            std_dev,
            skewness,
            kurtosis,
        })
    }
}

/// Arithmetic mean. Returns `NaN` for an empty slice; callers validate length first.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Unbiased (`n - 1`) sample variance.
#[expect(clippy::cast_precision_loss)]
pub fn sample_variance(data: &[f64]) -> Result<f64> {
    require_len(data, 2)?;
    let m = mean(data);
    let ss = data.iter().map(|x| (x - m).powi(2)).sum::<f64>();
    Ok(ss / (data.len() - 1) as f64)
}

/// Copies and sorts `data` in ascending order.
#[must_use]
pub fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Median of pre-sorted values.
///
/// # Panics
///
/// Panics if `sorted_values` is empty or not sorted in ascending order.
#[must_use]
pub fn median_of_sorted(sorted_values: &[f64]) -> f64 {
    assert!(!sorted_values.is_empty(), "median of an empty sample");
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    let mid = sorted_values.len() / 2;
    if sorted_values.len() % 2 == 0 {
        (sorted_values[mid - 1] + sorted_values[mid]) / 2.0
    } else {
        sorted_values[mid]
    }
}

/// Median absolute deviation from the median (unscaled).
///
/// # Examples
///
/// ```
/// # use statlab_stats::descriptive::mad;
/// // median 3, deviations [2, 1, 0, 1, 97] -> MAD 1
/// assert_eq!(mad(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap(), 1.0);
/// ```
pub fn mad(data: &[f64]) -> Result<f64> {
    require_len(data, 1)?;
    let median = median_of_sorted(&sorted_copy(data));
    let deviations = data.iter().map(|x| (x - median).abs()).collect::<Vec<_>>();
    Ok(median_of_sorted(&sorted_copy(&deviations)))
}

/// Most frequent value.
///
/// Ties go to the value encountered first in `data`. When no value repeats
/// the minimum is returned.
fn mode(data: &[f64]) -> f64 {
    // -0.0 and 0.0 count as the same value
    let key = |x: f64| if x == 0.0 { 0.0_f64.to_bits() } else { x.to_bits() };

    let mut order = Vec::<(f64, usize)>::new();
    let mut index = HashMap::<u64, usize>::new();
    for &x in data {
        let slot = *index.entry(key(x)).or_insert_with(|| {
            order.push((x, 0));
            order.len() - 1
        });
        order[slot].1 += 1;
    }

    let mut best = order[0];
    for &(value, count) in &order[1..] {
        if count > best.1 {
            best = (value, count);
        }
    }
    if best.1 > 1 {
        best.0
    } else {
        data.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StatsError;

    #[test]
    fn test_mean_and_median_odd_even() {
        let odd = BasicStats::new(&[3.0, 1.0, 2.0]).unwrap();
        assert!((odd.mean - 2.0).abs() < f64::EPSILON);
        assert!((odd.median - 2.0).abs() < f64::EPSILON);

        let even = BasicStats::new(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert!((even.median - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_variance_is_unbiased() {
        let stats = BasicStats::new(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        // sum of squared deviations = 32, n - 1 = 7
        assert!((stats.variance - 32.0 / 7.0).abs() < 1e-12);
        assert!((stats.std_dev - stats.variance.sqrt()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mode_first_encountered_wins_ties() {
        let stats = BasicStats::new(&[7.0, 2.0, 2.0, 7.0, 1.0]).unwrap();
        assert!((stats.mode - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mode_defaults_to_minimum() {
        let stats = BasicStats::new(&[4.0, -1.0, 9.0]).unwrap();
        assert!((stats.mode + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_symmetric_sample_has_zero_skewness() {
        let stats = BasicStats::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(stats.skewness.unwrap().abs() < 1e-12);
        // m4 / (n-1) = 34 / 4 = 8.5, s^4 = 6.25
        assert!((stats.kurtosis.unwrap() - (8.5 / 6.25 - 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_constant_sample_has_no_shape() {
        let stats = BasicStats::new(&[3.0; 6]).unwrap();
        assert!(stats.variance.abs() < f64::EPSILON);
        assert_eq!(stats.skewness, None);
        assert_eq!(stats.kurtosis, None);
    }

    #[test]
    fn test_single_value_is_rejected() {
        assert_eq!(
            BasicStats::new(&[1.0]),
            Err(StatsError::InsufficientSamples {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_input_is_not_reordered() {
        let data = [3.0, 1.0, 2.0];
        let _ = BasicStats::new(&data).unwrap();
        assert_eq!(data, [3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_mad_even_length() {
        // median 2.5, deviations [1.5, 0.5, 0.5, 1.5] -> 1.0
        assert!((mad(&[1.0, 2.0, 3.0, 4.0]).unwrap() - 1.0).abs() < f64::EPSILON);
    }
}
