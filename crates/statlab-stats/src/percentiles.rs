use serde::Serialize;

/// One row of a percentile table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentilePoint {
    /// Percentile rank in 0.0-100.0.
    pub percentile: f64,
    pub value: f64,
}

/// Nearest-rank percentile table of a sample.
///
/// # Examples
///
/// ```
/// use statlab_stats::percentiles::Percentiles;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let table = Percentiles::from_sorted(&sorted, &[25.0, 50.0, 75.0]);
///
/// assert_eq!(table.get(50.0), Some(6.0));
/// assert_eq!(table.get(25.0), Some(3.0));
/// assert_eq!(table.get(10.0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Percentiles(Vec<PercentilePoint>);

impl Percentiles {
    /// Builds the table for `ranks` from ascending `sorted_values`.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], ranks: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        Self(
            ranks
                .iter()
                .map(|&percentile| PercentilePoint {
                    percentile,
                    value: compute_percentile(sorted_values, percentile),
                })
                .collect(),
        )
    }

    /// Value recorded for `percentile`, if the table has that rank.
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.0
            .iter()
            .find(|point| (point.percentile - percentile).abs() < f64::EPSILON)
            .map(|point| point.value)
    }

    #[must_use]
    pub fn points(&self) -> &[PercentilePoint] {
        &self.0
    }
}

/// Order-statistic quartiles with Tukey fences.
///
/// Quartiles are picked with [`compute_percentile`], not interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    /// `q1 - 1.5 * iqr`
    pub lower_fence: f64,
    /// `q3 + 1.5 * iqr`
    pub upper_fence: f64,
}

impl Quartiles {
    const FENCE_FACTOR: f64 = 1.5;

    /// Computes quartiles of pre-sorted values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlab_stats::percentiles::Quartiles;
    /// let sorted = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    /// let q = Quartiles::from_sorted(&sorted);
    /// assert_eq!(q.q1, 3.0);
    /// assert_eq!(q.q3, 8.0);
    /// assert_eq!(q.lower_fence, -4.5);
    /// ```
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        let q1 = compute_percentile(sorted_values, 25.0);
        let q3 = compute_percentile(sorted_values, 75.0);
        let iqr = q3 - q1;
        Self {
            q1,
            q3,
            iqr,
            lower_fence: q1 - Self::FENCE_FACTOR * iqr,
            upper_fence: q3 + Self::FENCE_FACTOR * iqr,
        }
    }

    /// Whether `value` falls outside the fences.
    #[must_use]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_fence || value > self.upper_fence
    }
}

/// Computes a single percentile value from sorted data.
///
/// Nearest-rank method: the k-th percentile of n values is the value at
/// position `floor(n * k / 100)`, clamped to the last index.
///
/// Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use statlab_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&values, 50.0), 3.0);
/// assert_eq!(compute_percentile(&values, 25.0), 2.0);
/// assert_eq!(compute_percentile(&values, 100.0), 5.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let idx = ((sorted_values.len() as f64 * percentile) / 100.0) as usize;
    let idx = idx.min(sorted_values.len() - 1);
    sorted_values[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keeps_requested_ranks() {
        let table = Percentiles::from_sorted(&[1.0, 2.0, 3.0], &[50.0, 100.0]);
        assert_eq!(
            table.points(),
            &[
                PercentilePoint {
                    percentile: 50.0,
                    value: 2.0
                },
                PercentilePoint {
                    percentile: 100.0,
                    value: 3.0
                },
            ]
        );
    }

    #[test]
    #[should_panic(expected = "sorted")]
    fn test_unsorted_input_panics() {
        let _ = Percentiles::from_sorted(&[3.0, 1.0], &[50.0]);
    }

    #[test]
    fn test_quartiles_are_order_statistics() {
        // n = 11: q1 = sorted[2], q3 = sorted[8]
        let sorted = (0..11).map(f64::from).collect::<Vec<_>>();
        let q = Quartiles::from_sorted(&sorted);
        assert!((q.q1 - 2.0).abs() < f64::EPSILON);
        assert!((q.q3 - 8.0).abs() < f64::EPSILON);
        assert!((q.upper_fence - 17.0).abs() < f64::EPSILON);
        assert!(q.is_outlier(17.5));
        assert!(!q.is_outlier(17.0));
    }

    #[test]
    fn test_empty_percentile_is_nan() {
        assert!(compute_percentile(&[], 50.0).is_nan());
    }
}
