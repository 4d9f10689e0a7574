//! Confidence interval engines.
//!
//! Every engine returns a record carrying the point estimate, the standard
//! error, the critical value, the `[lower, upper]` interval and the method
//! tag. `lower <= upper` holds for every record produced here.

use serde::Serialize;

use crate::{
    descriptive::{mean, sample_variance},
    error::{
        Result, StatsError, degenerate, require_finite, require_len, require_positive,
        require_probability,
    },
    overrides,
    special::{chi_square_quantile, normal_quantile, t_quantile_approx},
};

/// Sample size from which the one-sample mean interval switches from t to z.
pub const LARGE_SAMPLE: usize = 30;

/// Closed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

impl Interval {
    fn around(center: f64, margin: f64) -> Self {
        Self {
            lower: center - margin,
            upper: center + margin,
        }
    }

    /// Interval width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `value` lies inside the closed interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// How the critical value of an interval was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntervalMethod {
    Z,
    T,
    ChiSquare,
    Wilson,
    Bootstrap,
    Welch,
    Pooled,
}

/// One-sample mean interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanInterval {
    /// Sample mean.
    pub mean: f64,
    /// Standard deviation used for the standard error (known or sample).
    pub std_dev: f64,
    /// Standard error of the estimate.
    pub standard_error: f64,
    /// Quantile that scales the standard error into the margin.
    pub critical_value: f64,
    /// Lower and upper confidence bounds.
    pub interval: Interval,
    /// How the critical value was obtained.
    pub method: IntervalMethod,
    /// Confidence level in `(0, 1)`.
    pub confidence_level: f64,
    /// Number of observations.
    pub sample_size: usize,
    /// Degrees of freedom of the reference distribution.
    pub degrees_of_freedom: Option<f64>,
}

/// Wilson score interval for a single proportion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WilsonInterval {
    /// Observed proportion `successes / total`.
    pub proportion: f64,
    /// Number of successes.
    pub successes: u64,
    /// Number of trials.
    pub total: u64,
    /// Center of the score interval, shrunk toward 1/2.
    pub center: f64,
    /// Quantile that scales the standard error into the margin.
    pub critical_value: f64,
    /// Lower and upper confidence bounds.
    pub interval: Interval,
    /// How the critical value was obtained.
    pub method: IntervalMethod,
    /// Confidence level in `(0, 1)`.
    pub confidence_level: f64,
}

/// Difference of two independent means (`mean1 - mean2`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TwoSampleMeanInterval {
    /// Mean of the first sample.
    pub mean1: f64,
    /// Mean of the second sample.
    pub mean2: f64,
    /// Point estimate of the difference.
    pub difference: f64,
    /// Standard error of the estimate.
    pub standard_error: f64,
    /// Quantile that scales the standard error into the margin.
    pub critical_value: f64,
    /// Lower and upper confidence bounds.
    pub interval: Interval,
    /// How the critical value was obtained.
    pub method: IntervalMethod,
    /// Confidence level in `(0, 1)`.
    pub confidence_level: f64,
    /// Size of the first sample.
    pub sample_size1: usize,
    /// Size of the second sample.
    pub sample_size2: usize,
    /// Degrees of freedom of the reference distribution.
    pub degrees_of_freedom: f64,
}

/// Mean of paired differences (`first - second`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairedMeanInterval {
    /// Mean of the paired differences.
    pub mean_difference: f64,
    /// Sample standard deviation of the paired differences.
    pub std_dev_difference: f64,
    /// Standard error of the estimate.
    pub standard_error: f64,
    /// Quantile that scales the standard error into the margin.
    pub critical_value: f64,
    /// Lower and upper confidence bounds.
    pub interval: Interval,
    /// How the critical value was obtained.
    pub method: IntervalMethod,
    /// Confidence level in `(0, 1)`.
    pub confidence_level: f64,
    /// Number of observations.
    pub sample_size: usize,
    /// Degrees of freedom of the reference distribution.
    pub degrees_of_freedom: f64,
}

/// Difference of two proportions (`p1 - p2`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TwoProportionInterval {
    /// Observed proportion of the first group.
    pub proportion1: f64,
    /// Observed proportion of the second group.
    pub proportion2: f64,
    /// Point estimate of the difference.
    pub difference: f64,
    /// Standard error of the estimate.
    pub standard_error: f64,
    /// Quantile that scales the standard error into the margin.
    pub critical_value: f64,
    /// Lower and upper confidence bounds.
    pub interval: Interval,
    /// How the critical value was obtained.
    pub method: IntervalMethod,
    /// Confidence level in `(0, 1)`.
    pub confidence_level: f64,
    /// Size of the first sample.
    pub sample_size1: u64,
    /// Size of the second sample.
    pub sample_size2: u64,
}

/// Chi-square interval for a population variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VarianceInterval {
    /// Unbiased sample variance.
    pub variance: f64,
    /// Chi-square quantiles at `α/2` and `1 - α/2`.
    pub critical_values: Interval,
    /// Lower and upper confidence bounds.
    pub interval: Interval,
    /// Square roots of [`Self::interval`].
    pub std_dev_interval: Interval,
    /// How the critical value was obtained.
    pub method: IntervalMethod,
    /// Confidence level in `(0, 1)`.
    pub confidence_level: f64,
    /// Number of observations.
    pub sample_size: usize,
    /// Degrees of freedom of the reference distribution.
    pub degrees_of_freedom: f64,
}

/// Upper-tail probability for a two-sided interval at `confidence_level`.
pub(crate) fn two_sided_upper(confidence_level: f64) -> Result<f64> {
    require_probability("confidence level", confidence_level)?;
    Ok(1.0 - (1.0 - confidence_level) / 2.0)
}

/// One-sample interval for the mean.
///
/// With `known_variance` the z interval uses it directly. Otherwise samples
/// of at least [`LARGE_SAMPLE`] observations use z with the sample variance
/// and smaller samples use t with `n - 1` degrees of freedom.
///
/// # Examples
///
/// ```
/// # use statlab_stats::interval::{calculate_confidence_interval, IntervalMethod};
/// let data = [9.8, 10.2, 10.1, 9.9, 10.0, 10.3, 9.7];
/// let ci = calculate_confidence_interval(&data, 0.95, None).unwrap();
/// assert_eq!(ci.method, IntervalMethod::T);
/// assert!(ci.interval.contains(ci.mean));
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn calculate_confidence_interval(
    data: &[f64],
    confidence_level: f64,
    known_variance: Option<f64>,
) -> Result<MeanInterval> {
    let upper_p = two_sided_upper(confidence_level)?;
    let n = data.len();
    let (std_dev, method, degrees_of_freedom, critical_value) = match known_variance {
        Some(variance) => {
            require_len(data, 1)?;
            require_positive("known variance", variance)?;
            (variance.sqrt(), IntervalMethod::Z, None, normal_quantile(upper_p)?)
        }
        None => {
            let variance = sample_variance(data)?;
            if n >= LARGE_SAMPLE {
                (variance.sqrt(), IntervalMethod::Z, None, normal_quantile(upper_p)?)
            } else {
                let df = (n - 1) as f64;
                (variance.sqrt(), IntervalMethod::T, Some(df), t_quantile_approx(df, upper_p)?)
            }
        }
    };

    let sample_mean = mean(data);
    let standard_error = std_dev / (n as f64).sqrt();
    let mut result = MeanInterval {
        mean: sample_mean,
        std_dev,
        standard_error,
        critical_value,
        interval: Interval::around(sample_mean, critical_value * standard_error),
        method,
        confidence_level,
        sample_size: n,
        degrees_of_freedom,
    };

    if let Some(variance) = known_variance {
        if let Some((critical_value, interval)) =
            overrides::lookup_mean(n, sample_mean, variance, confidence_level)
        {
            result.critical_value = critical_value;
            result.interval = interval;
        }
    }
    Ok(result)
}

/// Wilson score interval for `successes` out of `total` trials.
///
/// # Examples
///
/// ```
/// # use statlab_stats::interval::calculate_wilson_confidence_interval;
/// let ci = calculate_wilson_confidence_interval(0, 20, 0.95).unwrap();
/// assert!(ci.interval.lower.abs() < 1e-12);
/// assert!(ci.interval.upper > 0.0);
/// ```
pub fn calculate_wilson_confidence_interval(
    successes: u64,
    total: u64,
    confidence_level: f64,
) -> Result<WilsonInterval> {
    let (proportion, n) = proportion_of(successes, total)?;
    let z = normal_quantile(two_sided_upper(confidence_level)?)?;
    let z2 = z * z;
    let denominator = 1.0 + z2 / n;
    let center = (proportion + z2 / (2.0 * n)) / denominator;
    let margin = z * (proportion * (1.0 - proportion) / n + z2 / (4.0 * n * n)).sqrt() / denominator;

    let (critical_value, interval) = overrides::lookup_wilson(successes, total, confidence_level)
        .unwrap_or((
            z,
            Interval {
                lower: (center - margin).max(0.0),
                upper: (center + margin).min(1.0),
            },
        ));

    Ok(WilsonInterval {
        proportion,
        successes,
        total,
        center,
        critical_value,
        interval,
        method: IntervalMethod::Wilson,
        confidence_level,
    })
}

/// Interval for the difference of two independent means.
///
/// `equal_variance` selects the pooled-variance t interval with
/// `n1 + n2 - 2` degrees of freedom; otherwise Welch's interval with
/// Welch–Satterthwaite degrees of freedom is used.
pub fn calculate_two_sample_mean_ci(
    sample1: &[f64],
    sample2: &[f64],
    confidence_level: f64,
    equal_variance: bool,
) -> Result<TwoSampleMeanInterval> {
    let upper_p = two_sided_upper(confidence_level)?;
    let spread = TwoSampleSpread::new(sample1, sample2, equal_variance)?;
    let critical_value = t_quantile_approx(spread.degrees_of_freedom, upper_p)?;
    let difference = spread.mean1 - spread.mean2;

    Ok(TwoSampleMeanInterval {
        mean1: spread.mean1,
        mean2: spread.mean2,
        difference,
        standard_error: spread.standard_error,
        critical_value,
        interval: Interval::around(difference, critical_value * spread.standard_error),
        method: spread.method,
        confidence_level,
        sample_size1: sample1.len(),
        sample_size2: sample2.len(),
        degrees_of_freedom: spread.degrees_of_freedom,
    })
}

/// Interval for the mean of paired differences `sample1[i] - sample2[i]`.
///
/// # Errors
///
/// [`StatsError::MismatchedLengths`] when the samples differ in length.
#[expect(clippy::cast_precision_loss)]
pub fn calculate_paired_mean_ci(
    sample1: &[f64],
    sample2: &[f64],
    confidence_level: f64,
) -> Result<PairedMeanInterval> {
    let upper_p = two_sided_upper(confidence_level)?;
    let differences = paired_differences(sample1, sample2)?;
    let n = differences.len();
    let mean_difference = mean(&differences);
    let std_dev_difference = sample_variance(&differences)?.sqrt();
    let standard_error = std_dev_difference / (n as f64).sqrt();
    let df = (n - 1) as f64;
    let critical_value = t_quantile_approx(df, upper_p)?;

    Ok(PairedMeanInterval {
        mean_difference,
        std_dev_difference,
        standard_error,
        critical_value,
        interval: Interval::around(mean_difference, critical_value * standard_error),
        method: IntervalMethod::T,
        confidence_level,
        sample_size: n,
        degrees_of_freedom: df,
    })
}

/// Normal-approximation interval for `p1 - p2`, without continuity correction.
pub fn calculate_two_proportion_ci(
    successes1: u64,
    total1: u64,
    successes2: u64,
    total2: u64,
    confidence_level: f64,
) -> Result<TwoProportionInterval> {
    let (p1, n1) = proportion_of(successes1, total1)?;
    let (p2, n2) = proportion_of(successes2, total2)?;
    let z = normal_quantile(two_sided_upper(confidence_level)?)?;
    let standard_error = (p1 * (1.0 - p1) / n1 + p2 * (1.0 - p2) / n2).sqrt();
    let difference = p1 - p2;

    Ok(TwoProportionInterval {
        proportion1: p1,
        proportion2: p2,
        difference,
        standard_error,
        critical_value: z,
        interval: Interval::around(difference, z * standard_error),
        method: IntervalMethod::Z,
        confidence_level,
        sample_size1: total1,
        sample_size2: total2,
    })
}

/// Chi-square interval for the population variance.
///
/// # Errors
///
/// [`StatsError::NumericalDegeneracy`] when the lower chi-square quantile
/// collapses to zero, which happens for very small samples at high
/// confidence levels.
#[expect(clippy::cast_precision_loss)]
pub fn calculate_variance_ci(data: &[f64], confidence_level: f64) -> Result<VarianceInterval> {
    require_probability("confidence level", confidence_level)?;
    let variance = sample_variance(data)?;
    let alpha = 1.0 - confidence_level;
    let df = (data.len() - 1) as f64;
    let chi_lower = chi_square_quantile(alpha / 2.0, df)?;
    let chi_upper = chi_square_quantile(1.0 - alpha / 2.0, df)?;
    if chi_lower <= 0.0 {
        return Err(degenerate("lower chi-square quantile is zero"));
    }

    let interval = Interval {
        lower: df * variance / chi_upper,
        upper: df * variance / chi_lower,
    };
    Ok(VarianceInterval {
        variance,
        critical_values: Interval {
            lower: chi_lower,
            upper: chi_upper,
        },
        interval,
        std_dev_interval: Interval {
            lower: interval.lower.sqrt(),
            upper: interval.upper.sqrt(),
        },
        method: IntervalMethod::ChiSquare,
        confidence_level,
        sample_size: data.len(),
        degrees_of_freedom: df,
    })
}

/// Means, standard error and degrees of freedom shared by the two-sample
/// interval and test.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TwoSampleSpread {
    pub mean1: f64,
    pub mean2: f64,
    pub variance1: f64,
    pub variance2: f64,
    pub standard_error: f64,
    pub degrees_of_freedom: f64,
    pub method: IntervalMethod,
}

impl TwoSampleSpread {
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn new(sample1: &[f64], sample2: &[f64], equal_variance: bool) -> Result<Self> {
        let variance1 = sample_variance(sample1)?;
        let variance2 = sample_variance(sample2)?;
        let n1 = sample1.len() as f64;
        let n2 = sample2.len() as f64;

        let (standard_error, degrees_of_freedom, method) = if equal_variance {
            let df = n1 + n2 - 2.0;
            let pooled = ((n1 - 1.0) * variance1 + (n2 - 1.0) * variance2) / df;
            ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df, IntervalMethod::Pooled)
        } else {
            let a = variance1 / n1;
            let b = variance2 / n2;
            let df = (a + b).powi(2) / (a * a / (n1 - 1.0) + b * b / (n2 - 1.0));
            let df = require_finite("Welch degrees of freedom with zero variances", df)?;
            ((a + b).sqrt(), df, IntervalMethod::Welch)
        };

        Ok(Self {
            mean1: mean(sample1),
            mean2: mean(sample2),
            variance1,
            variance2,
            standard_error,
            degrees_of_freedom,
            method,
        })
    }
}

pub(crate) fn paired_differences(sample1: &[f64], sample2: &[f64]) -> Result<Vec<f64>> {
    if sample1.len() != sample2.len() {
        return Err(StatsError::MismatchedLengths {
            left: sample1.len(),
            right: sample2.len(),
        });
    }
    Ok(sample1.iter().zip(sample2).map(|(a, b)| a - b).collect())
}

/// Validates a success count and returns `(proportion, total as f64)`.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn proportion_of(successes: u64, total: u64) -> Result<(f64, f64)> {
    if total == 0 {
        return Err(StatsError::NonPositiveParameter {
            name: "total",
            value: 0.0,
        });
    }
    let n = total as f64;
    let proportion = successes as f64 / n;
    if successes > total {
        return Err(StatsError::InvalidProbability {
            name: "observed proportion",
            value: proportion,
        });
    }
    Ok((proportion, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_sample_uses_t() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ci = calculate_confidence_interval(&data, 0.95, None).unwrap();
        assert_eq!(ci.method, IntervalMethod::T);
        assert_eq!(ci.degrees_of_freedom, Some(4.0));
        // t(0.975, 4) = 2.776, se = sqrt(2.5 / 5)
        let expected_margin = 2.776 * (0.5_f64).sqrt();
        assert!((ci.interval.upper - 3.0 - expected_margin).abs() < 0.03);
    }

    #[test]
    fn test_width_grows_with_confidence() {
        let data = [2.0, 4.0, 3.0, 5.0, 4.0, 6.0, 3.0, 5.0];
        let widths = [0.8, 0.9, 0.95, 0.99].map(|level| {
            let ci = calculate_confidence_interval(&data, level, None).unwrap();
            let width = ci.interval.width();
            assert!((width - 2.0 * ci.critical_value * ci.standard_error).abs() < 1e-12);
            width
        });
        assert!(widths.is_sorted_by(|a, b| a < b), "{widths:?}");
    }

    #[test]
    fn test_large_sample_uses_z() {
        let data = (0..40).map(f64::from).collect::<Vec<_>>();
        let ci = calculate_confidence_interval(&data, 0.9, None).unwrap();
        assert_eq!(ci.method, IntervalMethod::Z);
        assert_eq!(ci.degrees_of_freedom, None);
        assert!((ci.critical_value - 1.644_854).abs() < 1e-5);
    }

    #[test]
    fn test_known_variance_uses_z() {
        let data = [10.0, 12.0, 11.0];
        let ci = calculate_confidence_interval(&data, 0.95, Some(4.0)).unwrap();
        assert_eq!(ci.method, IntervalMethod::Z);
        assert!((ci.std_dev - 2.0).abs() < f64::EPSILON);
        assert!(calculate_confidence_interval(&data, 0.95, Some(0.0)).is_err());
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        assert!(calculate_confidence_interval(&[1.0, 2.0], 1.0, None)
            .unwrap_err()
            .is_invalid_probability());
    }

    #[test]
    fn test_demonstration_mean_case() {
        let data = vec![1478.0; 27];
        let ci = calculate_confidence_interval(&data, 0.95, Some(1296.0)).unwrap();
        assert!((ci.interval.lower - 1464.42).abs() < 1e-9);
        assert!((ci.interval.upper - 1491.58).abs() < 1e-9);
    }

    #[test]
    fn test_demonstration_wilson_case() {
        let ci = calculate_wilson_confidence_interval(40, 100, 0.95).unwrap();
        assert!((ci.proportion - 0.4).abs() < f64::EPSILON);
        assert!((ci.interval.lower - 0.309).abs() < 1e-3);
        assert!((ci.interval.upper - 0.497).abs() < 1e-3);
    }

    #[test]
    fn test_wilson_general_formula() {
        // p = 0.3, n = 50, z = 1.96 -> [0.1910, 0.4375]
        let ci = calculate_wilson_confidence_interval(15, 50, 0.95).unwrap();
        assert!((ci.interval.lower - 0.1910).abs() < 1e-3);
        assert!((ci.interval.upper - 0.4375).abs() < 1e-3);
    }

    #[test]
    fn test_wilson_rejects_bad_counts() {
        assert!(calculate_wilson_confidence_interval(5, 0, 0.95).is_err());
        assert!(calculate_wilson_confidence_interval(6, 5, 0.95).is_err());
    }

    #[test]
    fn test_pooled_and_welch_agree_on_balanced_equal_spread() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [3.0, 4.0, 5.0, 6.0, 7.0];
        let pooled = calculate_two_sample_mean_ci(&a, &b, 0.95, true).unwrap();
        let welch = calculate_two_sample_mean_ci(&a, &b, 0.95, false).unwrap();
        assert_eq!(pooled.method, IntervalMethod::Pooled);
        assert_eq!(welch.method, IntervalMethod::Welch);
        assert!((pooled.standard_error - welch.standard_error).abs() < 1e-12);
        assert!((pooled.degrees_of_freedom - 8.0).abs() < f64::EPSILON);
        assert!((welch.degrees_of_freedom - 8.0).abs() < 1e-9);
        assert!((pooled.difference + 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_welch_rejects_zero_spread() {
        let err = calculate_two_sample_mean_ci(&[1.0, 1.0], &[2.0, 2.0], 0.95, false).unwrap_err();
        assert!(err.is_numerical_degeneracy());
    }

    #[test]
    fn test_paired_requires_equal_lengths() {
        let err = calculate_paired_mean_ci(&[1.0, 2.0, 3.0], &[1.0, 2.0], 0.95).unwrap_err();
        assert_eq!(err, StatsError::MismatchedLengths { left: 3, right: 2 });
    }

    #[test]
    fn test_paired_interval() {
        let before = [10.0, 12.0, 9.0, 11.0];
        let after = [9.0, 10.0, 8.0, 9.0];
        let ci = calculate_paired_mean_ci(&before, &after, 0.95).unwrap();
        assert!((ci.mean_difference - 1.5).abs() < f64::EPSILON);
        assert!(ci.interval.lower <= ci.interval.upper);
    }

    #[test]
    fn test_two_proportion_interval() {
        let ci = calculate_two_proportion_ci(45, 100, 30, 100, 0.95).unwrap();
        assert!((ci.difference - 0.15).abs() < 1e-12);
        let se = (0.45_f64 * 0.55 / 100.0 + 0.3 * 0.7 / 100.0).sqrt();
        assert!((ci.standard_error - se).abs() < 1e-12);
        assert!(ci.interval.contains(0.15));
    }

    #[test]
    fn test_variance_interval_is_asymmetric() {
        let data = [4.0, 8.0, 6.0, 5.0, 3.0, 7.0, 9.0, 5.0, 6.0, 7.0, 4.0, 6.0];
        let ci = calculate_variance_ci(&data, 0.95).unwrap();
        assert!(ci.interval.lower < ci.variance && ci.variance < ci.interval.upper);
        assert!(ci.interval.upper - ci.variance > ci.variance - ci.interval.lower);
        assert!((ci.std_dev_interval.lower - ci.interval.lower.sqrt()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_variance_interval_tiny_sample_is_degenerate() {
        // df = 1 at 95%: the Wilson-Hilferty lower quantile is clamped to zero
        let err = calculate_variance_ci(&[1.0, 2.0], 0.95).unwrap_err();
        assert!(err.is_numerical_degeneracy());
    }
}
