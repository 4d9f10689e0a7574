use rand::Rng;
use serde::Serialize;

use crate::{
    descriptive::{BasicStats, mean, sample_variance},
    error::{Result, StatsError, require_probability},
    interval::{Interval, IntervalMethod, LARGE_SAMPLE},
};

/// Number of resamples used when the caller has no preference.
pub const DEFAULT_RESAMPLES: usize = 1000;

/// Absolute skewness above which the percentile interval is flagged.
const SKEWNESS_WARNING: f64 = 1.0;

/// Percentile bootstrap interval for the mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapInterval {
    pub mean: f64,
    /// Standard deviation of the bootstrap means.
    pub standard_error: f64,
    pub interval: Interval,
    pub method: IntervalMethod,
    pub confidence_level: f64,
    pub sample_size: usize,
    pub resamples: usize,
    /// Skewness of the original sample (0 for a constant sample).
    pub skewness: f64,
    pub warnings: Vec<BootstrapWarning>,
}

/// Conditions under which the percentile bootstrap is known to be unreliable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::Display)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BootstrapWarning {
    #[display("sample size {sample_size} is below 30; the interval may be too narrow")]
    SmallSample { sample_size: usize },
    #[display("sample skewness {skewness:.3} exceeds 1 in magnitude; percentile limits may be biased")]
    StrongSkewness { skewness: f64 },
}

/// Percentile bootstrap confidence interval for the mean.
///
/// Draws `resamples` samples with replacement from `data` using `rng`,
/// records each resample mean, and reports the empirical `α/2` and `1 - α/2`
/// percentiles of the sorted means. Pass a seeded generator for reproducible
/// output.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng as _, rngs::StdRng};
/// use statlab_stats::bootstrap::{calculate_bootstrap_confidence_interval, DEFAULT_RESAMPLES};
///
/// let data = [2.1, 2.5, 1.9, 2.8, 2.2, 2.4, 2.0, 2.6];
/// let mut rng = StdRng::seed_from_u64(7);
/// let ci = calculate_bootstrap_confidence_interval(&data, 0.95, DEFAULT_RESAMPLES, &mut rng).unwrap();
/// assert!(ci.interval.lower <= ci.mean && ci.mean <= ci.interval.upper);
/// assert!(!ci.warnings.is_empty()); // n < 30
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
pub fn calculate_bootstrap_confidence_interval<R>(
    data: &[f64],
    confidence_level: f64,
    resamples: usize,
    rng: &mut R,
) -> Result<BootstrapInterval>
where
    R: Rng + ?Sized,
{
    require_probability("confidence level", confidence_level)?;
    if resamples == 0 {
        return Err(StatsError::NonPositiveParameter {
            name: "resamples",
            value: 0.0,
        });
    }
    let stats = BasicStats::new(data)?;
    let n = data.len();

    let mut means = (0..resamples)
        .map(|_| {
            let sum = (0..n).map(|_| data[rng.random_range(0..n)]).sum::<f64>();
            sum / n as f64
        })
        .collect::<Vec<_>>();
    means.sort_by(f64::total_cmp);

    let alpha = 1.0 - confidence_level;
    let b = resamples as f64;
    let lower_idx = ((b * alpha / 2.0).floor() as usize).min(resamples - 1);
    let upper_idx = ((b * (1.0 - alpha / 2.0)).floor() as usize).min(resamples - 1);

    let standard_error = if resamples > 1 {
        sample_variance(&means)?.sqrt()
    } else {
        0.0
    };

    let skewness = stats.skewness.unwrap_or(0.0);
    let mut warnings = vec![];
    if n < LARGE_SAMPLE {
        warnings.push(BootstrapWarning::SmallSample { sample_size: n });
    }
    if skewness.abs() > SKEWNESS_WARNING {
        warnings.push(BootstrapWarning::StrongSkewness { skewness });
    }

    Ok(BootstrapInterval {
        mean: mean(data),
        standard_error,
        interval: Interval {
            lower: means[lower_idx],
            upper: means[upper_idx],
        },
        method: IntervalMethod::Bootstrap,
        confidence_level,
        sample_size: n,
        resamples,
        skewness,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng as _, rngs::StdRng};

    use super::*;

    fn large_sample() -> Vec<f64> {
        (0..60).map(|i| f64::from(i % 12) + 0.5 * f64::from(i % 5)).collect()
    }

    #[test]
    fn test_same_seed_same_interval() {
        let data = large_sample();
        let a = calculate_bootstrap_confidence_interval(&data, 0.9, 500, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let b = calculate_bootstrap_confidence_interval(&data, 0.9, 500, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_interval_brackets_the_mean() {
        let data = large_sample();
        let mut rng = StdRng::seed_from_u64(42);
        let ci = calculate_bootstrap_confidence_interval(&data, 0.95, DEFAULT_RESAMPLES, &mut rng)
            .unwrap();
        assert!(ci.interval.lower <= ci.interval.upper);
        assert!(ci.interval.contains(ci.mean));
        assert!(ci.warnings.is_empty());
        assert_eq!(ci.method, IntervalMethod::Bootstrap);
    }

    #[test]
    fn test_constant_sample_collapses() {
        let mut rng = StdRng::seed_from_u64(3);
        let ci = calculate_bootstrap_confidence_interval(&[5.0; 40], 0.95, 200, &mut rng).unwrap();
        assert!((ci.interval.lower - 5.0).abs() < 1e-12);
        assert!((ci.interval.upper - 5.0).abs() < 1e-12);
        assert!(ci.skewness.abs() < f64::EPSILON);
    }

    #[test]
    fn test_skewed_sample_is_flagged() {
        let mut data = vec![1.0; 40];
        data.extend([50.0, 60.0, 80.0]);
        let mut rng = StdRng::seed_from_u64(9);
        let ci = calculate_bootstrap_confidence_interval(&data, 0.95, 300, &mut rng).unwrap();
        assert!(
            ci.warnings
                .iter()
                .any(|w| matches!(w, BootstrapWarning::StrongSkewness { .. }))
        );
    }

    #[test]
    fn test_zero_resamples_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(calculate_bootstrap_confidence_interval(&[1.0, 2.0], 0.95, 0, &mut rng).is_err());
    }
}
