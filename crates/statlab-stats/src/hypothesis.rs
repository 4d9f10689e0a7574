//! Hypothesis tests.
//!
//! Every test reports its statistic, degrees of freedom and p-value, and sets
//! `reject_null` to exactly `p_value < alpha`. p-values come from a
//! [`TailProbability`] strategy: the plain functions use [`ClosedFormTail`],
//! the `*_with` variants accept any strategy.
//!
//! # Examples
//!
//! ```
//! use statlab_stats::hypothesis::{Alternative, perform_one_sample_t_test};
//!
//! let data = [5.1, 4.9, 5.6, 5.8, 6.0, 5.4, 5.7, 5.5];
//! let test = perform_one_sample_t_test(&data, 5.0, 0.05, Alternative::Greater).unwrap();
//! assert!(test.statistic > 0.0);
//! assert_eq!(test.reject_null, test.p_value < 0.05);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    descriptive::{mean, sample_variance},
    error::{Result, degenerate, require_probability},
    interval::{IntervalMethod, TwoSampleSpread, paired_differences, proportion_of},
    tail::{ClosedFormTail, TailProbability},
};

/// Direction of the alternative hypothesis.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    /// The parameter is below the hypothesized value.
    Less,
    /// The parameter is above the hypothesized value.
    Greater,
    #[default]
    TwoSided,
}

impl Alternative {
    fn p_value(self, upper_tail: impl Fn(f64) -> f64, statistic: f64) -> f64 {
        let p = match self {
            Self::Greater => upper_tail(statistic),
            Self::Less => 1.0 - upper_tail(statistic),
            Self::TwoSided => 2.0 * upper_tail(statistic.abs()),
        };
        p.clamp(0.0, 1.0)
    }
}

/// One-sample t-test against a hypothesized mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OneSampleTTest {
    /// Test statistic.
    pub statistic: f64,
    /// Degrees of freedom of the reference distribution.
    pub degrees_of_freedom: f64,
    /// p-value in `[0, 1]` from the tail strategy.
    pub p_value: f64,
    /// Exactly `p_value < alpha`.
    pub reject_null: bool,
    /// Significance level.
    pub alpha: f64,
    /// Direction of the alternative hypothesis.
    pub alternative: Alternative,
    /// Sample mean.
    pub sample_mean: f64,
    /// Sample standard deviation.
    pub sample_std_dev: f64,
    /// Standard error in the denominator of the statistic.
    pub standard_error: f64,
    /// Mean under the null hypothesis.
    pub hypothesized_mean: f64,
    /// Number of observations.
    pub sample_size: usize,
}

/// Two independent samples, pooled or Welch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TwoSampleTTest {
    /// Test statistic.
    pub statistic: f64,
    /// Degrees of freedom of the reference distribution.
    pub degrees_of_freedom: f64,
    /// p-value in `[0, 1]` from the tail strategy.
    pub p_value: f64,
    /// Exactly `p_value < alpha`.
    pub reject_null: bool,
    /// Significance level.
    pub alpha: f64,
    /// Direction of the alternative hypothesis.
    pub alternative: Alternative,
    /// How the critical value was obtained.
    pub method: IntervalMethod,
    /// Mean of the first sample.
    pub mean1: f64,
    /// Mean of the second sample.
    pub mean2: f64,
    /// Sample variance of the first sample.
    pub variance1: f64,
    /// Sample variance of the second sample.
    pub variance2: f64,
    /// Standard error in the denominator of the statistic.
    pub standard_error: f64,
    /// Size of the first sample.
    pub sample_size1: usize,
    /// Size of the second sample.
    pub sample_size2: usize,
}

/// Paired t-test on `sample1[i] - sample2[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairedTTest {
    /// Test statistic.
    pub statistic: f64,
    /// Degrees of freedom of the reference distribution.
    pub degrees_of_freedom: f64,
    /// p-value in `[0, 1]` from the tail strategy.
    pub p_value: f64,
    /// Exactly `p_value < alpha`.
    pub reject_null: bool,
    /// Significance level.
    pub alpha: f64,
    /// Direction of the alternative hypothesis.
    pub alternative: Alternative,
    /// Mean of the paired differences.
    pub mean_difference: f64,
    /// Sample standard deviation of the paired differences.
    pub std_dev_difference: f64,
    /// Standard error in the denominator of the statistic.
    pub standard_error: f64,
    /// Number of pairs.
    pub sample_size: usize,
}

/// Pooled two-proportion z-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TwoProportionTest {
    /// Test statistic.
    pub statistic: f64,
    /// p-value in `[0, 1]` from the tail strategy.
    pub p_value: f64,
    /// Exactly `p_value < alpha`.
    pub reject_null: bool,
    /// Significance level.
    pub alpha: f64,
    /// Direction of the alternative hypothesis.
    pub alternative: Alternative,
    /// Observed proportion of the first group.
    pub proportion1: f64,
    /// Observed proportion of the second group.
    pub proportion2: f64,
    /// Proportion of both groups combined.
    pub pooled_proportion: f64,
    /// Standard error in the denominator of the statistic.
    pub standard_error: f64,
}

/// Variance-ratio F-test; always two-sided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VarianceFTest {
    /// Larger sample variance over the smaller one.
    pub statistic: f64,
    /// Degrees of freedom of the numerator (larger variance).
    pub df1: f64,
    /// Degrees of freedom of the denominator.
    pub df2: f64,
    /// p-value in `[0, 1]` from the tail strategy.
    pub p_value: f64,
    /// Exactly `p_value < alpha`.
    pub reject_null: bool,
    /// Significance level.
    pub alpha: f64,
    /// Sample variance of the first sample.
    pub variance1: f64,
    /// Sample variance of the second sample.
    pub variance2: f64,
}

/// One-sample proportion z-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProportionTest {
    /// Test statistic.
    pub statistic: f64,
    /// p-value in `[0, 1]` from the tail strategy.
    pub p_value: f64,
    /// Exactly `p_value < alpha`.
    pub reject_null: bool,
    /// Significance level.
    pub alpha: f64,
    /// Direction of the alternative hypothesis.
    pub alternative: Alternative,
    /// Observed proportion.
    pub sample_proportion: f64,
    /// Proportion under the null hypothesis.
    pub hypothesized_proportion: f64,
    /// Standard error in the denominator of the statistic.
    pub standard_error: f64,
    /// Number of trials.
    pub sample_size: u64,
}

/// One-sample t-test with the default tail strategy.
pub fn perform_one_sample_t_test(
    data: &[f64],
    hypothesized_mean: f64,
    alpha: f64,
    alternative: Alternative,
) -> Result<OneSampleTTest> {
    perform_one_sample_t_test_with(data, hypothesized_mean, alpha, alternative, &ClosedFormTail)
}

/// One-sample t-test with an explicit tail strategy.
#[expect(clippy::cast_precision_loss)]
pub fn perform_one_sample_t_test_with<T>(
    data: &[f64],
    hypothesized_mean: f64,
    alpha: f64,
    alternative: Alternative,
    tail: &T,
) -> Result<OneSampleTTest>
where
    T: TailProbability + ?Sized,
{
    require_probability("alpha", alpha)?;
    let sample_std_dev = sample_variance(data)?.sqrt();
    let n = data.len();
    let standard_error = sample_std_dev / (n as f64).sqrt();
    if standard_error <= 0.0 {
        return Err(degenerate("sample has zero variance"));
    }
    let sample_mean = mean(data);
    let statistic = (sample_mean - hypothesized_mean) / standard_error;
    let df = (n - 1) as f64;
    let p_value = alternative.p_value(|t| tail.t_upper_tail(t, df), statistic);

    Ok(OneSampleTTest {
        statistic,
        degrees_of_freedom: df,
        p_value,
        reject_null: p_value < alpha,
        alpha,
        alternative,
        sample_mean,
        sample_std_dev,
        standard_error,
        hypothesized_mean,
        sample_size: n,
    })
}

/// Two-sample t-test with the default tail strategy.
pub fn perform_two_sample_t_test(
    sample1: &[f64],
    sample2: &[f64],
    alpha: f64,
    alternative: Alternative,
    equal_variance: bool,
) -> Result<TwoSampleTTest> {
    perform_two_sample_t_test_with(
        sample1,
        sample2,
        alpha,
        alternative,
        equal_variance,
        &ClosedFormTail,
    )
}

/// Two-sample t-test with an explicit tail strategy.
///
/// `equal_variance` selects the pooled statistic; otherwise Welch's
/// statistic with Welch–Satterthwaite degrees of freedom.
pub fn perform_two_sample_t_test_with<T>(
    sample1: &[f64],
    sample2: &[f64],
    alpha: f64,
    alternative: Alternative,
    equal_variance: bool,
    tail: &T,
) -> Result<TwoSampleTTest>
where
    T: TailProbability + ?Sized,
{
    require_probability("alpha", alpha)?;
    let spread = TwoSampleSpread::new(sample1, sample2, equal_variance)?;
    if spread.standard_error <= 0.0 {
        return Err(degenerate("both samples have zero variance"));
    }
    let statistic = (spread.mean1 - spread.mean2) / spread.standard_error;
    let df = spread.degrees_of_freedom;
    let p_value = alternative.p_value(|t| tail.t_upper_tail(t, df), statistic);

    Ok(TwoSampleTTest {
        statistic,
        degrees_of_freedom: df,
        p_value,
        reject_null: p_value < alpha,
        alpha,
        alternative,
        method: spread.method,
        mean1: spread.mean1,
        mean2: spread.mean2,
        variance1: spread.variance1,
        variance2: spread.variance2,
        standard_error: spread.standard_error,
        sample_size1: sample1.len(),
        sample_size2: sample2.len(),
    })
}

/// Paired t-test with the default tail strategy.
pub fn perform_paired_t_test(
    sample1: &[f64],
    sample2: &[f64],
    alpha: f64,
    alternative: Alternative,
) -> Result<PairedTTest> {
    perform_paired_t_test_with(sample1, sample2, alpha, alternative, &ClosedFormTail)
}

/// Paired t-test with an explicit tail strategy.
///
/// # Errors
///
/// [`StatsError::MismatchedLengths`](crate::StatsError::MismatchedLengths)
/// when the samples differ in length.
pub fn perform_paired_t_test_with<T>(
    sample1: &[f64],
    sample2: &[f64],
    alpha: f64,
    alternative: Alternative,
    tail: &T,
) -> Result<PairedTTest>
where
    T: TailProbability + ?Sized,
{
    require_probability("alpha", alpha)?;
    let differences = paired_differences(sample1, sample2)?;
    let inner = perform_one_sample_t_test_with(&differences, 0.0, alpha, alternative, tail)?;

    Ok(PairedTTest {
        statistic: inner.statistic,
        degrees_of_freedom: inner.degrees_of_freedom,
        p_value: inner.p_value,
        reject_null: inner.reject_null,
        alpha,
        alternative,
        mean_difference: inner.sample_mean,
        std_dev_difference: inner.sample_std_dev,
        standard_error: inner.standard_error,
        sample_size: inner.sample_size,
    })
}

/// Two-proportion z-test with the default tail strategy.
pub fn perform_two_proportion_test(
    successes1: u64,
    total1: u64,
    successes2: u64,
    total2: u64,
    alpha: f64,
    alternative: Alternative,
) -> Result<TwoProportionTest> {
    perform_two_proportion_test_with(
        successes1,
        total1,
        successes2,
        total2,
        alpha,
        alternative,
        &ClosedFormTail,
    )
}

/// Two-proportion z-test with an explicit tail strategy.
#[expect(clippy::cast_precision_loss)]
pub fn perform_two_proportion_test_with<T>(
    successes1: u64,
    total1: u64,
    successes2: u64,
    total2: u64,
    alpha: f64,
    alternative: Alternative,
    tail: &T,
) -> Result<TwoProportionTest>
where
    T: TailProbability + ?Sized,
{
    require_probability("alpha", alpha)?;
    let (p1, n1) = proportion_of(successes1, total1)?;
    let (p2, n2) = proportion_of(successes2, total2)?;
    let pooled = (successes1 + successes2) as f64 / (n1 + n2);
    let standard_error = (pooled * (1.0 - pooled) * (1.0 / n1 + 1.0 / n2)).sqrt();
    if standard_error <= 0.0 {
        return Err(degenerate("pooled proportion is 0 or 1"));
    }
    let statistic = (p1 - p2) / standard_error;
    let p_value = alternative.p_value(|z| tail.z_upper_tail(z), statistic);

    Ok(TwoProportionTest {
        statistic,
        p_value,
        reject_null: p_value < alpha,
        alpha,
        alternative,
        proportion1: p1,
        proportion2: p2,
        pooled_proportion: pooled,
        standard_error,
    })
}

/// Variance-ratio F-test with the default tail strategy.
pub fn perform_variance_f_test(
    sample1: &[f64],
    sample2: &[f64],
    alpha: f64,
) -> Result<VarianceFTest> {
    perform_variance_f_test_with(sample1, sample2, alpha, &ClosedFormTail)
}

/// Variance-ratio F-test with an explicit tail strategy.
///
/// The statistic is always the larger variance over the smaller, so the
/// test only asks whether the variances differ.
#[expect(clippy::cast_precision_loss)]
pub fn perform_variance_f_test_with<T>(
    sample1: &[f64],
    sample2: &[f64],
    alpha: f64,
    tail: &T,
) -> Result<VarianceFTest>
where
    T: TailProbability + ?Sized,
{
    require_probability("alpha", alpha)?;
    let variance1 = sample_variance(sample1)?;
    let variance2 = sample_variance(sample2)?;
    let df_of = |sample: &[f64]| (sample.len() - 1) as f64;
    let (statistic, df1, df2) = if variance1 >= variance2 {
        (variance1 / variance2, df_of(sample1), df_of(sample2))
    } else {
        (variance2 / variance1, df_of(sample2), df_of(sample1))
    };
    if !statistic.is_finite() {
        return Err(degenerate("smaller sample variance is zero"));
    }
    let p_value = tail.f_two_sided(statistic, df1, df2).clamp(0.0, 1.0);

    Ok(VarianceFTest {
        statistic,
        df1,
        df2,
        p_value,
        reject_null: p_value < alpha,
        alpha,
        variance1,
        variance2,
    })
}

/// One-sample proportion z-test with the default tail strategy.
pub fn perform_proportion_test(
    successes: u64,
    total: u64,
    hypothesized_proportion: f64,
    alpha: f64,
    alternative: Alternative,
) -> Result<ProportionTest> {
    perform_proportion_test_with(
        successes,
        total,
        hypothesized_proportion,
        alpha,
        alternative,
        &ClosedFormTail,
    )
}

/// One-sample proportion z-test with an explicit tail strategy.
pub fn perform_proportion_test_with<T>(
    successes: u64,
    total: u64,
    hypothesized_proportion: f64,
    alpha: f64,
    alternative: Alternative,
    tail: &T,
) -> Result<ProportionTest>
where
    T: TailProbability + ?Sized,
{
    require_probability("alpha", alpha)?;
    require_probability("hypothesized proportion", hypothesized_proportion)?;
    let (sample_proportion, n) = proportion_of(successes, total)?;
    let p0 = hypothesized_proportion;
    let standard_error = (p0 * (1.0 - p0) / n).sqrt();
    let statistic = (sample_proportion - p0) / standard_error;
    let p_value = alternative.p_value(|z| tail.z_upper_tail(z), statistic);

    Ok(ProportionTest {
        statistic,
        p_value,
        reject_null: p_value < alpha,
        alpha,
        alternative,
        sample_proportion,
        hypothesized_proportion,
        standard_error,
        sample_size: total,
    })
}
