//! Statistical power and sample-size planning.
//!
//! Effect sizes are magnitudes; the direction of the shift is taken from the
//! [`Alternative`]. Power is evaluated with the non-central t approximation
//! for t-tests and with the normal approximation for proportions, and is
//! always clamped to `[0, 1]`.

use serde::Serialize;

use crate::{
    error::{Result, StatsError, require_finite, require_positive, require_probability},
    hypothesis::Alternative,
    special::{noncentral_t_cdf, normal_cdf, normal_quantile, t_quantile_approx},
};

/// Power of a test at a fixed design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerResult {
    /// Probability of rejecting the null, clamped to `[0, 1]`.
    pub power: f64,
    /// Standardized effect size (a magnitude).
    pub effect_size: f64,
    /// Shift of the test statistic under the alternative.
    pub non_centrality_parameter: f64,
    /// `None` for the normal-approximation proportion test.
    pub degrees_of_freedom: Option<f64>,
    /// Critical value of the test statistic.
    pub critical_value: f64,
    /// Observations per group for two-sample designs.
    pub sample_size: usize,
    /// Significance level.
    pub alpha: f64,
    /// Direction of the alternative hypothesis.
    pub alternative: Alternative,
}

/// Smallest sample achieving a target power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSizeResult {
    /// Required observations (per group for two-sample designs).
    pub sample_size: u64,
    /// Standardized effect size (a magnitude).
    pub effect_size: f64,
    /// Significance level.
    pub alpha: f64,
    /// Target power.
    pub power: f64,
    /// Standard normal quantile for the significance level.
    pub z_alpha: f64,
    /// Standard normal quantile for the target power.
    pub z_beta: f64,
    /// Set for two-sample designs, equal to `sample_size`.
    pub sample_size_per_group: Option<u64>,
    /// Set for two-sample designs: both groups together.
    pub total_sample_size: Option<u64>,
}

/// Upper-tail probability used for the critical value of `alternative`.
fn critical_probability(alpha: f64, alternative: Alternative) -> f64 {
    match alternative {
        Alternative::TwoSided => 1.0 - alpha / 2.0,
        Alternative::Less | Alternative::Greater => 1.0 - alpha,
    }
}

fn require_effect(effect_size: f64) -> Result<f64> {
    Ok(require_finite("effect size", effect_size)?.abs())
}

fn require_sample_size(sample_size: usize, required: usize) -> Result<()> {
    if sample_size < required {
        return Err(StatsError::InsufficientSamples {
            required,
            actual: sample_size,
        });
    }
    Ok(())
}

/// Power of a t-test whose statistic follows a non-central t under the
/// alternative.
fn t_power(
    effect_size: f64,
    ncp: f64,
    df: f64,
    sample_size: usize,
    alpha: f64,
    alternative: Alternative,
) -> Result<PowerResult> {
    let critical_value = t_quantile_approx(df, critical_probability(alpha, alternative))?;
    let power = match alternative {
        Alternative::Greater => 1.0 - noncentral_t_cdf(critical_value, df, ncp),
        Alternative::Less => noncentral_t_cdf(-critical_value, df, -ncp),
        Alternative::TwoSided => {
            1.0 - noncentral_t_cdf(critical_value, df, ncp)
                + noncentral_t_cdf(-critical_value, df, ncp)
        }
    };
    Ok(PowerResult {
        power: power.clamp(0.0, 1.0),
        effect_size,
        non_centrality_parameter: ncp,
        degrees_of_freedom: Some(df),
        critical_value,
        sample_size,
        alpha,
        alternative,
    })
}

/// Power of the one-sample t-test for Cohen's `d = |μ − μ₀| / σ`.
///
/// # Examples
///
/// ```
/// use statlab_stats::{hypothesis::Alternative, power::calculate_power_one_sample_t};
///
/// let small = calculate_power_one_sample_t(0.5, 10, 0.05, Alternative::TwoSided).unwrap();
/// let large = calculate_power_one_sample_t(0.5, 80, 0.05, Alternative::TwoSided).unwrap();
/// assert!(small.power < large.power);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn calculate_power_one_sample_t(
    effect_size: f64,
    sample_size: usize,
    alpha: f64,
    alternative: Alternative,
) -> Result<PowerResult> {
    require_probability("alpha", alpha)?;
    require_sample_size(sample_size, 2)?;
    let d = require_effect(effect_size)?;
    let n = sample_size as f64;
    t_power(d, d * n.sqrt(), n - 1.0, sample_size, alpha, alternative)
}

/// Power of the pooled two-sample t-test with `sample_size` per group.
#[expect(clippy::cast_precision_loss)]
pub fn calculate_power_two_sample_t(
    effect_size: f64,
    sample_size: usize,
    alpha: f64,
    alternative: Alternative,
) -> Result<PowerResult> {
    require_probability("alpha", alpha)?;
    require_sample_size(sample_size, 2)?;
    let d = require_effect(effect_size)?;
    let n = sample_size as f64;
    t_power(
        d,
        d * (n / 2.0).sqrt(),
        2.0 * n - 2.0,
        sample_size,
        alpha,
        alternative,
    )
}

/// Power of the one-sample proportion z-test of `p0` when the true
/// proportion is `p1`.
///
/// A true proportion at or beyond 0 or 1 saturates: `greater` has power 1
/// when `p1 >= 1` and 0 when `p1 <= 0`, `less` the mirror image, and a
/// two-sided test has power 1 at either boundary.
#[expect(clippy::cast_precision_loss)]
pub fn calculate_power_proportion_test(
    p0: f64,
    p1: f64,
    sample_size: usize,
    alpha: f64,
    alternative: Alternative,
) -> Result<PowerResult> {
    require_probability("alpha", alpha)?;
    require_probability("p0", p0)?;
    require_finite("p1", p1)?;
    require_sample_size(sample_size, 1)?;

    let n = sample_size as f64;
    let null_sd = (p0 * (1.0 - p0)).sqrt();
    let effect_size = (p1 - p0).abs() / null_sd;
    let ncp = effect_size * n.sqrt();
    let z = normal_quantile(critical_probability(alpha, alternative))?;

    let power = if p1 >= 1.0 || p1 <= 0.0 {
        match alternative {
            Alternative::Greater => f64::from(u8::from(p1 >= 1.0)),
            Alternative::Less => f64::from(u8::from(p1 <= 0.0)),
            Alternative::TwoSided => 1.0,
        }
    } else {
        let se0 = null_sd / n.sqrt();
        let se1 = (p1 * (1.0 - p1) / n).sqrt();
        let upper = p0 + z * se0;
        let lower = p0 - z * se0;
        match alternative {
            Alternative::Greater => 1.0 - normal_cdf((upper - p1) / se1),
            Alternative::Less => normal_cdf((lower - p1) / se1),
            Alternative::TwoSided => {
                1.0 - normal_cdf((upper - p1) / se1) + normal_cdf((lower - p1) / se1)
            }
        }
    };

    Ok(PowerResult {
        power: power.clamp(0.0, 1.0),
        effect_size,
        non_centrality_parameter: ncp,
        degrees_of_freedom: None,
        critical_value: z,
        sample_size,
        alpha,
        alternative,
    })
}

/// `(z_alpha, z_beta)` for a design at `alpha` and target `power`.
fn z_pair(alpha: f64, power: f64, alternative: Alternative) -> Result<(f64, f64)> {
    require_probability("alpha", alpha)?;
    require_probability("power", power)?;
    Ok((
        normal_quantile(critical_probability(alpha, alternative))?,
        normal_quantile(power)?,
    ))
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ceil_count(value: f64) -> Result<u64> {
    let value = require_finite("sample size", value)?;
    Ok(value.ceil().max(1.0) as u64)
}

/// Sample size for the one-sample t-test: `⌈((z_α + z_β) / d)²⌉`.
///
/// # Examples
///
/// ```
/// use statlab_stats::{hypothesis::Alternative, power::calculate_sample_size_one_sample_t};
///
/// let plan = calculate_sample_size_one_sample_t(0.5, 0.05, 0.8, Alternative::TwoSided).unwrap();
/// assert_eq!(plan.sample_size, 32);
/// ```
pub fn calculate_sample_size_one_sample_t(
    effect_size: f64,
    alpha: f64,
    power: f64,
    alternative: Alternative,
) -> Result<SampleSizeResult> {
    require_positive("effect size", effect_size)?;
    let (z_alpha, z_beta) = z_pair(alpha, power, alternative)?;
    Ok(SampleSizeResult {
        sample_size: ceil_count(((z_alpha + z_beta) / effect_size).powi(2))?,
        effect_size,
        alpha,
        power,
        z_alpha,
        z_beta,
        sample_size_per_group: None,
        total_sample_size: None,
    })
}

/// Per-group sample size for the two-sample t-test: `⌈2(z_α + z_β)² / d²⌉`.
pub fn calculate_sample_size_two_sample_t(
    effect_size: f64,
    alpha: f64,
    power: f64,
    alternative: Alternative,
) -> Result<SampleSizeResult> {
    require_positive("effect size", effect_size)?;
    let (z_alpha, z_beta) = z_pair(alpha, power, alternative)?;
    let per_group = ceil_count(2.0 * (z_alpha + z_beta).powi(2) / effect_size.powi(2))?;
    Ok(SampleSizeResult {
        sample_size: per_group,
        effect_size,
        alpha,
        power,
        z_alpha,
        z_beta,
        sample_size_per_group: Some(per_group),
        total_sample_size: Some(2 * per_group),
    })
}

/// Sample size for the one-sample proportion test of `p0` against `p1`.
///
/// The effect size is `|p1 − p0| / sqrt(p0(1 − p0))`.
pub fn calculate_sample_size_proportion_test(
    p0: f64,
    p1: f64,
    alpha: f64,
    power: f64,
    alternative: Alternative,
) -> Result<SampleSizeResult> {
    require_probability("p0", p0)?;
    require_probability("p1", p1)?;
    let effect_size = (p1 - p0).abs() / (p0 * (1.0 - p0)).sqrt();
    require_positive("effect size", effect_size)?;
    let (z_alpha, z_beta) = z_pair(alpha, power, alternative)?;
    Ok(SampleSizeResult {
        sample_size: ceil_count(((z_alpha + z_beta) / effect_size).powi(2))?,
        effect_size,
        alpha,
        power,
        z_alpha,
        z_beta,
        sample_size_per_group: None,
        total_sample_size: None,
    })
}
