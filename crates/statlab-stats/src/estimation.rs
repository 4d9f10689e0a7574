//! Point estimators for distribution parameters.
//!
//! [`calculate_mle`] and [`calculate_mom`] both assume a normal family and,
//! for compatibility with earlier releases, both report the unbiased `n - 1`
//! variance. The per-family fits in [`calculate_mle_for_distributions`] use
//! the textbook maximum-likelihood formulas, including the biased normal
//! variance.

use serde::Serialize;

use crate::{
    descriptive::{mean, sample_variance},
    error::{Result, StatsError, require_len},
};

/// Location-scale estimate shared by the MLE and MoM normal estimators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimationResult {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl EstimationResult {
    fn normal_unbiased(data: &[f64]) -> Result<Self> {
        let variance = sample_variance(data)?;
        Ok(Self {
            mean: mean(data),
            variance,
            std_dev: variance.sqrt(),
        })
    }
}

/// Normal-family maximum likelihood estimate (reported with the `n - 1` variance).
pub fn calculate_mle(data: &[f64]) -> Result<EstimationResult> {
    EstimationResult::normal_unbiased(data)
}

/// Normal-family method-of-moments estimate.
pub fn calculate_mom(data: &[f64]) -> Result<EstimationResult> {
    EstimationResult::normal_unbiased(data)
}

/// Single-parameter fit with a data-dependent validity flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterFit {
    /// The estimate; `0.0` when the sample admits no finite estimate.
    pub estimate: f64,
    /// Whether the sample lies in the family's support.
    pub valid: bool,
}

/// Normal fit with the biased (`n`) variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalFit {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub valid: bool,
}

/// Maximum-likelihood fits for several families at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionFits {
    /// Success probability `p̂ = mean`; valid when every value is 0 or 1.
    pub bernoulli: ParameterFit,
    /// Rate `λ̂ = mean`; valid for non-negative integers.
    pub poisson: ParameterFit,
    /// Rate `λ̂ = n / Σx`; valid for strictly positive data.
    pub exponential: ParameterFit,
    pub normal: NormalFit,
}

/// Fits Bernoulli, Poisson, exponential and normal models by maximum likelihood.
///
/// # Examples
///
/// ```
/// # use statlab_stats::estimation::calculate_mle_for_distributions;
/// let fits = calculate_mle_for_distributions(&[0.0, 1.0, 1.0, 0.0]).unwrap();
/// assert!(fits.bernoulli.valid);
/// assert_eq!(fits.bernoulli.estimate, 0.5);
/// assert!(!fits.exponential.valid);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn calculate_mle_for_distributions(data: &[f64]) -> Result<DistributionFits> {
    require_len(data, 1)?;

    let n = data.len() as f64;
    let mean = mean(data);
    let sum = data.iter().sum::<f64>();

    let is_binary = data.iter().all(|&x| x == 0.0 || x == 1.0);
    let is_count = data.iter().all(|&x| x >= 0.0 && x.fract() == 0.0);
    let is_positive = data.iter().all(|&x| x > 0.0);

    let exponential = if sum > 0.0 {
        ParameterFit {
            estimate: n / sum,
            valid: is_positive,
        }
    } else {
        ParameterFit {
            estimate: 0.0,
            valid: false,
        }
    };

    let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    Ok(DistributionFits {
        bernoulli: ParameterFit {
            estimate: mean,
            valid: is_binary,
        },
        poisson: ParameterFit {
            estimate: mean,
            valid: is_count,
        },
        exponential,
        normal: NormalFit {
            mean,
            variance,
            std_dev: variance.sqrt(),
            valid: true,
        },
    })
}

/// Gamma parameters by the method of moments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GammaEstimate {
    /// `k = mean² / variance`
    pub shape: f64,
    /// `θ = variance / mean`
    pub scale: f64,
}

/// Gamma method-of-moments estimate from a mean and a variance.
///
/// # Errors
///
/// [`StatsError::NonPositiveParameter`] when `mean <= 0` or `variance <= 0`,
/// since the Gamma family only covers positive means and variances.
///
/// # Examples
///
/// ```
/// # use statlab_stats::estimation::calculate_gamma_mom;
/// let gamma = calculate_gamma_mom(4.0, 8.0).unwrap();
/// assert_eq!(gamma.shape, 2.0);
/// assert_eq!(gamma.scale, 2.0);
/// assert!(calculate_gamma_mom(-1.0, 8.0).is_err());
/// ```
pub fn calculate_gamma_mom(mean: f64, variance: f64) -> Result<GammaEstimate> {
    if mean <= 0.0 || !mean.is_finite() {
        return Err(StatsError::NonPositiveParameter {
            name: "mean",
            value: mean,
        });
    }
    if variance <= 0.0 || !variance.is_finite() {
        return Err(StatsError::NonPositiveParameter {
            name: "variance",
            value: variance,
        });
    }
    Ok(GammaEstimate {
        shape: mean * mean / variance,
        scale: variance / mean,
    })
}
