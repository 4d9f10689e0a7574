//! Sampling distribution of the sample mean.
//!
//! Samples of at least [`LARGE_SAMPLE`] observations use the normal
//! quantile/CDF pair; smaller ones use the Student-t approximations with
//! `n - 1` degrees of freedom. The standard error is `s / sqrt(n)`.

use serde::{Deserialize, Serialize};

use crate::{
    descriptive::{mean, sample_variance},
    error::{Result, degenerate, require_finite, require_probability},
    interval::{IntervalMethod, LARGE_SAMPLE},
    special::{normal_cdf, normal_quantile, t_cdf_approx, t_quantile_approx},
};

/// Which side of the boundary the probability refers to.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tail {
    /// `P(X̄ <= c)`
    #[default]
    Lower,
    /// `P(X̄ >= c)`
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanBoundary {
    pub boundary: f64,
    pub probability: f64,
    pub tail: Tail,
    pub mean: f64,
    pub standard_error: f64,
    pub method: IntervalMethod,
    pub degrees_of_freedom: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanProbability {
    pub probability: f64,
    pub boundary: f64,
    pub tail: Tail,
    /// Standardized boundary `(c - mean) / se`.
    pub statistic: f64,
    pub mean: f64,
    pub standard_error: f64,
    pub method: IntervalMethod,
    pub degrees_of_freedom: Option<f64>,
}

struct SamplingDistribution {
    mean: f64,
    standard_error: f64,
    degrees_of_freedom: Option<f64>,
}

impl SamplingDistribution {
    #[expect(clippy::cast_precision_loss)]
    fn from_data(data: &[f64]) -> Result<Self> {
        let n = data.len();
        let standard_error = (sample_variance(data)? / n as f64).sqrt();
        if standard_error <= 0.0 {
            return Err(degenerate("sample has zero variance"));
        }
        Ok(Self {
            mean: mean(data),
            standard_error,
            degrees_of_freedom: (n < LARGE_SAMPLE).then(|| (n - 1) as f64),
        })
    }

    fn method(&self) -> IntervalMethod {
        if self.degrees_of_freedom.is_some() {
            IntervalMethod::T
        } else {
            IntervalMethod::Z
        }
    }

    fn quantile(&self, p: f64) -> Result<f64> {
        match self.degrees_of_freedom {
            Some(df) => t_quantile_approx(df, p),
            None => normal_quantile(p),
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        match self.degrees_of_freedom {
            Some(df) => t_cdf_approx(x, df),
            None => normal_cdf(x),
        }
    }
}

/// Value `c` such that the sample mean falls on the `tail` side of `c` with
/// the given probability.
///
/// # Examples
///
/// ```
/// use statlab_stats::sampling::{Tail, calculate_mean_boundary};
///
/// let data = (1..=40).map(f64::from).collect::<Vec<_>>();
/// let lower = calculate_mean_boundary(&data, 0.5, Tail::Lower).unwrap();
/// assert!((lower.boundary - 20.5).abs() < 1e-6);
/// ```
pub fn calculate_mean_boundary(data: &[f64], probability: f64, tail: Tail) -> Result<MeanBoundary> {
    require_probability("probability", probability)?;
    let dist = SamplingDistribution::from_data(data)?;
    let q = match tail {
        Tail::Lower => dist.quantile(probability)?,
        Tail::Upper => dist.quantile(1.0 - probability)?,
    };
    Ok(MeanBoundary {
        boundary: dist.mean + q * dist.standard_error,
        probability,
        tail,
        mean: dist.mean,
        standard_error: dist.standard_error,
        method: dist.method(),
        degrees_of_freedom: dist.degrees_of_freedom,
    })
}

/// Probability that the sample mean falls on the `tail` side of `boundary`.
pub fn calculate_mean_probability_from_data(
    data: &[f64],
    boundary: f64,
    tail: Tail,
) -> Result<MeanProbability> {
    require_finite("boundary", boundary)?;
    let dist = SamplingDistribution::from_data(data)?;
    let statistic = (boundary - dist.mean) / dist.standard_error;
    let lower = dist.cdf(statistic);
    let probability = match tail {
        Tail::Lower => lower,
        Tail::Upper => 1.0 - lower,
    };
    Ok(MeanProbability {
        probability: probability.clamp(0.0, 1.0),
        boundary,
        tail,
        statistic,
        mean: dist.mean,
        standard_error: dist.standard_error,
        method: dist.method(),
        degrees_of_freedom: dist.degrees_of_freedom,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_probability_round_trip() {
        let small = [4.1, 5.3, 3.8, 4.9, 5.6, 4.4, 5.0, 4.7, 5.2, 4.0, 4.6, 5.1];
        let large = (0..50).map(|i| f64::from(i % 9) * 1.5).collect::<Vec<_>>();
        for data in [&small[..], &large[..]] {
            for tail in [Tail::Lower, Tail::Upper] {
                for p in [0.1, 0.25, 0.5, 0.8, 0.95] {
                    let boundary = calculate_mean_boundary(data, p, tail).unwrap();
                    let back =
                        calculate_mean_probability_from_data(data, boundary.boundary, tail).unwrap();
                    assert!(
                        (back.probability - p).abs() < 0.01,
                        "{tail:?} p = {p}: {}",
                        back.probability
                    );
                }
            }
        }
    }

    #[test]
    fn test_method_follows_sample_size() {
        let small = (0..10).map(f64::from).collect::<Vec<_>>();
        let large = (0..30).map(f64::from).collect::<Vec<_>>();
        let a = calculate_mean_boundary(&small, 0.9, Tail::Lower).unwrap();
        let b = calculate_mean_boundary(&large, 0.9, Tail::Lower).unwrap();
        assert_eq!(a.method, IntervalMethod::T);
        assert_eq!(a.degrees_of_freedom, Some(9.0));
        assert_eq!(b.method, IntervalMethod::Z);
        assert_eq!(b.degrees_of_freedom, None);
    }

    #[test]
    fn test_upper_boundary_lies_above_mean() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let upper = calculate_mean_boundary(&data, 0.05, Tail::Upper).unwrap();
        assert!(upper.boundary > upper.mean);
    }

    #[test]
    fn test_constant_sample_is_degenerate() {
        assert!(calculate_mean_boundary(&[1.0; 8], 0.5, Tail::Lower).is_err());
    }
}
