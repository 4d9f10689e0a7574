//! Synthetic samples from a handful of textbook distributions.

use rand::Rng;
use rand_distr::{Distribution as _, Exp, Normal, Poisson, Uniform};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError, degenerate, require_finite, require_positive};

/// Distribution and size of a synthetic sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSpec {
    pub distribution: SyntheticDistribution,
    pub sample_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SyntheticDistribution {
    Normal { mean: f64, std_dev: f64 },
    /// Continuous uniform on `[min, max)`.
    Uniform { min: f64, max: f64 },
    Exponential { lambda: f64 },
    Poisson { rate: f64 },
}

/// Draws `spec.sample_size` values from `spec.distribution`.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng as _, rngs::StdRng};
/// use statlab_stats::generator::{DistributionSpec, SyntheticDistribution, generate_sample};
///
/// let spec = DistributionSpec {
///     distribution: SyntheticDistribution::Uniform { min: 2.0, max: 3.0 },
///     sample_size: 100,
/// };
/// let sample = generate_sample(&spec, &mut StdRng::seed_from_u64(0)).unwrap();
/// assert_eq!(sample.len(), 100);
/// assert!(sample.iter().all(|x| (2.0..3.0).contains(x)));
/// ```
pub fn generate_sample<R>(spec: &DistributionSpec, rng: &mut R) -> Result<Vec<f64>>
where
    R: Rng + ?Sized,
{
    let n = spec.sample_size;
    if n == 0 {
        return Err(StatsError::InsufficientSamples {
            required: 1,
            actual: 0,
        });
    }
    let sample = match spec.distribution {
        SyntheticDistribution::Normal { mean, std_dev } => {
            require_finite("mean", mean)?;
            require_positive("standard deviation", std_dev)?;
            let normal = Normal::new(mean, std_dev).map_err(|_| degenerate("normal parameters"))?;
            normal.sample_iter(rng).take(n).collect()
        }
        SyntheticDistribution::Uniform { min, max } => {
            require_finite("min", min)?;
            require_positive("range width", require_finite("max", max)? - min)?;
            let uniform = Uniform::new(min, max).map_err(|_| degenerate("uniform range"))?;
            uniform.sample_iter(rng).take(n).collect()
        }
        SyntheticDistribution::Exponential { lambda } => {
            require_positive("lambda", lambda)?;
            let exp = Exp::new(lambda).map_err(|_| degenerate("exponential rate"))?;
            exp.sample_iter(rng).take(n).collect()
        }
        SyntheticDistribution::Poisson { rate } => {
            require_positive("rate", rate)?;
            let poisson = Poisson::new(rate).map_err(|_| degenerate("poisson rate"))?;
            poisson.sample_iter(rng).take(n).collect()
        }
    };
    Ok(sample)
}
