//! Chi-square goodness-of-fit against a fixed set of candidate families.
//!
//! Bins with an expected count of zero are skipped; there is no minimum
//! expected-count floor, so small bins are scored as they are.

use serde::Serialize;

use crate::{
    descriptive::{mean, sample_variance, sorted_copy},
    error::{Result, degenerate, require_len},
    histogram::{Histogram, sturges_bin_count},
    special::{chi_square_cdf, normal_cdf_erf},
};

/// Candidate distribution families, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum Candidate {
    #[display("normal")]
    Normal,
    #[display("uniform")]
    Uniform,
    #[display("exponential")]
    Exponential,
    #[display("lognormal")]
    LogNormal,
}

impl Candidate {
    pub const ALL: [Self; 4] = [
        Self::Normal,
        Self::Uniform,
        Self::Exponential,
        Self::LogNormal,
    ];

    /// Parameters estimated from the data, subtracted from the degrees of
    /// freedom.
    #[must_use]
    pub fn parameter_count(self) -> usize {
        match self {
            Self::Exponential => 1,
            Self::Normal | Self::Uniform | Self::LogNormal => 2,
        }
    }
}

/// Qualitative verdict derived from the p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum FitRecommendation {
    /// p > 0.05
    #[display("good fit")]
    Good,
    /// 0.01 < p <= 0.05
    #[display("acceptable fit")]
    Acceptable,
    #[display("poor fit")]
    Poor,
    /// The family's support excludes some observations.
    #[display("not applicable")]
    NotApplicable,
}

impl FitRecommendation {
    fn from_p_value(p_value: f64) -> Self {
        if p_value > 0.05 {
            Self::Good
        } else if p_value > 0.01 {
            Self::Acceptable
        } else {
            Self::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitStatistic {
    pub chi_square: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateFit {
    pub distribution: Candidate,
    /// `None` when the candidate is not applicable to the data.
    pub statistic: Option<FitStatistic>,
    pub recommendation: FitRecommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinCount {
    pub lower: f64,
    pub upper: f64,
    pub observed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoodnessOfFitResult {
    /// Applicable candidate with the highest p-value.
    pub best_fit: Candidate,
    pub results: Vec<CandidateFit>,
    pub bins: Vec<BinCount>,
    pub sample_size: usize,
}

/// Fitted CDF of one candidate, or `None` if its support excludes the data.
fn fitted_cdf(candidate: Candidate, sorted: &[f64]) -> Option<Box<dyn Fn(f64) -> f64>> {
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    match candidate {
        Candidate::Normal => {
            let m = mean(sorted);
            let sd = sample_variance(sorted).ok()?.sqrt();
            Some(Box::new(move |x| normal_cdf_erf(x, m, sd)))
        }
        Candidate::Uniform => {
            Some(Box::new(move |x| ((x - min) / (max - min)).clamp(0.0, 1.0)))
        }
        Candidate::Exponential => {
            if min < 0.0 {
                return None;
            }
            let rate = 1.0 / mean(sorted);
            Some(Box::new(move |x| {
                if x <= 0.0 { 0.0 } else { 1.0 - (-rate * x).exp() }
            }))
        }
        Candidate::LogNormal => {
            if min <= 0.0 {
                return None;
            }
            let logs = sorted.iter().copied().map(f64::ln).collect::<Vec<_>>();
            let m = mean(&logs);
            let sd = sample_variance(&logs).ok()?.sqrt();
            if sd <= 0.0 {
                return None;
            }
            Some(Box::new(move |x| {
                if x <= 0.0 { 0.0 } else { normal_cdf_erf(x.ln(), m, sd) }
            }))
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn score(cdf: &dyn Fn(f64) -> f64, bins: &[BinCount], n: f64, parameters: usize) -> FitStatistic {
    let (chi_square, valid_bins) = bins
        .iter()
        .filter_map(|bin| {
            let expected = n * (cdf(bin.upper) - cdf(bin.lower));
            (expected > 0.0).then(|| (bin.observed as f64 - expected).powi(2) / expected)
        })
        .fold((0.0, 0usize), |(sum, count), term| (sum + term, count + 1));

    let degrees_of_freedom = valid_bins.saturating_sub(1 + parameters).max(1) as f64;
    FitStatistic {
        chi_square,
        degrees_of_freedom,
        p_value: (1.0 - chi_square_cdf(chi_square, degrees_of_freedom)).clamp(0.0, 1.0),
    }
}

/// Scores every [`Candidate`] with a chi-square test over Sturges bins.
///
/// # Errors
///
/// Fails for fewer than two observations or a constant sample.
///
/// # Examples
///
/// ```
/// use statlab_stats::goodness_of_fit::{Candidate, perform_goodness_of_fit_test};
///
/// let data = (0..200).map(|i| f64::from(i % 40)).collect::<Vec<_>>();
/// let fit = perform_goodness_of_fit_test(&data).unwrap();
/// assert_eq!(fit.best_fit, Candidate::Uniform);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn perform_goodness_of_fit_test(data: &[f64]) -> Result<GoodnessOfFitResult> {
    require_len(data, 2)?;
    if sample_variance(data)? <= 0.0 {
        return Err(degenerate("goodness of fit needs a non-constant sample"));
    }
    let sorted = sorted_copy(data);
    let n = sorted.len();
    let bins = Histogram::from_sorted(&sorted, sturges_bin_count(n))
        .bins
        .into_iter()
        .map(|bin| BinCount {
            lower: bin.range.start,
            upper: bin.range.end,
            observed: bin.count,
        })
        .collect::<Vec<_>>();

    let results = Candidate::ALL
        .into_iter()
        .map(|distribution| match fitted_cdf(distribution, &sorted) {
            Some(cdf) => {
                let statistic = score(cdf.as_ref(), &bins, n as f64, distribution.parameter_count());
                CandidateFit {
                    distribution,
                    statistic: Some(statistic),
                    recommendation: FitRecommendation::from_p_value(statistic.p_value),
                }
            }
            None => CandidateFit {
                distribution,
                statistic: None,
                recommendation: FitRecommendation::NotApplicable,
            },
        })
        .collect::<Vec<_>>();

    let best_fit = results
        .iter()
        .filter_map(|fit| Some((fit.distribution, fit.statistic?.p_value)))
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .map_or(Candidate::Normal, |(distribution, _)| distribution);

    Ok(GoodnessOfFitResult {
        best_fit,
        results,
        bins,
        sample_size: n,
    })
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng as _, rngs::StdRng};
    use rand_distr::{Distribution as _, Normal};

    use super::*;

    fn fit_of(result: &GoodnessOfFitResult, candidate: Candidate) -> CandidateFit {
        *result
            .results
            .iter()
            .find(|fit| fit.distribution == candidate)
            .unwrap()
    }

    #[test]
    fn test_normal_sample_prefers_normal() {
        let mut rng = StdRng::seed_from_u64(11);
        let normal = Normal::new(0.0, 5.0).unwrap();
        let data = (0..500).map(|_| normal.sample(&mut rng)).collect::<Vec<_>>();
        let result = perform_goodness_of_fit_test(&data).unwrap();
        assert_eq!(result.best_fit, Candidate::Normal);
        let uniform = fit_of(&result, Candidate::Uniform).statistic.unwrap();
        assert_eq!(fit_of(&result, Candidate::Uniform).recommendation, FitRecommendation::Poor);
        assert!(uniform.p_value < 0.01);
    }

    #[test]
    fn test_negative_data_excludes_positive_families() {
        let data = (-20..20).map(f64::from).collect::<Vec<_>>();
        let result = perform_goodness_of_fit_test(&data).unwrap();
        for candidate in [Candidate::Exponential, Candidate::LogNormal] {
            let fit = fit_of(&result, candidate);
            assert!(fit.statistic.is_none());
            assert_eq!(fit.recommendation, FitRecommendation::NotApplicable);
        }
        assert_ne!(result.best_fit, Candidate::Exponential);
    }

    #[test]
    fn test_bins_cover_the_sample() {
        let data = (1..=64).map(f64::from).collect::<Vec<_>>();
        let result = perform_goodness_of_fit_test(&data).unwrap();
        assert_eq!(result.bins.len(), 7);
        assert_eq!(result.bins.iter().map(|b| b.observed).sum::<u64>(), 64);
        for fit in &result.results {
            if let Some(statistic) = fit.statistic {
                assert!(statistic.degrees_of_freedom >= 1.0);
                assert!((0.0..=1.0).contains(&statistic.p_value));
            }
        }
    }

    #[test]
    fn test_constant_sample_is_degenerate() {
        assert!(perform_goodness_of_fit_test(&[3.0; 20]).unwrap_err().is_numerical_degeneracy());
    }
}
