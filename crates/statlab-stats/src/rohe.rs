//! Robustness, outlier and heteroscedasticity diagnostics.

use serde::Serialize;

use crate::{
    descriptive::{mad, mean, sample_variance, sorted_copy},
    error::{Result, require_len, require_probability},
    percentiles::Quartiles,
    special::chi_square_cdf,
};

/// Smallest sample the diagnostics accept.
pub const MIN_SAMPLE_SIZE: usize = 10;

/// Upper bound on the number of contiguous groups for the Bartlett test.
const MAX_GROUPS: usize = 5;

/// Combined diagnostic report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoheResult {
    pub outliers: OutlierSummary,
    pub heteroscedasticity: Heteroscedasticity,
    pub robustness: Robustness,
    pub quartiles: Quartiles,
    pub sample_size: usize,
}

/// Values outside the Tukey fences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierSummary {
    pub count: usize,
    /// Share of the sample, in percent.
    pub percentage: f64,
    /// Outlying values in their original order.
    pub values: Vec<f64>,
}

/// Bartlett test across contiguous groups of the sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heteroscedasticity {
    pub detected: bool,
    /// 0 when fewer than two groups have a positive variance.
    pub bartlett_statistic: f64,
    pub p_value: f64,
    pub significance_level: f64,
    /// Variances of the groups that entered the test.
    pub group_variances: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Robustness {
    pub mad: f64,
    /// `1 / (1 + MAD / |mean|)`.
    pub score: f64,
    pub interpretation: RobustnessBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum RobustnessBand {
    #[display("high")]
    High,
    #[display("medium")]
    Medium,
    #[display("low")]
    Low,
}

impl RobustnessBand {
    const HIGH: f64 = 0.8;
    const MEDIUM: f64 = 0.6;

    fn from_score(score: f64) -> Self {
        if score >= Self::HIGH {
            Self::High
        } else if score >= Self::MEDIUM {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Runs the outlier, heteroscedasticity and robustness diagnostics.
///
/// The sample is split into up to five contiguous groups in its original
/// order; groups with fewer than two values or zero variance are left out
/// of the Bartlett test. Heteroscedasticity is detected when the Bartlett
/// p-value is below `alpha`.
///
/// # Errors
///
/// [`StatsError::InsufficientSamples`](crate::StatsError::InsufficientSamples)
/// for fewer than [`MIN_SAMPLE_SIZE`] observations.
///
/// # Examples
///
/// ```
/// use statlab_stats::rohe::perform_rohe_analysis;
///
/// let data = [10.0, 11.0, 9.5, 10.5, 10.2, 9.8, 10.1, 10.4, 9.9, 10.3, 55.0];
/// let report = perform_rohe_analysis(&data, 0.05).unwrap();
/// assert_eq!(report.outliers.values, vec![55.0]);
///
/// assert!(perform_rohe_analysis(&data[..5], 0.05).is_err());
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn perform_rohe_analysis(data: &[f64], alpha: f64) -> Result<RoheResult> {
    require_len(data, MIN_SAMPLE_SIZE)?;
    require_probability("alpha", alpha)?;
    let n = data.len();

    let quartiles = Quartiles::from_sorted(&sorted_copy(data));
    let values = data
        .iter()
        .copied()
        .filter(|&x| quartiles.is_outlier(x))
        .collect::<Vec<_>>();
    let outliers = OutlierSummary {
        count: values.len(),
        percentage: values.len() as f64 / n as f64 * 100.0,
        values,
    };

    let heteroscedasticity = bartlett(data, alpha);

    let mad = mad(data)?;
    let sample_mean = mean(data);
    let score = if sample_mean.abs() < f64::EPSILON {
        if mad == 0.0 { 1.0 } else { 0.0 }
    } else {
        1.0 / (1.0 + mad / sample_mean.abs())
    };

    Ok(RoheResult {
        outliers,
        heteroscedasticity,
        robustness: Robustness {
            mad,
            score,
            interpretation: RobustnessBand::from_score(score),
        },
        quartiles,
        sample_size: n,
    })
}

#[expect(clippy::cast_precision_loss)]
fn bartlett(data: &[f64], alpha: f64) -> Heteroscedasticity {
    let group_len = data.len().div_ceil(MAX_GROUPS);
    let groups = data
        .chunks(group_len)
        .filter_map(|chunk| {
            let variance = sample_variance(chunk).ok()?;
            (variance > 0.0).then_some(((chunk.len() - 1) as f64, variance))
        })
        .collect::<Vec<_>>();

    let group_variances = groups.iter().map(|&(_, v)| v).collect();
    if groups.len() < 2 {
        return Heteroscedasticity {
            detected: false,
            bartlett_statistic: 0.0,
            p_value: 1.0,
            significance_level: alpha,
            group_variances,
        };
    }

    let k = groups.len() as f64;
    let total_df = groups.iter().map(|&(df, _)| df).sum::<f64>();
    let pooled = groups.iter().map(|&(df, v)| df * v).sum::<f64>() / total_df;
    let numerator =
        total_df * pooled.ln() - groups.iter().map(|&(df, v)| df * v.ln()).sum::<f64>();
    let correction = 1.0
        + (groups.iter().map(|&(df, _)| 1.0 / df).sum::<f64>() - 1.0 / total_df)
            / (3.0 * (k - 1.0));
    let statistic = (numerator / correction).max(0.0);
    let p_value = (1.0 - chi_square_cdf(statistic, k - 1.0)).clamp(0.0, 1.0);

    Heteroscedasticity {
        detected: p_value < alpha,
        bartlett_statistic: statistic,
        p_value,
        significance_level: alpha,
        group_variances,
    }
}
