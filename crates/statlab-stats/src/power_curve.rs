//! Power curves: power evaluated over a sweep of effect sizes or sample sizes.

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    hypothesis::Alternative,
    power::{
        PowerResult, calculate_power_one_sample_t, calculate_power_proportion_test,
        calculate_power_two_sample_t,
    },
};

/// Number of intervals the swept range is divided into.
pub const POWER_CURVE_STEPS: usize = 50;

/// Test whose power is plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerTestType {
    OneSampleT,
    TwoSampleT,
    Proportion,
}

/// Quantity varied along the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerAxis {
    /// Cohen's d for t-tests, `|p1 - p0|` for the proportion test.
    EffectSize,
    /// Observations (per group for the two-sample test).
    SampleSize,
}

/// Parameters held fixed while the other axis is swept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerCurveParams {
    pub effect_size: f64,
    pub sample_size: usize,
    pub alpha: f64,
    pub alternative: Alternative,
    /// Null proportion of the proportion test.
    pub p0: f64,
}

impl Default for PowerCurveParams {
    fn default() -> Self {
        Self {
            effect_size: 0.5,
            sample_size: 30,
            alpha: 0.05,
            alternative: Alternative::TwoSided,
            p0: 0.5,
        }
    }
}

/// A single point of a power curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerPoint {
    pub x: f64,
    pub y: f64,
}

/// Sweeps `axis` over `[start, end]` in [`POWER_CURVE_STEPS`] equal steps
/// and evaluates power at each point.
///
/// Points whose calculation fails (a sample size below the test's minimum,
/// for instance) are skipped. Sample sizes are rounded to the nearest
/// integer. For the proportion test swept by effect size the true
/// proportion is `p0 + x` for `greater` and two-sided tests and `p0 - x` for
/// `less`; beyond 0 or 1 power saturates as described on
/// [`calculate_power_proportion_test`].
///
/// # Examples
///
/// ```
/// use statlab_stats::power_curve::{
///     PowerAxis, PowerCurveParams, PowerTestType, generate_power_function_data,
/// };
///
/// let curve = generate_power_function_data(
///     PowerTestType::OneSampleT,
///     PowerAxis::SampleSize,
///     &PowerCurveParams::default(),
///     (5.0, 100.0),
/// );
/// assert_eq!(curve.len(), 51);
/// assert!(curve.iter().all(|p| (0.0..=1.0).contains(&p.y)));
/// ```
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn generate_power_function_data(
    test_type: PowerTestType,
    axis: PowerAxis,
    params: &PowerCurveParams,
    (start, end): (f64, f64),
) -> Vec<PowerPoint> {
    let step = (end - start) / POWER_CURVE_STEPS as f64;
    (0..=POWER_CURVE_STEPS)
        .map(|i| start + step * i as f64)
        .filter_map(|x| {
            let result = evaluate(test_type, axis, params, x).ok()?;
            Some(PowerPoint {
                x,
                y: result.power.clamp(0.0, 1.0),
            })
        })
        .collect()
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn evaluate(
    test_type: PowerTestType,
    axis: PowerAxis,
    params: &PowerCurveParams,
    x: f64,
) -> Result<PowerResult> {
    let (effect_size, sample_size) = match axis {
        PowerAxis::EffectSize => (x, params.sample_size),
        PowerAxis::SampleSize => (params.effect_size, x.round().max(0.0) as usize),
    };
    let PowerCurveParams {
        alpha, alternative, p0, ..
    } = *params;
    match test_type {
        PowerTestType::OneSampleT => {
            calculate_power_one_sample_t(effect_size, sample_size, alpha, alternative)
        }
        PowerTestType::TwoSampleT => {
            calculate_power_two_sample_t(effect_size, sample_size, alpha, alternative)
        }
        PowerTestType::Proportion => {
            let p1 = match alternative {
                Alternative::Less => p0 - effect_size,
                Alternative::Greater | Alternative::TwoSided => p0 + effect_size,
            };
            calculate_power_proportion_test(p0, p1, sample_size, alpha, alternative)
        }
    }
}
