use std::path::PathBuf;

use serde::Serialize;
use statlab_stats::{
    hypothesis::Alternative,
    power::{
        PowerResult, SampleSizeResult, calculate_power_one_sample_t,
        calculate_power_proportion_test, calculate_power_two_sample_t,
        calculate_sample_size_one_sample_t, calculate_sample_size_proportion_test,
        calculate_sample_size_two_sample_t,
    },
    power_curve::{
        PowerAxis, PowerCurveParams, PowerPoint, PowerTestType, generate_power_function_data,
    },
};

use crate::{config::AlternativeArg, util::Output};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum PowerTestArg {
    #[default]
    OneSampleT,
    TwoSampleT,
    Proportion,
}

impl From<PowerTestArg> for PowerTestType {
    fn from(arg: PowerTestArg) -> Self {
        match arg {
            PowerTestArg::OneSampleT => Self::OneSampleT,
            PowerTestArg::TwoSampleT => Self::TwoSampleT,
            PowerTestArg::Proportion => Self::Proportion,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum CurveAxisArg {
    EffectSize,
    SampleSize,
}

impl From<CurveAxisArg> for PowerAxis {
    fn from(arg: CurveAxisArg) -> Self {
        match arg {
            CurveAxisArg::EffectSize => Self::EffectSize,
            CurveAxisArg::SampleSize => Self::SampleSize,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PowerArg {
    #[arg(long, value_enum, default_value_t)]
    test: PowerTestArg,
    /// Cohen's d for t-tests; ignored for the proportion test
    #[arg(long, default_value_t = 0.5)]
    effect_size: f64,
    /// Observations (per group for the two-sample test)
    #[arg(long, default_value_t = 30)]
    sample_size: usize,
    /// Significance level
    #[arg(long, default_value_t = 0.05)]
    alpha: f64,
    #[arg(long, value_enum, default_value_t)]
    alternative: AlternativeArg,
    /// Null proportion for the proportion test
    #[arg(long, default_value_t = 0.5)]
    p0: f64,
    /// True proportion for the proportion test
    #[arg(long, default_value_t = 0.6)]
    p1: f64,
    /// Target power for the sample-size calculation
    #[arg(long, default_value_t = 0.8)]
    target_power: f64,
    /// Also sweep power along this axis
    #[arg(long, value_enum, requires_all = ["from", "to"])]
    curve: Option<CurveAxisArg>,
    /// Start of the swept range
    #[arg(long)]
    from: Option<f64>,
    /// End of the swept range
    #[arg(long)]
    to: Option<f64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct PowerAnalysis {
    power: PowerResult,
    required_sample_size: SampleSizeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    curve: Option<Vec<PowerPoint>>,
}

pub(crate) fn run(arg: &PowerArg) -> anyhow::Result<()> {
    let PowerArg {
        test,
        effect_size,
        sample_size,
        alpha,
        alternative,
        p0,
        p1,
        target_power,
        curve,
        from,
        to,
        output,
    } = arg.clone();
    let alternative = Alternative::from(alternative);

    let (power, required_sample_size) = match test {
        PowerTestArg::OneSampleT => (
            calculate_power_one_sample_t(effect_size, sample_size, alpha, alternative)?,
            calculate_sample_size_one_sample_t(effect_size, alpha, target_power, alternative)?,
        ),
        PowerTestArg::TwoSampleT => (
            calculate_power_two_sample_t(effect_size, sample_size, alpha, alternative)?,
            calculate_sample_size_two_sample_t(effect_size, alpha, target_power, alternative)?,
        ),
        PowerTestArg::Proportion => (
            calculate_power_proportion_test(p0, p1, sample_size, alpha, alternative)?,
            calculate_sample_size_proportion_test(p0, p1, alpha, target_power, alternative)?,
        ),
    };

    let curve = match (curve, from, to) {
        (Some(axis), Some(from), Some(to)) => {
            let params = PowerCurveParams {
                effect_size: match test {
                    PowerTestArg::Proportion => (p1 - p0).abs(),
                    PowerTestArg::OneSampleT | PowerTestArg::TwoSampleT => effect_size,
                },
                sample_size,
                alpha,
                alternative,
                p0,
            };
            let points = generate_power_function_data(test.into(), axis.into(), &params, (from, to));
            eprintln!("Computed {} power curve points", points.len());
            Some(points)
        }
        _ => None,
    };

    Output::save_json(
        &PowerAnalysis {
            power,
            required_sample_size,
            curve,
        },
        output,
    )
}
