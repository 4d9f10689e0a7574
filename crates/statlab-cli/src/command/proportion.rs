use std::path::PathBuf;

use anyhow::bail;
use serde::Serialize;
use statlab_stats::{
    hypothesis::{
        ProportionTest, TwoProportionTest, perform_proportion_test_with,
        perform_two_proportion_test_with,
    },
    interval::{
        TwoProportionInterval, WilsonInterval, calculate_two_proportion_ci,
        calculate_wilson_confidence_interval,
    },
};

use super::ttest::tail_strategy;
use crate::{config::AlternativeArg, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ProportionArg {
    /// Successes in the (first) group
    #[arg(long)]
    successes: u64,
    /// Trials in the (first) group
    #[arg(long)]
    total: u64,
    /// Hypothesized proportion for the one-sample test
    #[arg(long, default_value_t = 0.5)]
    p0: f64,
    /// Successes in the second group
    #[arg(long, requires = "total2")]
    successes2: Option<u64>,
    /// Trials in the second group
    #[arg(long, requires = "successes2")]
    total2: Option<u64>,
    /// Confidence level
    #[arg(long, default_value_t = 0.95)]
    level: f64,
    /// Significance level
    #[arg(long, default_value_t = 0.05)]
    alpha: f64,
    #[arg(long, value_enum, default_value_t)]
    alternative: AlternativeArg,
    /// Use the exact normal tail instead of the closed-form approximation
    #[arg(long)]
    exact: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "design", rename_all = "kebab-case")]
enum ProportionAnalysis {
    OneSample {
        test: ProportionTest,
        interval: WilsonInterval,
    },
    TwoSample {
        test: TwoProportionTest,
        interval: TwoProportionInterval,
    },
}

pub(crate) fn run(arg: &ProportionArg) -> anyhow::Result<()> {
    let ProportionArg {
        successes,
        total,
        p0,
        successes2,
        total2,
        level,
        alpha,
        alternative,
        exact,
        output,
    } = arg;
    let tail = tail_strategy(*exact);
    let alternative = (*alternative).into();

    let analysis = match (successes2, total2) {
        (Some(successes2), Some(total2)) => ProportionAnalysis::TwoSample {
            test: perform_two_proportion_test_with(
                *successes,
                *total,
                *successes2,
                *total2,
                *alpha,
                alternative,
                tail,
            )?,
            interval: calculate_two_proportion_ci(*successes, *total, *successes2, *total2, *level)?,
        },
        (None, None) => ProportionAnalysis::OneSample {
            test: perform_proportion_test_with(*successes, *total, *p0, *alpha, alternative, tail)?,
            interval: calculate_wilson_confidence_interval(*successes, *total, *level)?,
        },
        _ => bail!("--successes2 and --total2 must be given together"),
    };
    Output::save_json(&analysis, output.clone())
}
