use std::path::PathBuf;

use serde::Serialize;
use statlab_stats::{
    hypothesis::{
        PairedTTest, TwoSampleTTest, VarianceFTest, perform_paired_t_test_with,
        perform_two_sample_t_test_with, perform_variance_f_test_with,
    },
    interval::{
        PairedMeanInterval, TwoSampleMeanInterval, calculate_paired_mean_ci,
        calculate_two_sample_mean_ci,
    },
};

use super::ttest::tail_strategy;
use crate::{config::AlternativeArg, data::read_sample, util::Output};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum Design {
    Pooled,
    #[default]
    Welch,
    Paired,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    /// CSV file with the first sample
    file_a: PathBuf,
    /// CSV file with the second sample
    file_b: PathBuf,
    /// Test design: pooled, welch or paired
    #[arg(long, default_value = "welch")]
    design: Design,
    /// Confidence level of the difference interval
    #[arg(long, default_value_t = 0.95)]
    level: f64,
    /// Significance level
    #[arg(long, default_value_t = 0.05)]
    alpha: f64,
    #[arg(long, value_enum, default_value_t)]
    alternative: AlternativeArg,
    /// Use exact t and F tails instead of the closed-form approximations
    #[arg(long)]
    exact: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "design", rename_all = "kebab-case")]
enum Comparison {
    Independent {
        test: TwoSampleTTest,
        interval: TwoSampleMeanInterval,
        variance_test: VarianceFTest,
    },
    Paired {
        test: PairedTTest,
        interval: PairedMeanInterval,
    },
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let CompareArg {
        file_a,
        file_b,
        design,
        level,
        alpha,
        alternative,
        exact,
        output,
    } = arg;
    let a = read_sample(file_a)?;
    let b = read_sample(file_b)?;
    let tail = tail_strategy(*exact);
    let alternative = (*alternative).into();

    let comparison = match design {
        Design::Pooled | Design::Welch => {
            let equal_variance = *design == Design::Pooled;
            let variance_test = perform_variance_f_test_with(&a, &b, *alpha, tail)?;
            if equal_variance && variance_test.reject_null {
                eprintln!(
                    "Warning: variances differ (F = {:.3}, p = {:.4}); consider --design welch",
                    variance_test.statistic, variance_test.p_value
                );
            }
            Comparison::Independent {
                test: perform_two_sample_t_test_with(
                    &a,
                    &b,
                    *alpha,
                    alternative,
                    equal_variance,
                    tail,
                )?,
                interval: calculate_two_sample_mean_ci(&a, &b, *level, equal_variance)?,
                variance_test,
            }
        }
        Design::Paired => Comparison::Paired {
            test: perform_paired_t_test_with(&a, &b, *alpha, alternative, tail)?,
            interval: calculate_paired_mean_ci(&a, &b, *level)?,
        },
    };
    Output::save_json(&comparison, output.clone())
}
