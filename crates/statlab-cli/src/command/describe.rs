use std::path::PathBuf;

use serde::Serialize;
use statlab_stats::{
    estimation::{
        DistributionFits, EstimationResult, GammaEstimate, calculate_gamma_mom, calculate_mle,
        calculate_mle_for_distributions, calculate_mom,
    },
    summary::SampleSummary,
};

use crate::{data::read_sample, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    /// CSV file with the sample in its first column
    file: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Description {
    pub summary: SampleSummary,
    pub mle: EstimationResult,
    pub mom: EstimationResult,
    pub distribution_fits: DistributionFits,
    /// `None` when the mean or variance is not positive.
    pub gamma_mom: Option<GammaEstimate>,
}

impl Description {
    pub(crate) fn new(sample: &[f64]) -> anyhow::Result<Self> {
        let summary = SampleSummary::new(sample)?;
        let gamma_mom = match calculate_gamma_mom(summary.stats.mean, summary.stats.variance) {
            Ok(gamma) => Some(gamma),
            Err(e) => {
                eprintln!("Skipping gamma estimate: {e}");
                None
            }
        };
        Ok(Self {
            mle: calculate_mle(sample)?,
            mom: calculate_mom(sample)?,
            distribution_fits: calculate_mle_for_distributions(sample)?,
            gamma_mom,
            summary,
        })
    }
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let DescribeArg { file, output } = arg;
    let sample = read_sample(file)?;
    let description = Description::new(&sample)?;
    Output::save_json(&description, output.clone())
}
