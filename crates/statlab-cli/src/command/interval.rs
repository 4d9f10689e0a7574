use std::path::PathBuf;

use serde::Serialize;
use statlab_stats::{
    bootstrap::{BootstrapInterval, DEFAULT_RESAMPLES, calculate_bootstrap_confidence_interval},
    interval::{
        Interval, MeanInterval, VarianceInterval, calculate_confidence_interval,
        calculate_variance_ci,
    },
};

use crate::{
    data::read_sample,
    util::{Output, make_rng},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum IntervalKind {
    #[default]
    Mean,
    Variance,
    Bootstrap,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct IntervalArg {
    /// CSV file with the sample in its first column
    file: PathBuf,
    /// Interval to compute: mean, variance or bootstrap
    #[arg(long, default_value = "mean")]
    kind: IntervalKind,
    /// Confidence level
    #[arg(long, default_value_t = 0.95)]
    level: f64,
    /// Known population variance (mean interval only)
    #[arg(long)]
    known_variance: Option<f64>,
    /// Number of bootstrap resamples
    #[arg(long, default_value_t = DEFAULT_RESAMPLES)]
    resamples: usize,
    /// Seed for the bootstrap generator
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum IntervalOutput {
    Mean(MeanInterval),
    Variance(VarianceInterval),
    Bootstrap(BootstrapInterval),
}

impl IntervalOutput {
    fn interval(&self) -> Interval {
        match self {
            Self::Mean(ci) => ci.interval,
            Self::Variance(ci) => ci.interval,
            Self::Bootstrap(ci) => ci.interval,
        }
    }
}

pub(crate) fn run(arg: &IntervalArg) -> anyhow::Result<()> {
    let IntervalArg {
        file,
        kind,
        level,
        known_variance,
        resamples,
        seed,
        output,
    } = arg;
    let sample = read_sample(file)?;
    let result = match kind {
        IntervalKind::Mean => {
            IntervalOutput::Mean(calculate_confidence_interval(&sample, *level, *known_variance)?)
        }
        IntervalKind::Variance => IntervalOutput::Variance(calculate_variance_ci(&sample, *level)?),
        IntervalKind::Bootstrap => {
            eprintln!("Drawing {resamples} bootstrap resamples...");
            let mut rng = make_rng(*seed);
            let interval =
                calculate_bootstrap_confidence_interval(&sample, *level, *resamples, &mut rng)?;
            for warning in &interval.warnings {
                eprintln!("Warning: {warning}");
            }
            IntervalOutput::Bootstrap(interval)
        }
    };
    let interval = result.interval();
    eprintln!(
        "[{:.4}, {:.4}] (width {:.4})",
        interval.lower,
        interval.upper,
        interval.width()
    );
    Output::save_json(&result, output.clone())
}
