use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use statlab_stats::{
    bootstrap::{BootstrapInterval, calculate_bootstrap_confidence_interval},
    hypothesis::{OneSampleTTest, perform_one_sample_t_test},
    interval::{MeanInterval, VarianceInterval, calculate_confidence_interval, calculate_variance_ci},
    sampling::{MeanBoundary, Tail, calculate_mean_boundary},
};

use super::{describe::Description, diagnose::Diagnostics};
use crate::{
    config::AnalysisConfig,
    data::read_sample,
    util::{Output, make_rng, read_json_file},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// CSV file with the sample in its first column
    file: PathBuf,
    /// JSON analysis configuration; defaults apply to missing fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct Report {
    generated_at: DateTime<Utc>,
    source: PathBuf,
    config: AnalysisConfig,
    description: Description,
    intervals: Intervals,
    mean_test: OneSampleTTest,
    /// Central range of the sampling distribution of the mean.
    mean_bounds: [MeanBoundary; 2],
    diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Serialize)]
struct Intervals {
    mean: MeanInterval,
    variance: VarianceInterval,
    bootstrap: BootstrapInterval,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg {
        file,
        config,
        output,
    } = arg;
    let config: AnalysisConfig = match config {
        Some(path) => read_json_file("analysis config", path)?,
        None => AnalysisConfig::default(),
    };
    let sample = read_sample(file)?;
    let AnalysisConfig {
        confidence_level: level,
        alpha,
        alternative,
        hypothesized_mean,
        bootstrap_resamples,
        seed,
    } = config;

    eprintln!("Describing sample...");
    let description = Description::new(&sample)?;

    eprintln!("Computing intervals...");
    let mut rng = make_rng(seed);
    let intervals = Intervals {
        mean: calculate_confidence_interval(&sample, level, None)?,
        variance: calculate_variance_ci(&sample, level)?,
        bootstrap: calculate_bootstrap_confidence_interval(
            &sample,
            level,
            bootstrap_resamples,
            &mut rng,
        )?,
    };

    eprintln!("Testing the mean...");
    let mean_test = perform_one_sample_t_test(&sample, hypothesized_mean, alpha, alternative)?;
    let tail_probability = (1.0 - level) / 2.0;
    let mean_bounds = [
        calculate_mean_boundary(&sample, tail_probability, Tail::Lower)?,
        calculate_mean_boundary(&sample, tail_probability, Tail::Upper)?,
    ];

    eprintln!("Running diagnostics...");
    let diagnostics = Diagnostics::new(&sample, alpha)?;

    let report = Report {
        generated_at: Utc::now(),
        source: file.clone(),
        config,
        description,
        intervals,
        mean_test,
        mean_bounds,
        diagnostics,
    };
    Output::save_json(&report, output.clone())
}
