use std::path::PathBuf;

use serde::Serialize;
use statlab_stats::{
    goodness_of_fit::{GoodnessOfFitResult, perform_goodness_of_fit_test},
    qq::{QqPoint, generate_qq_plot_data},
    rohe::{RoheResult, perform_rohe_analysis},
};

use crate::{data::read_sample, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DiagnoseArg {
    /// CSV file with the sample in its first column
    file: PathBuf,
    /// Significance level of the heteroscedasticity test
    #[arg(long, default_value_t = 0.05)]
    alpha: f64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Diagnostics {
    pub rohe: RoheResult,
    pub goodness_of_fit: GoodnessOfFitResult,
    pub qq_plot: Vec<QqPoint>,
}

impl Diagnostics {
    pub(crate) fn new(sample: &[f64], alpha: f64) -> anyhow::Result<Self> {
        let rohe = perform_rohe_analysis(sample, alpha)?;
        let goodness_of_fit = perform_goodness_of_fit_test(sample)?;
        eprintln!(
            "{} outliers, robustness {}, best fit {}",
            rohe.outliers.count, rohe.robustness.interpretation, goodness_of_fit.best_fit
        );
        Ok(Self {
            rohe,
            goodness_of_fit,
            qq_plot: generate_qq_plot_data(sample)?,
        })
    }
}

pub(crate) fn run(arg: &DiagnoseArg) -> anyhow::Result<()> {
    let DiagnoseArg {
        file,
        alpha,
        output,
    } = arg;
    let sample = read_sample(file)?;
    let diagnostics = Diagnostics::new(&sample, *alpha)?;
    Output::save_json(&diagnostics, output.clone())
}
