use std::path::PathBuf;

use statlab_stats::{
    hypothesis::perform_one_sample_t_test_with,
    tail::{ClosedFormTail, IncompleteBetaTail, TailProbability},
};

use crate::{config::AlternativeArg, data::read_sample, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TTestArg {
    /// CSV file with the sample in its first column
    file: PathBuf,
    /// Hypothesized population mean
    #[arg(long, default_value_t = 0.0)]
    mu0: f64,
    /// Significance level
    #[arg(long, default_value_t = 0.05)]
    alpha: f64,
    #[arg(long, value_enum, default_value_t)]
    alternative: AlternativeArg,
    /// Use exact t tails instead of the closed-form approximation
    #[arg(long)]
    exact: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Tail strategy selected by an `--exact` flag.
pub(crate) fn tail_strategy(exact: bool) -> &'static dyn TailProbability {
    if exact {
        &IncompleteBetaTail
    } else {
        &ClosedFormTail
    }
}

pub(crate) fn run(arg: &TTestArg) -> anyhow::Result<()> {
    let TTestArg {
        file,
        mu0,
        alpha,
        alternative,
        exact,
        output,
    } = arg;
    let sample = read_sample(file)?;
    let test = perform_one_sample_t_test_with(
        &sample,
        *mu0,
        *alpha,
        (*alternative).into(),
        tail_strategy(*exact),
    )?;
    eprintln!(
        "t = {:.4}, p = {:.4}: {}",
        test.statistic,
        test.p_value,
        if test.reject_null {
            "reject the null hypothesis"
        } else {
            "fail to reject the null hypothesis"
        }
    );
    Output::save_json(&test, output.clone())
}
