use std::path::PathBuf;

use statlab_stats::interval::calculate_wilson_confidence_interval;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct WilsonArg {
    /// Number of successes
    successes: u64,
    /// Number of trials
    total: u64,
    /// Confidence level
    #[arg(long, default_value_t = 0.95)]
    level: f64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &WilsonArg) -> anyhow::Result<()> {
    let WilsonArg {
        successes,
        total,
        level,
        output,
    } = arg;
    let interval = calculate_wilson_confidence_interval(*successes, *total, *level)?;
    Output::save_json(&interval, output.clone())
}
