use clap::{Parser, Subcommand};

use self::{
    compare::CompareArg, describe::DescribeArg, diagnose::DiagnoseArg, generate::GenerateArg,
    interval::IntervalArg, power::PowerArg, proportion::ProportionArg, report::ReportArg,
    ttest::TTestArg, wilson::WilsonArg,
};

mod compare;
mod describe;
mod diagnose;
mod generate;
mod interval;
mod power;
mod proportion;
mod report;
mod ttest;
mod wilson;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Descriptive statistics and parameter estimates of a sample
    Describe(#[clap(flatten)] DescribeArg),
    /// Confidence interval for the mean or variance of a sample
    Interval(#[clap(flatten)] IntervalArg),
    /// Wilson score interval for a proportion
    Wilson(#[clap(flatten)] WilsonArg),
    /// One-sample t-test
    Ttest(#[clap(flatten)] TTestArg),
    /// Compare two samples (pooled, Welch or paired)
    Compare(#[clap(flatten)] CompareArg),
    /// One- or two-proportion z-test with its interval
    Proportion(#[clap(flatten)] ProportionArg),
    /// Power, required sample size and power curves
    Power(#[clap(flatten)] PowerArg),
    /// Outlier, heteroscedasticity and goodness-of-fit diagnostics
    Diagnose(#[clap(flatten)] DiagnoseArg),
    /// Generate a synthetic sample as CSV
    Generate(#[clap(flatten)] GenerateArg),
    /// Full analysis of one sample
    Report(#[clap(flatten)] ReportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Interval(arg) => interval::run(&arg)?,
        Mode::Wilson(arg) => wilson::run(&arg)?,
        Mode::Ttest(arg) => ttest::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Proportion(arg) => proportion::run(&arg)?,
        Mode::Power(arg) => power::run(&arg)?,
        Mode::Diagnose(arg) => diagnose::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition_is_consistent() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parses_alternative_spelling() {
        let args =
            CommandArgs::try_parse_from(["statlab", "ttest", "data.csv", "--alternative", "two-sided"])
                .unwrap();
        assert!(matches!(args.mode, Mode::Ttest(_)));
    }
}
