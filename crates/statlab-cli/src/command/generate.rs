use std::path::PathBuf;

use statlab_stats::generator::{DistributionSpec, SyntheticDistribution, generate_sample};

use crate::util::{Output, make_rng};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum DistributionKind {
    #[default]
    Normal,
    Uniform,
    Exponential,
    Poisson,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Distribution: normal, uniform, exponential or poisson
    #[arg(long, default_value = "normal")]
    distribution: DistributionKind,
    /// Number of values to draw
    #[arg(long, default_value_t = 100)]
    sample_size: usize,
    /// Mean of the normal distribution
    #[arg(long, default_value_t = 0.0)]
    mean: f64,
    /// Standard deviation of the normal distribution
    #[arg(long, default_value_t = 1.0)]
    std_dev: f64,
    /// Lower bound of the uniform distribution
    #[arg(long, default_value_t = 0.0)]
    min: f64,
    /// Upper bound of the uniform distribution
    #[arg(long, default_value_t = 1.0)]
    max: f64,
    /// Rate of the exponential distribution
    #[arg(long, default_value_t = 1.0)]
    lambda: f64,
    /// Mean of the Poisson distribution
    #[arg(long, default_value_t = 1.0)]
    rate: f64,
    /// Seed for reproducible samples
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl GenerateArg {
    fn spec(&self) -> DistributionSpec {
        let distribution = match self.distribution {
            DistributionKind::Normal => SyntheticDistribution::Normal {
                mean: self.mean,
                std_dev: self.std_dev,
            },
            DistributionKind::Uniform => SyntheticDistribution::Uniform {
                min: self.min,
                max: self.max,
            },
            DistributionKind::Exponential => SyntheticDistribution::Exponential {
                lambda: self.lambda,
            },
            DistributionKind::Poisson => SyntheticDistribution::Poisson { rate: self.rate },
        };
        DistributionSpec {
            distribution,
            sample_size: self.sample_size,
        }
    }
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let spec = arg.spec();
    eprintln!("Generating {} values from {:?}", spec.sample_size, spec.distribution);
    let mut rng = make_rng(arg.seed);
    let sample = generate_sample(&spec, &mut rng)?;
    let mut output = Output::from_output_path(arg.output.clone())?;
    output.write_csv_column("value", &sample)?;
    output.finish()
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::super::{CommandArgs, Mode};
    use super::*;

    fn parse(args: &[&str]) -> GenerateArg {
        let args = CommandArgs::try_parse_from(["statlab", "generate"].iter().chain(args)).unwrap();
        match args.mode {
            Mode::Generate(arg) => arg,
            mode => panic!("unexpected mode: {mode:?}"),
        }
    }

    #[test]
    fn test_exponential_uses_lambda() {
        let arg = parse(&["--distribution", "exponential", "--lambda", "2.5"]);
        assert_eq!(
            arg.spec().distribution,
            SyntheticDistribution::Exponential { lambda: 2.5 }
        );
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let arg = parse(&["--distribution", "uniform", "--sample-size", "20", "--seed", "3"]);
        let spec = arg.spec();
        let a = generate_sample(&spec, &mut make_rng(arg.seed)).unwrap();
        let b = generate_sample(&spec, &mut make_rng(arg.seed)).unwrap();
        assert_eq!(a.len(), 20);
        assert_eq!(a, b);
    }
}
