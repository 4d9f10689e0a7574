use serde::{Deserialize, Serialize};
use statlab_stats::{bootstrap::DEFAULT_RESAMPLES, hypothesis::Alternative};

/// Settings for the `report` command, loadable from a JSON file.
///
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub confidence_level: f64,
    pub alpha: f64,
    pub alternative: Alternative,
    pub hypothesized_mean: f64,
    pub bootstrap_resamples: usize,
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            alpha: 0.05,
            alternative: Alternative::TwoSided,
            hypothesized_mean: 0.0,
            bootstrap_resamples: DEFAULT_RESAMPLES,
            seed: None,
        }
    }
}

/// Command-line spelling of [`Alternative`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AlternativeArg {
    Less,
    Greater,
    #[default]
    TwoSided,
}

impl From<AlternativeArg> for Alternative {
    fn from(arg: AlternativeArg) -> Self {
        match arg {
            AlternativeArg::Less => Self::Less,
            AlternativeArg::Greater => Self::Greater,
            AlternativeArg::TwoSided => Self::TwoSided,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"alpha": 0.01, "alternative": "greater"}"#).unwrap();
        assert!((config.alpha - 0.01).abs() < f64::EPSILON);
        assert_eq!(config.alternative, Alternative::Greater);
        assert!((config.confidence_level - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.bootstrap_resamples, DEFAULT_RESAMPLES);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_two_sided_spelling() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"alternative": "two-sided", "seed": 7}"#).unwrap();
        assert_eq!(config.alternative, Alternative::TwoSided);
        assert_eq!(config.seed, Some(7));
        assert_eq!(Alternative::from(AlternativeArg::Less), Alternative::Less);
    }
}
