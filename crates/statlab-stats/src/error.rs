/// Errors produced by the statistical routines.
///
/// Every fallible entry point of this crate returns [`Result`], so callers
/// never see `NaN` or infinities leaking out of a computation.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum StatsError {
    /// The sample is too small for the requested statistic.
    #[display("need at least {required} observations, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },
    /// Two paired inputs have different lengths.
    #[display("paired samples must have equal length ({left} vs {right})")]
    MismatchedLengths { left: usize, right: usize },
    /// A parameter that must be strictly positive is not.
    #[display("{name} must be positive, got {value}")]
    NonPositiveParameter { name: &'static str, value: f64 },
    /// A probability-like argument lies outside the open unit interval.
    #[display("{name} must lie strictly between 0 and 1, got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    /// The computation hit a zero denominator or a non-finite intermediate.
    #[display("numerically degenerate input: {context}")]
    NumericalDegeneracy { context: &'static str },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StatsError>;

pub(crate) fn require_len(data: &[f64], required: usize) -> Result<()> {
    if data.len() < required {
        return Err(StatsError::InsufficientSamples {
            required,
            actual: data.len(),
        });
    }
    Ok(())
}

pub(crate) fn require_probability(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidProbability { name, value })
    }
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(StatsError::NonPositiveParameter { name, value })
    }
}

pub(crate) fn degenerate(context: &'static str) -> StatsError {
    StatsError::NumericalDegeneracy { context }
}

pub(crate) fn require_finite(context: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::NumericalDegeneracy { context })
    }
}
