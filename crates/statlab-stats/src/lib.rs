//! Statistical computations for teaching and exploratory analysis.
//!
//! Every entry point is a pure function from samples and scalar settings to
//! a plain, serializable result record. Failures are reported as
//! [`StatsError`] values instead of `NaN`s. The crate provides:
//!
//! - **Special functions**: normal, Student-t and chi-square quantile and CDF
//!   approximations, plus exact incomplete-beta tails
//! - **Descriptive statistics**: moments, median, mode, MAD, quartiles,
//!   percentiles and histograms
//! - **Estimation**: MLE and method-of-moments estimators
//! - **Confidence intervals**: one- and two-sample means, proportions,
//!   variances and a percentile bootstrap
//! - **Hypothesis tests**: t, F and z tests with a pluggable tail-probability
//!   strategy
//! - **Power analysis**: power, sample size and power curves
//! - **Diagnostics**: outliers, heteroscedasticity, robustness, goodness of
//!   fit and Q-Q plot data
//!
//! # Modules
//!
//! - [`special`]: special-function approximations
//! - [`descriptive`], [`percentiles`], [`histogram`], [`summary`]: describing a sample
//! - [`estimation`]: parameter estimators
//! - [`interval`], [`bootstrap`], [`overrides`]: confidence intervals
//! - [`hypothesis`], [`tail`]: hypothesis tests
//! - [`power`], [`power_curve`]: power and sample-size planning
//! - [`sampling`]: sampling distribution of the mean
//! - [`rohe`], [`goodness_of_fit`], [`qq`]: diagnostics
//! - [`generator`]: synthetic samples
//!
//! # Examples
//!
//! ## Describing a sample
//!
//! ```
//! use statlab_stats::descriptive::BasicStats;
//!
//! let stats = BasicStats::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.variance, 2.5);
//! ```
//!
//! ## Interval and test for the mean
//!
//! ```
//! use statlab_stats::{
//!     hypothesis::{Alternative, perform_one_sample_t_test},
//!     interval::calculate_confidence_interval,
//! };
//!
//! let data = [12.1, 11.8, 12.6, 12.0, 12.4, 11.9, 12.3];
//! let ci = calculate_confidence_interval(&data, 0.95, None).unwrap();
//! let test = perform_one_sample_t_test(&data, 12.0, 0.05, Alternative::TwoSided).unwrap();
//! assert!(ci.interval.contains(12.0));
//! assert!(!test.reject_null);
//! ```
//!
//! ## Errors instead of NaN
//!
//! ```
//! use statlab_stats::{StatsError, descriptive::BasicStats};
//!
//! let err = BasicStats::new(&[1.0]).unwrap_err();
//! assert_eq!(err, StatsError::InsufficientSamples { required: 2, actual: 1 });
//! ```

pub use self::error::{Result, StatsError};

pub mod bootstrap;
pub mod descriptive;
mod error;
pub mod estimation;
pub mod generator;
pub mod goodness_of_fit;
pub mod histogram;
pub mod hypothesis;
pub mod interval;
pub mod overrides;
pub mod percentiles;
pub mod power;
pub mod power_curve;
pub mod qq;
pub mod rohe;
pub mod sampling;
pub mod special;
pub mod summary;
pub mod tail;
