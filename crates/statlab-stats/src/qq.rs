use serde::Serialize;

use crate::{
    descriptive::sorted_copy,
    error::{Result, require_len},
    special::normal_quantile,
};

/// One point of a normal Q-Q plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QqPoint {
    pub sample_quantile: f64,
    pub theoretical_quantile: f64,
}

/// Pairs each order statistic with the standard normal quantile at plotting
/// position `(i + 0.5) / n`.
///
/// # Examples
///
/// ```
/// # use statlab_stats::qq::generate_qq_plot_data;
/// let points = generate_qq_plot_data(&[3.0, 1.0, 2.0]).unwrap();
/// assert_eq!(points[0].sample_quantile, 1.0);
/// assert!(points[1].theoretical_quantile.abs() < 1e-9);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn generate_qq_plot_data(data: &[f64]) -> Result<Vec<QqPoint>> {
    require_len(data, 1)?;
    let n = data.len() as f64;
    sorted_copy(data)
        .into_iter()
        .enumerate()
        .map(|(i, sample_quantile)| {
            Ok(QqPoint {
                sample_quantile,
                theoretical_quantile: normal_quantile((i as f64 + 0.5) / n)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_are_monotone_and_symmetric() {
        let data = [5.0, -1.0, 3.0, 8.0, 0.0, 2.0];
        let points = generate_qq_plot_data(&data).unwrap();
        assert_eq!(points.len(), data.len());
        assert!(points.windows(2).all(|w| w[0].sample_quantile <= w[1].sample_quantile));
        assert!(points.windows(2).all(|w| w[0].theoretical_quantile < w[1].theoretical_quantile));
        let first = points[0].theoretical_quantile;
        let last = points[points.len() - 1].theoretical_quantile;
        assert!((first + last).abs() < 1e-9);
    }

    #[test]
    fn test_single_value_sits_at_the_median() {
        let points = generate_qq_plot_data(&[7.0]).unwrap();
        assert!(points[0].theoretical_quantile.abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(generate_qq_plot_data(&[]).is_err());
    }
}
