//! Statistical utility functions for signal processing.
//!
//! This module provides the small set of statistics shared by the signal
//! library and the cross-sectional normalizer: means, sample standard
//! deviations and z-score standardization over partially missing data.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Minimum threshold for standard deviation to avoid division by zero.
/// Values below this threshold are treated as zero variance.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Z-score standardization result containing computed statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardizeResult {
    /// Number of present values the statistics were computed from.
    pub sample_size: usize,
    /// The computed mean, if any value was present.
    pub mean: Option<f64>,
    /// The sample standard deviation (N-1 denominator), if at least two
    /// values were present.
    pub std: Option<f64>,
    /// Whether values were rescaled. `false` means zero dispersion and every
    /// present value was mapped to 0.
    pub applied: bool,
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (N-1 denominator), `None` for fewer than two
/// values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance =
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Standardize partially missing values to z-scores (mean=0, std=1).
///
/// Statistics are computed over the present values only; missing inputs stay
/// missing. If the sample standard deviation is below
/// [`MIN_STD_THRESHOLD`] (including a single present value) every present
/// value maps to 0.
///
/// # Examples
///
/// ```
/// use almeria_traits::stats::standardize;
///
/// let values = vec![Some(1.0), None, Some(3.0)];
/// let (z, result) = standardize(&values);
///
/// assert!(result.applied);
/// assert_eq!(result.sample_size, 2);
/// assert!(z[1].is_none());
/// assert!(z[0].unwrap() < 0.0 && z[2].unwrap() > 0.0);
/// ```
pub fn standardize(values: &[Option<f64>]) -> (Vec<Option<f64>>, StandardizeResult) {
    let present = Array1::from_iter(values.iter().flatten().copied());
    let (_, result) = standardize_array(&present);

    let standardized = values
        .iter()
        .map(|v| {
            v.map(|x| match (result.applied, result.mean, result.std) {
                (true, Some(mean), Some(std)) => (x - mean) / std,
                _ => 0.0,
            })
        })
        .collect();

    (standardized, result)
}

/// Standardize an ndarray Array1 to z-scores (mean=0, std=1).
///
/// Uses sample standard deviation (ddof=1). If the standard deviation is
/// below the minimum threshold, returns zeros.
///
/// # Examples
///
/// ```
/// use almeria_traits::stats::standardize_array;
/// use ndarray::Array1;
///
/// let scores = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// let (standardized, result) = standardize_array(&scores);
///
/// assert!(result.applied);
/// assert_eq!(standardized.len(), 5);
/// ```
pub fn standardize_array(scores: &Array1<f64>) -> (Array1<f64>, StandardizeResult) {
    let n = scores.len();
    let mean = scores.mean();
    let std = (n > 1).then(|| scores.std(1.0));
    let applied = std.is_some_and(|s| s > MIN_STD_THRESHOLD);

    let standardized = match (applied, mean, std) {
        (true, Some(mean), Some(std)) => (scores - mean) / std,
        _ => Array1::zeros(n),
    };

    (
        standardized,
        StandardizeResult {
            sample_size: n,
            mean,
            std,
            applied,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values).unwrap(), 5.0);
        assert_relative_eq!(sample_std(&values).unwrap(), 2.138_089_935_299_395, epsilon = 1e-12);
        assert!(mean(&[]).is_none());
        assert!(sample_std(&[1.0]).is_none());
    }

    #[test]
    fn test_standardize_basic() {
        let values: Vec<Option<f64>> = [1.0, 2.0, 3.0, 4.0, 5.0].map(Some).to_vec();
        let (standardized, result) = standardize(&values);

        assert!(result.applied);
        assert_relative_eq!(result.mean.unwrap(), 3.0);

        let z: Vec<f64> = standardized.iter().flatten().copied().collect();
        assert_relative_eq!(mean(&z).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(sample_std(&z).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_standardize_keeps_missing() {
        let values = vec![Some(1.0), None, Some(2.0), Some(3.0), None];
        let (standardized, result) = standardize(&values);

        assert_eq!(result.sample_size, 3);
        assert!(standardized[1].is_none());
        assert!(standardized[4].is_none());
        assert_relative_eq!(standardized[2].unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_standardize_constant_values() {
        let values = vec![Some(5.0); 4];
        let (standardized, result) = standardize(&values);

        assert!(!result.applied);
        assert!(standardized.iter().all(|v| *v == Some(0.0)));
    }

    #[test]
    fn test_standardize_single_value() {
        let (standardized, result) = standardize(&[Some(42.0)]);
        assert!(!result.applied);
        assert!(result.std.is_none());
        assert_eq!(standardized, vec![Some(0.0)]);
    }

    #[test]
    fn test_standardize_all_missing() {
        let (standardized, result) = standardize(&[None, None]);
        assert_eq!(result.sample_size, 0);
        assert!(result.mean.is_none());
        assert_eq!(standardized, vec![None, None]);
    }

    #[test]
    fn test_min_std_threshold() {
        let values: Vec<Option<f64>> = [1.0, 1.0 + 1e-12, 1.0 - 1e-12, 1.0 + 2e-12]
            .map(Some)
            .to_vec();
        let (standardized, result) = standardize(&values);

        assert!(!result.applied);
        assert!(standardized.iter().flatten().all(|x| x.abs() < 1e-10));
    }
}
