//! Cross-sectional normalization of one signal across the universe.

use almeria_traits::{NormalizedSignalValue, RawSignalValue, stats};
use serde::{Deserialize, Serialize};

/// Configuration for the cross-sectional normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Minimum number of present raw values needed to normalize a signal
    /// (default: 5).
    pub min_sample: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self { min_sample: 5 }
    }
}

/// Statistics of one normalized signal column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationStats {
    /// Number of present raw values.
    pub sample_size: usize,
    /// Cross-sectional mean, when the sample was large enough.
    pub mean: Option<f64>,
    /// Cross-sectional sample standard deviation, when the sample was large
    /// enough.
    pub std: Option<f64>,
    /// `false` when the sample was too small (every value missing) or had no
    /// dispersion (every present value 0).
    pub applied: bool,
}

impl NormalizationStats {
    const fn insufficient(sample_size: usize) -> Self {
        Self {
            sample_size,
            mean: None,
            std: None,
            applied: false,
        }
    }
}

impl From<stats::StandardizeResult> for NormalizationStats {
    fn from(result: stats::StandardizeResult) -> Self {
        Self {
            sample_size: result.sample_size,
            mean: result.mean,
            std: result.std,
            applied: result.applied,
        }
    }
}

/// Rescales one signal's raw values onto a common unit (z-score) so that
/// signals with different native scales can be combined.
///
/// # Examples
///
/// ```
/// use almeria_combine::{CrossSectionalNormalizer, NormalizerConfig};
///
/// let normalizer = CrossSectionalNormalizer::new(NormalizerConfig { min_sample: 3 });
/// let (z, stats) = normalizer.normalize_values(&[Some(1.0), Some(2.0), None, Some(3.0)]);
///
/// assert!(stats.applied);
/// assert_eq!(z[1], Some(0.0));
/// assert_eq!(z[2], None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrossSectionalNormalizer {
    config: NormalizerConfig,
}

impl CrossSectionalNormalizer {
    /// Create a new normalizer with the given configuration.
    #[must_use]
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalizes a column of raw values, preserving order.
    ///
    /// Missing values stay missing. With fewer than `min_sample` present
    /// values every output is missing. A column without dispersion maps every
    /// present value to 0.
    #[must_use]
    pub fn normalize_values(
        &self,
        values: &[Option<f64>],
    ) -> (Vec<Option<f64>>, NormalizationStats) {
        let present = values.iter().flatten().count();
        if present < self.config.min_sample {
            return (vec![None; values.len()], NormalizationStats::insufficient(present));
        }

        let (standardized, result) = stats::standardize(values);
        (standardized, result.into())
    }

    /// Normalizes the raw values of a single signal.
    ///
    /// All inputs are expected to carry the same `signal_name`; the output
    /// keeps each record's identity and order.
    #[must_use]
    pub fn normalize(
        &self,
        raw: &[RawSignalValue],
    ) -> (Vec<NormalizedSignalValue>, NormalizationStats) {
        let values: Vec<Option<f64>> = raw.iter().map(|r| r.value).collect();
        let (standardized, stats) = self.normalize_values(&values);

        let normalized = raw
            .iter()
            .zip(standardized)
            .map(|(r, value)| NormalizedSignalValue {
                security_id: r.security_id.clone(),
                signal_name: r.signal_name.clone(),
                value,
            })
            .collect();

        (normalized, stats)
    }
}
