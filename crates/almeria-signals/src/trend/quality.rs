//! Trend quality (path efficiency).

use almeria_traits::{BarSeries, Signal};
use serde::{Deserialize, Serialize};

use crate::math::{efficiency_ratio, tail};

/// Configuration for the trend quality signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendQualityConfig {
    /// Bars in the window (default: 10).
    pub window: usize,
}

impl Default for TrendQualityConfig {
    fn default() -> Self {
        Self { window: 10 }
    }
}

/// Trend quality signal.
///
/// Net close movement over the window divided by the total absolute path,
/// in `[0, 1]`. A straight line scores 1; a choppy market that goes nowhere
/// scores near 0.
#[derive(Debug, Clone, Default)]
pub struct TrendQuality {
    config: TrendQualityConfig,
}

impl TrendQuality {
    /// Create a new trend quality signal with the given configuration.
    #[must_use]
    pub const fn new(config: TrendQualityConfig) -> Self {
        Self { config }
    }
}

impl Signal for TrendQuality {
    fn name(&self) -> &str {
        "trend_quality"
    }

    fn lookback(&self) -> usize {
        self.config.window
    }

    fn compute(&self, series: &BarSeries, _benchmark: Option<&BarSeries>) -> Option<f64> {
        efficiency_ratio(tail(series.bars(), self.config.window)).map(|(er, _)| er)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixtures::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_straight_line_is_one() {
        let series = series_from_closes("X", &rising(30));
        assert_relative_eq!(TrendQuality::default().evaluate(&series, None).unwrap(), 1.0);
    }

    #[test]
    fn test_only_window_counts() {
        // Choppy history followed by a clean ten-bar run.
        let mut closes = zigzag(20);
        closes.extend((1..=10).map(|i| 102.0 + i as f64));
        let series = series_from_closes("X", &closes);
        assert_relative_eq!(TrendQuality::default().evaluate(&series, None).unwrap(), 1.0);
    }

    #[test]
    fn test_choppy_is_low() {
        let series = series_from_closes("X", &zigzag(10));
        let value = TrendQuality::default().evaluate(&series, None).unwrap();
        assert!((0.0..0.2).contains(&value));
    }

    #[test]
    fn test_insufficient_history_is_missing() {
        let series = series_from_closes("X", &rising(8));
        assert_eq!(TrendQuality::default().evaluate(&series, None), None);
    }
}
