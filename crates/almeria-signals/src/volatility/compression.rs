//! Volatility compression signal.

use almeria_traits::{BarSeries, Orientation, Signal, stats::sample_std};
use serde::{Deserialize, Serialize};

use crate::math::{daily_returns, ratio, tail};

/// Configuration for the volatility compression signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolCompressionConfig {
    /// Daily returns in the short window (default: 5).
    pub short_window: usize,
    /// Bars in the long window (default: 20).
    pub long_window: usize,
}

impl Default for VolCompressionConfig {
    fn default() -> Self {
        Self {
            short_window: 5,
            long_window: 20,
        }
    }
}

impl VolCompressionConfig {
    /// Long window of `window` bars with a short window a quarter as long.
    #[must_use]
    pub fn with_window(window: usize) -> Self {
        Self {
            short_window: (window / 4).max(3),
            long_window: window,
        }
    }
}

/// Volatility compression signal.
///
/// Realized volatility of the last few daily returns divided by realized
/// volatility over the long window. Values below 1 indicate a squeeze, which
/// often precedes a breakout, so lower values rank higher.
#[derive(Debug, Clone, Default)]
pub struct VolCompression {
    config: VolCompressionConfig,
}

impl VolCompression {
    /// Create a new volatility compression signal with the given configuration.
    #[must_use]
    pub const fn new(config: VolCompressionConfig) -> Self {
        Self { config }
    }
}

impl Signal for VolCompression {
    fn name(&self) -> &str {
        "vol_compression"
    }

    fn lookback(&self) -> usize {
        self.config.long_window.max(self.config.short_window + 1)
    }

    fn orientation(&self) -> Orientation {
        Orientation::LowerIsBetter
    }

    fn compute(&self, series: &BarSeries, _benchmark: Option<&BarSeries>) -> Option<f64> {
        let bars = series.bars();
        let short = sample_std(&daily_returns(tail(bars, self.config.short_window + 1)))?;
        let long = sample_std(&daily_returns(tail(bars, self.config.long_window)))?;
        ratio(short, long)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixtures::*;

    #[test]
    fn test_orientation() {
        assert_eq!(VolCompression::default().orientation(), Orientation::LowerIsBetter);
    }

    #[test]
    fn test_with_window() {
        let config = VolCompressionConfig::with_window(40);
        assert_eq!(config.short_window, 10);
        assert_eq!(config.long_window, 40);
    }

    #[test]
    fn test_quiet_tail_is_compressed() {
        // Wild swings, then five nearly flat days.
        let mut closes: Vec<f64> = (0..15)
            .map(|i| if i % 2 == 0 { 100.0 } else { 110.0 })
            .collect();
        let mut price = 100.0;
        for i in 0..5 {
            price += if i % 2 == 0 { 0.1 } else { -0.05 };
            closes.push(price);
        }
        let series = series_from_closes("X", &closes);
        let value = VolCompression::default().evaluate(&series, None).unwrap();
        assert!(value < 1.0);
    }

    #[test]
    fn test_loud_tail_is_expanded() {
        let mut closes = vec![100.0; 5];
        for i in 0..10 {
            closes.push(100.0 + 0.1 * i as f64);
        }
        for i in 0..5 {
            closes.push(if i % 2 == 0 { 95.0 } else { 106.0 });
        }
        let series = series_from_closes("X", &closes);
        let value = VolCompression::default().evaluate(&series, None).unwrap();
        assert!(value > 1.0);
    }

    #[test]
    fn test_flat_series_is_missing() {
        let series = series_from_closes("X", &[100.0; 20]);
        assert_eq!(VolCompression::default().evaluate(&series, None), None);
    }
}
