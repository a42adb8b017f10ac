//! Opening gap scaled by average true range.

use almeria_traits::{BarSeries, Signal, stats::mean};
use serde::{Deserialize, Serialize};

use crate::math::{ratio, true_range};

/// Configuration for the gap pattern signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapPatternConfig {
    /// Bars in the average true range, ending yesterday (default: 14).
    pub atr_window: usize,
}

impl Default for GapPatternConfig {
    fn default() -> Self {
        Self { atr_window: 14 }
    }
}

/// Gap pattern signal.
///
/// `(today's open - yesterday's close) / ATR`, where the ATR covers the bars
/// before today so the gap itself does not inflate it. Large positive
/// values are gap-ups on institutional buying; large negative values are
/// gap-downs.
#[derive(Debug, Clone, Default)]
pub struct GapPattern {
    config: GapPatternConfig,
}

impl GapPattern {
    /// Create a new gap pattern signal with the given configuration.
    #[must_use]
    pub const fn new(config: GapPatternConfig) -> Self {
        Self { config }
    }
}

impl Signal for GapPattern {
    fn name(&self) -> &str {
        "gap_pattern"
    }

    // Today, yesterday, and one more bar so the oldest ATR bar has a prior close.
    fn lookback(&self) -> usize {
        self.config.atr_window + 2
    }

    fn compute(&self, series: &BarSeries, _benchmark: Option<&BarSeries>) -> Option<f64> {
        let bars = series.bars();
        let n = bars.len();
        let today = bars.last()?;
        let yesterday = &bars[n.checked_sub(2)?];
        let gap = today.open? - yesterday.close?;

        let start = n.checked_sub(1 + self.config.atr_window)?.max(1);
        let ranges: Vec<f64> = (start..n - 1)
            .filter_map(|i| true_range(bars[i - 1].close, &bars[i]))
            .collect();

        ratio(gap, mean(&ranges)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixtures::*;
    use almeria_traits::Bar;
    use approx::assert_relative_eq;

    fn flat_bars(n: usize) -> Vec<Bar> {
        // Every bar trades 99..101 around a close of 100.
        (0..n)
            .map(|i| Bar::new(date(i), 100.0, 101.0, 99.0, 100.0, 1_000.0))
            .collect()
    }

    #[test]
    fn test_lookback() {
        assert_eq!(GapPattern::default().lookback(), 16);
    }

    #[test]
    fn test_gap_up_in_atr_units() {
        let mut bars = flat_bars(16);
        bars[15] = Bar::new(date(15), 104.0, 105.0, 103.5, 104.5, 1_000.0);
        let series = BarSeries::new("X", bars);
        // ATR over the 14 bars before today is 2.0.
        assert_relative_eq!(
            GapPattern::default().evaluate(&series, None).unwrap(),
            2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_gap_down_is_negative() {
        let mut bars = flat_bars(16);
        bars[15] = Bar::new(date(15), 97.0, 98.0, 96.0, 97.5, 1_000.0);
        let series = BarSeries::new("X", bars);
        assert_relative_eq!(
            GapPattern::default().evaluate(&series, None).unwrap(),
            -1.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_missing_open_is_missing() {
        let mut bars = flat_bars(16);
        bars[15].open = None;
        let series = BarSeries::new("X", bars);
        assert_eq!(GapPattern::default().evaluate(&series, None), None);
    }

    #[test]
    fn test_zero_range_is_missing() {
        let bars = (0..16)
            .map(|i| Bar::new(date(i), 100.0, 100.0, 100.0, 100.0, 1_000.0))
            .collect();
        let series = BarSeries::new("X", bars);
        assert_eq!(GapPattern::default().evaluate(&series, None), None);
    }

    #[test]
    fn test_insufficient_history_is_missing() {
        let series = series_from_closes("X", &rising(15));
        assert_eq!(GapPattern::default().evaluate(&series, None), None);
    }
}
