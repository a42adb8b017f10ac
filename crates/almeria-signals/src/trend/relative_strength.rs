//! Excess return over the benchmark.

use almeria_traits::{BarSeries, Signal};
use serde::{Deserialize, Serialize};

use crate::math::ratio;

/// Configuration for the relative strength signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeStrengthConfig {
    /// Bars in the comparison window, including today (default: 20).
    pub window: usize,
}

impl Default for RelativeStrengthConfig {
    fn default() -> Self {
        Self { window: 20 }
    }
}

/// Relative strength signal.
///
/// Security return over its last `window` bars minus the benchmark return
/// between the same two dates. The benchmark is looked up by date, so a
/// benchmark with a different trading calendar still compares like with
/// like; if either date is absent from the benchmark the value is missing.
#[derive(Debug, Clone, Default)]
pub struct RelativeStrength {
    config: RelativeStrengthConfig,
}

impl RelativeStrength {
    /// Create a new relative strength signal with the given configuration.
    #[must_use]
    pub const fn new(config: RelativeStrengthConfig) -> Self {
        Self { config }
    }
}

impl Signal for RelativeStrength {
    fn name(&self) -> &str {
        "relative_strength"
    }

    fn lookback(&self) -> usize {
        self.config.window
    }

    fn benchmark_lookback(&self) -> usize {
        self.config.window
    }

    fn compute(&self, series: &BarSeries, benchmark: Option<&BarSeries>) -> Option<f64> {
        let bars = series.bars();
        let start = bars.get(bars.len().checked_sub(self.config.window)?)?;
        let end = bars.last()?;
        let benchmark = benchmark?;

        let own = ratio(end.close?, start.close?)? - 1.0;
        let market = ratio(
            benchmark.on(end.date)?.close?,
            benchmark.on(start.date)?.close?,
        )? - 1.0;

        Some(own - market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixtures::*;
    use approx::assert_relative_eq;

    fn benchmark(n: usize, growth: f64) -> BarSeries {
        let closes: Vec<f64> = (0..n).map(|i| 1_000.0 * (1.0 + growth * i as f64)).collect();
        series_from_closes("NIFTY", &closes)
    }

    #[test]
    fn test_excess_return() {
        let series = series_from_closes("X", &rising(20));
        let bench = benchmark(20, 0.005);
        let value = RelativeStrength::default()
            .evaluate(&series, Some(&bench))
            .unwrap();
        let own = 119.0 / 100.0 - 1.0;
        let market = 1_000.0 * (1.0 + 0.005 * 19.0) / 1_000.0 - 1.0;
        assert_relative_eq!(value, own - market, epsilon = 1e-12);
    }

    #[test]
    fn test_matches_on_dates_not_positions() {
        // Benchmark has five extra older bars; dates still line up.
        let series = BarSeries::new("X", bars_from_closes(&rising(20)));
        let bench_closes: Vec<f64> = (0..25).map(|i| 1_000.0 + i as f64).collect();
        let bench_bars = bench_closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let mut bar = bars_from_closes(&[c])[0];
                bar.date = date(i) - chrono::Duration::days(5);
                bar
            })
            .collect();
        let bench = BarSeries::new("NIFTY", bench_bars);

        let value = RelativeStrength::default()
            .evaluate(&series, Some(&bench))
            .unwrap();
        let market = 1_024.0 / 1_005.0 - 1.0;
        assert_relative_eq!(value, 0.19 - market, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_benchmark_is_missing() {
        let series = series_from_closes("X", &rising(20));
        assert_eq!(RelativeStrength::default().evaluate(&series, None), None);
    }

    #[test]
    fn test_unaligned_benchmark_is_missing() {
        let series = series_from_closes("X", &rising(20));
        let mut bench = bars_from_closes(&rising(20));
        for bar in &mut bench {
            bar.date += chrono::Duration::days(100);
        }
        let bench = BarSeries::new("NIFTY", bench);
        assert_eq!(RelativeStrength::default().evaluate(&series, Some(&bench)), None);
    }

    #[test]
    fn test_short_benchmark_is_missing() {
        let series = series_from_closes("X", &rising(20));
        let bench = benchmark(19, 0.01);
        assert_eq!(RelativeStrength::default().evaluate(&series, Some(&bench)), None);
    }
}
