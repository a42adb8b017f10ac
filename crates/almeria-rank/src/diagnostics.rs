//! Descriptive statistics of a security's own series.
//!
//! These are shown next to the ranking and never feed into the score.

use almeria_signals::math::{daily_returns, pct_change, tail};
use almeria_traits::{BarSeries, stats};
use serde::{Deserialize, Serialize};

/// Bars averaged for volume and volatility.
const LOOKBACK: usize = 20;

/// Per-security display statistics, each missing when the series is too
/// short.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Latest close.
    pub last_close: Option<f64>,
    /// One-day change in percent.
    pub change_1d: Option<f64>,
    /// Change across the last five bars in percent.
    pub change_5d: Option<f64>,
    /// Mean traded volume over the last 20 bars.
    pub avg_volume: Option<f64>,
    /// Sample standard deviation of the last 20 daily returns, in percent.
    pub volatility_20d: Option<f64>,
}

impl Diagnostics {
    /// Computes the diagnostics of `series` as of its last bar.
    #[must_use]
    pub fn from_series(series: &BarSeries) -> Self {
        let bars = series.bars();

        let volumes: Vec<f64> = tail(bars, LOOKBACK)
            .iter()
            .filter_map(|bar| bar.traded_volume())
            .collect();

        let returns = daily_returns(tail(bars, LOOKBACK + 1));
        let volatility_20d = if returns.len() >= LOOKBACK {
            stats::sample_std(&returns).map(|s| s * 100.0)
        } else {
            None
        };

        Self {
            last_close: series.last().and_then(|bar| bar.close),
            change_1d: pct_change(bars, 2).map(|c| c * 100.0),
            change_5d: pct_change(bars, 5).map(|c| c * 100.0),
            avg_volume: stats::mean(&volumes),
            volatility_20d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use almeria_traits::Bar;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> BarSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Bar::new(start + chrono::Duration::days(i as i64), c, c, c, c, 1_000.0 + i as f64)
            })
            .collect();
        BarSeries::new("X", bars)
    }

    #[test]
    fn test_changes() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let d = Diagnostics::from_series(&series(&closes));

        assert_eq!(d.last_close, Some(124.0));
        assert_relative_eq!(d.change_1d.unwrap(), (124.0 / 123.0 - 1.0) * 100.0, epsilon = 1e-9);
        assert_relative_eq!(d.change_5d.unwrap(), (124.0 / 120.0 - 1.0) * 100.0, epsilon = 1e-9);
        // Volumes 1005..=1024
        assert_relative_eq!(d.avg_volume.unwrap(), 1_014.5, epsilon = 1e-9);
        assert!(d.volatility_20d.unwrap() > 0.0);
    }

    #[test]
    fn test_flat_series_has_zero_volatility() {
        let d = Diagnostics::from_series(&series(&[50.0; 30]));
        assert_relative_eq!(d.volatility_20d.unwrap(), 0.0);
        assert_relative_eq!(d.change_5d.unwrap(), 0.0);
    }

    #[test]
    fn test_short_series() {
        let d = Diagnostics::from_series(&series(&[10.0, 11.0, 12.0]));
        assert_eq!(d.last_close, Some(12.0));
        assert!(d.change_1d.is_some());
        assert!(d.change_5d.is_none());
        assert!(d.volatility_20d.is_none());
    }

    #[test]
    fn test_empty_series() {
        let d = Diagnostics::from_series(&BarSeries::new("X", Vec::new()));
        assert_eq!(d, Diagnostics::default());
    }
}
