//! Volume spike signal.

use almeria_traits::{BarSeries, Signal, stats::mean};
use serde::{Deserialize, Serialize};

use crate::math::{ratio, tail};

/// Configuration for the volume spike signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSpikeConfig {
    /// Bars in the trailing average, including today (default: 20).
    pub window: usize,
}

impl Default for VolumeSpikeConfig {
    fn default() -> Self {
        Self { window: 20 }
    }
}

/// Volume spike signal.
///
/// Ratio of today's volume to the average volume over the trailing window,
/// reported as a magnitude: 1.0 is a normal day, 3.0 is three times normal.
/// Zero-volume days are missing rather than zero, so they neither drag the
/// average down nor produce a zero ratio.
#[derive(Debug, Clone, Default)]
pub struct VolumeSpike {
    config: VolumeSpikeConfig,
}

impl VolumeSpike {
    /// Create a new volume spike signal with the given configuration.
    #[must_use]
    pub const fn new(config: VolumeSpikeConfig) -> Self {
        Self { config }
    }
}

impl Signal for VolumeSpike {
    fn name(&self) -> &str {
        "volume_spike"
    }

    fn lookback(&self) -> usize {
        self.config.window
    }

    fn compute(&self, series: &BarSeries, _benchmark: Option<&BarSeries>) -> Option<f64> {
        let today = series.last()?.traded_volume()?;
        let volumes: Vec<f64> = tail(series.bars(), self.config.window)
            .iter()
            .filter_map(|bar| bar.traded_volume())
            .collect();
        ratio(today, mean(&volumes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixtures::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normal_day_is_one() {
        let series = series_from_closes("X", &rising(20));
        let value = VolumeSpike::default().evaluate(&series, None).unwrap();
        assert_relative_eq!(value, 1.0);
    }

    #[test]
    fn test_spike_magnitude() {
        let mut bars = bars_from_closes(&rising(20));
        bars[19].volume = Some(20_000.0);
        let series = BarSeries::new("X", bars);
        // 19 days of 1_000 plus one of 20_000 average to 1_950.
        let value = VolumeSpike::default().evaluate(&series, None).unwrap();
        assert_relative_eq!(value, 20_000.0 / 1_950.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_volume_days_are_skipped() {
        let mut bars = bars_from_closes(&rising(20));
        bars[3].volume = Some(0.0);
        bars[19].volume = Some(2_000.0);
        let series = BarSeries::new("X", bars);
        let value = VolumeSpike::default().evaluate(&series, None).unwrap();
        // 18 days of 1_000 and one of 2_000 over 19 present days.
        assert_relative_eq!(value, 2_000.0 / (20_000.0 / 19.0), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_volume_today_is_missing() {
        let mut bars = bars_from_closes(&rising(20));
        bars[19].volume = Some(0.0);
        let series = BarSeries::new("X", bars);
        assert_eq!(VolumeSpike::default().evaluate(&series, None), None);
    }

    #[test]
    fn test_insufficient_history_is_missing() {
        let series = series_from_closes("X", &rising(10));
        assert_eq!(VolumeSpike::default().evaluate(&series, None), None);
    }
}
