//! Up-volume versus down-volume balance.

use almeria_traits::{BarSeries, Signal};
use serde::{Deserialize, Serialize};

use crate::math::{ratio, tail};

/// Configuration for the volume profile signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfileConfig {
    /// Bars in the window (default: 10).
    pub window: usize,
}

impl Default for VolumeProfileConfig {
    fn default() -> Self {
        Self { window: 10 }
    }
}

/// Volume profile signal.
///
/// `(up-day volume - down-day volume) / total volume` over the window, in
/// `[-1, 1]`. A day is up or down relative to the previous close; unchanged
/// days add to the total only. Positive values suggest accumulation,
/// negative values distribution.
#[derive(Debug, Clone, Default)]
pub struct VolumeProfile {
    config: VolumeProfileConfig,
}

impl VolumeProfile {
    /// Create a new volume profile signal with the given configuration.
    #[must_use]
    pub const fn new(config: VolumeProfileConfig) -> Self {
        Self { config }
    }
}

impl Signal for VolumeProfile {
    fn name(&self) -> &str {
        "volume_profile"
    }

    fn lookback(&self) -> usize {
        self.config.window
    }

    fn compute(&self, series: &BarSeries, _benchmark: Option<&BarSeries>) -> Option<f64> {
        let mut up = 0.0;
        let mut down = 0.0;
        let mut total = 0.0;

        for pair in tail(series.bars(), self.config.window).windows(2) {
            let (Some(prev), Some(close), Some(volume)) =
                (pair[0].close, pair[1].close, pair[1].traded_volume())
            else {
                continue;
            };
            total += volume;
            if close > prev {
                up += volume;
            } else if close < prev {
                down += volume;
            }
        }

        ratio(up - down, total)
    }
}
