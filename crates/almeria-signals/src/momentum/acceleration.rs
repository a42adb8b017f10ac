//! Price acceleration: the change in momentum.

use almeria_traits::{BarSeries, Signal};
use serde::{Deserialize, Serialize};

use super::weighted::{MomentumConfig, weighted_momentum};

/// Configuration for the price acceleration signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAccelerationConfig {
    /// Momentum definition being differenced.
    pub momentum: MomentumConfig,
    /// Bars between the two momentum readings (default: 5).
    pub period: usize,
}

impl Default for PriceAccelerationConfig {
    fn default() -> Self {
        Self {
            momentum: MomentumConfig::default(),
            period: 5,
        }
    }
}

/// Price acceleration signal.
///
/// Momentum today minus momentum `period` bars ago. Positive values mean the
/// move is speeding up. Needs the momentum lookback plus one period of extra
/// history.
#[derive(Debug, Clone, Default)]
pub struct PriceAcceleration {
    config: PriceAccelerationConfig,
}

impl PriceAcceleration {
    /// Create a new price acceleration signal with the given configuration.
    #[must_use]
    pub const fn new(config: PriceAccelerationConfig) -> Self {
        Self { config }
    }

    /// Bars between the two momentum readings.
    #[must_use]
    pub const fn period(&self) -> usize {
        self.config.period
    }
}

impl Signal for PriceAcceleration {
    fn name(&self) -> &str {
        "price_acceleration"
    }

    fn lookback(&self) -> usize {
        self.config.momentum.window() + self.config.period
    }

    fn compute(&self, series: &BarSeries, _benchmark: Option<&BarSeries>) -> Option<f64> {
        let bars = series.bars();
        let earlier = bars.len().checked_sub(self.config.period)?;
        let now = weighted_momentum(bars, &self.config.momentum)?;
        let then = weighted_momentum(&bars[..earlier], &self.config.momentum)?;
        Some(now - then)
    }
}
