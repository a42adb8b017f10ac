//! Position of the close inside the recent high/low band.

use almeria_traits::{BarSeries, Signal};
use serde::{Deserialize, Serialize};

use crate::math::{ratio, tail};

/// Configuration for the support/resistance signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceConfig {
    /// Bars in the band, including today (default: 20).
    pub window: usize,
}

impl Default for SupportResistanceConfig {
    fn default() -> Self {
        Self { window: 20 }
    }
}

/// Support/resistance signal.
///
/// `(close - lowest low) / (highest high - lowest low)` over the window,
/// clamped to `[0, 1]`. 0 sits on support, 1 presses against resistance.
/// Bars without a high or low fall back to their close.
#[derive(Debug, Clone, Default)]
pub struct SupportResistance {
    config: SupportResistanceConfig,
}

impl SupportResistance {
    /// Create a new support/resistance signal with the given configuration.
    #[must_use]
    pub const fn new(config: SupportResistanceConfig) -> Self {
        Self { config }
    }
}

impl Signal for SupportResistance {
    fn name(&self) -> &str {
        "support_resistance"
    }

    fn lookback(&self) -> usize {
        self.config.window
    }

    fn compute(&self, series: &BarSeries, _benchmark: Option<&BarSeries>) -> Option<f64> {
        let close = series.last()?.close?;
        let window = tail(series.bars(), self.config.window);

        let high = window
            .iter()
            .filter_map(|bar| bar.high_or_close())
            .reduce(f64::max)?;
        let low = window
            .iter()
            .filter_map(|bar| bar.low_or_close())
            .reduce(f64::min)?;

        ratio(close - low, high - low).map(|p| p.clamp(0.0, 1.0))
    }
}
