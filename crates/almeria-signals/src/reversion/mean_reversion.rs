//! Distance from the rolling mean in standard deviations.

use almeria_traits::{
    BarSeries, Orientation, Signal,
    stats::{MIN_STD_THRESHOLD, mean, sample_std},
};
use serde::{Deserialize, Serialize};

use crate::math::{present_closes, tail};

/// Configuration for the mean reversion signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanReversionConfig {
    /// Closes in the rolling window, including today (default: 20).
    pub window: usize,
}

impl Default for MeanReversionConfig {
    fn default() -> Self {
        Self { window: 20 }
    }
}

/// Mean reversion signal.
///
/// `(close - rolling mean) / rolling std` over the window. Deeply negative
/// readings are oversold and expected to revert upwards, so lower values
/// rank higher.
#[derive(Debug, Clone, Default)]
pub struct MeanReversion {
    config: MeanReversionConfig,
}

impl MeanReversion {
    /// Create a new mean reversion signal with the given configuration.
    #[must_use]
    pub const fn new(config: MeanReversionConfig) -> Self {
        Self { config }
    }
}

impl Signal for MeanReversion {
    fn name(&self) -> &str {
        "mean_reversion"
    }

    fn lookback(&self) -> usize {
        self.config.window
    }

    fn orientation(&self) -> Orientation {
        Orientation::LowerIsBetter
    }

    fn compute(&self, series: &BarSeries, _benchmark: Option<&BarSeries>) -> Option<f64> {
        let current = series.last()?.close?;
        let closes = present_closes(tail(series.bars(), self.config.window));
        let std = sample_std(&closes).filter(|s| *s > MIN_STD_THRESHOLD)?;
        Some((current - mean(&closes)?) / std)
    }
}
