//! Multi-horizon weighted momentum.

use almeria_traits::{Bar, BarSeries, Signal};
use serde::{Deserialize, Serialize};

use crate::math::pct_change;

/// Configuration for the momentum signal.
///
/// Price changes are measured over each horizon (in bars, inclusive of the
/// latest bar) and blended with the matching weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumConfig {
    /// Window lengths, shortest first (default: 5, 10, 20 bars).
    pub horizons: [usize; 3],
    /// Weight of each horizon (default: 0.5, 0.3, 0.2).
    pub weights: [f64; 3],
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            horizons: [5, 10, 20],
            weights: [0.5, 0.3, 0.2],
        }
    }
}

impl MomentumConfig {
    /// Scales the horizons to a longest window of `window` bars, keeping the
    /// default 1/4, 1/2, 1 proportions and weights.
    #[must_use]
    pub fn with_window(window: usize) -> Self {
        let window = window.max(2);
        Self {
            horizons: [(window / 4).max(2), (window / 2).max(2), window],
            ..Self::default()
        }
    }

    /// The longest horizon, which is also the lookback.
    #[must_use]
    pub fn window(&self) -> usize {
        self.horizons.iter().copied().max().unwrap_or(0)
    }
}

/// Weighted momentum of `bars` as of their last bar.
///
/// Returns `None` if any horizon is longer than the slice or lands on an
/// absent close.
pub fn weighted_momentum(bars: &[Bar], config: &MomentumConfig) -> Option<f64> {
    let mut total = 0.0;
    let mut weight_sum = 0.0;
    for (&horizon, &weight) in config.horizons.iter().zip(&config.weights) {
        total += weight * pct_change(bars, horizon)?;
        weight_sum += weight;
    }
    (weight_sum > 0.0).then(|| total / weight_sum)
}

/// Momentum signal.
///
/// Weighted average of percentage price change over three horizons. Positive
/// values indicate strong recent performance.
///
/// # Example
///
/// ```
/// use almeria_signals::momentum::Momentum;
/// use almeria_traits::Signal;
///
/// let signal = Momentum::default();
/// assert_eq!(signal.lookback(), 20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Momentum {
    config: MomentumConfig,
}

impl Momentum {
    /// Create a new momentum signal with the given configuration.
    #[must_use]
    pub const fn new(config: MomentumConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &MomentumConfig {
        &self.config
    }
}

impl Signal for Momentum {
    fn name(&self) -> &str {
        "momentum"
    }

    fn lookback(&self) -> usize {
        self.config.window()
    }

    fn compute(&self, series: &BarSeries, _benchmark: Option<&BarSeries>) -> Option<f64> {
        weighted_momentum(series.bars(), &self.config)
    }
}
