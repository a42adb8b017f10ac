//! Market regime filter derived from the benchmark.
//!
//! The regime is a coarse, universe-wide classification: every security
//! receives the same value on a given day. It is also reported on the
//! leaderboard so readers can see which market state the ranking was made in.

use std::fmt;

use almeria_traits::{BarSeries, Signal};
use serde::{Deserialize, Serialize};

use crate::math::{efficiency_ratio, tail};

/// Coarse market state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketRegime {
    /// Persistent upward move.
    TrendingUp,
    /// Persistent downward move.
    TrendingDown,
    /// Sideways chop with no directional efficiency.
    Ranging,
}

impl MarketRegime {
    /// Numeric value used as the signal: +1, -1 or 0.
    pub const fn value(self) -> f64 {
        match self {
            Self::TrendingUp => 1.0,
            Self::TrendingDown => -1.0,
            Self::Ranging => 0.0,
        }
    }

    /// Whether the market is trending in either direction.
    pub const fn is_trending(self) -> bool {
        !matches!(self, Self::Ranging)
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrendingUp => write!(f, "TRENDING UP"),
            Self::TrendingDown => write!(f, "TRENDING DOWN"),
            Self::Ranging => write!(f, "RANGING"),
        }
    }
}

/// Configuration for the regime filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeFilterConfig {
    /// Benchmark bars inspected (default: 20).
    pub window: usize,
    /// Minimum efficiency ratio to call the market trending (default: 0.3).
    pub trend_threshold: f64,
}

impl Default for RegimeFilterConfig {
    fn default() -> Self {
        Self {
            window: 20,
            trend_threshold: 0.3,
        }
    }
}

/// Classifies the benchmark's regime over the configured window.
///
/// Trend strength is the efficiency ratio of the benchmark closes: net move
/// over the total path travelled, so a volatile market needs a larger net
/// move to count as trending. `None` if the benchmark is shorter than the
/// window or completely flat.
pub fn classify_regime(benchmark: &BarSeries, config: &RegimeFilterConfig) -> Option<MarketRegime> {
    if benchmark.len() < config.window {
        return None;
    }
    let (efficiency, net) = efficiency_ratio(tail(benchmark.bars(), config.window))?;
    Some(if efficiency < config.trend_threshold {
        MarketRegime::Ranging
    } else if net > 0.0 {
        MarketRegime::TrendingUp
    } else {
        MarketRegime::TrendingDown
    })
}

/// Regime filter signal.
///
/// The benchmark regime as +1 (trending up), -1 (trending down) or 0
/// (ranging), applied identically to every security that has the standard
/// history.
#[derive(Debug, Clone, Default)]
pub struct RegimeFilter {
    config: RegimeFilterConfig,
}

impl RegimeFilter {
    /// Create a new regime filter with the given configuration.
    #[must_use]
    pub const fn new(config: RegimeFilterConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RegimeFilterConfig {
        &self.config
    }
}

impl Signal for RegimeFilter {
    fn name(&self) -> &str {
        "regime_filter"
    }

    fn lookback(&self) -> usize {
        self.config.window
    }

    fn benchmark_lookback(&self) -> usize {
        self.config.window
    }

    fn compute(&self, _series: &BarSeries, benchmark: Option<&BarSeries>) -> Option<f64> {
        classify_regime(benchmark?, &self.config).map(MarketRegime::value)
    }
}
