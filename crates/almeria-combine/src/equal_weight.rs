//! Equal-weighted signal combination strategy.

use almeria_traits::CompositeScore;
use serde::{Deserialize, Serialize};

use crate::combiner::{Combiner, SignalScore, weighted_average};

/// Configuration for equal-weighted signal combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualWeightConfig {
    /// Minimum number of contributing signals for a score (default: 6).
    pub min_signals: usize,
}

impl Default for EqualWeightConfig {
    fn default() -> Self {
        Self { min_signals: 6 }
    }
}

/// Equal-weighted combiner that averages every present signal.
///
/// This is the simplest combination strategy: each present signal gets weight
/// 1, adjusted for its orientation. The caller decides which signals are
/// active by what it passes in.
///
/// # Examples
///
/// ```
/// use almeria_combine::{Combiner, EqualWeightCombiner, EqualWeightConfig, SignalScore};
///
/// let combiner = EqualWeightCombiner::new(EqualWeightConfig { min_signals: 2 });
/// let score = combiner.combine(
///     "WIPRO",
///     &[SignalScore::new("momentum", Some(1.0)), SignalScore::new("volume_spike", Some(0.0))],
/// );
/// assert_eq!(score.score, Some(0.5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EqualWeightCombiner {
    config: EqualWeightConfig,
}

impl EqualWeightCombiner {
    /// Create a new equal-weight combiner with the given configuration.
    #[must_use]
    pub const fn new(config: EqualWeightConfig) -> Self {
        Self { config }
    }
}

impl Combiner for EqualWeightCombiner {
    fn combine(&self, security_id: &str, signals: &[SignalScore]) -> CompositeScore {
        weighted_average(security_id, signals, |_| Some(1.0), self.config.min_signals)
    }

    fn name(&self) -> &str {
        "equal_weight"
    }
}
