//! Weight-table signal combination strategy.

use std::collections::BTreeMap;

use almeria_traits::CompositeScore;
use serde::{Deserialize, Serialize};

use crate::combiner::{Combiner, SignalScore, weighted_average};

/// Configuration for weighted-average combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedConfig {
    /// Weight per signal name. Weights need not sum to 1; signals absent from
    /// the table or weighted 0 do not contribute.
    pub weights: BTreeMap<String, f64>,

    /// Minimum number of contributing signals for a score (default: 6).
    pub min_signals: usize,
}

impl Default for WeightedConfig {
    fn default() -> Self {
        Self {
            weights: BTreeMap::new(),
            min_signals: 6,
        }
    }
}

/// Combiner that averages normalized signals with a configured weight table.
///
/// The divisor is the sum of the weights of the signals actually present, so
/// a missing signal does not drag the score towards zero.
///
/// # Examples
///
/// ```
/// use almeria_combine::{Combiner, SignalScore, WeightedAverageCombiner, WeightedConfig};
///
/// let config = WeightedConfig {
///     weights: [("momentum".to_string(), 3.0), ("trend_quality".to_string(), 1.0)].into(),
///     min_signals: 1,
/// };
/// let combiner = WeightedAverageCombiner::new(config);
///
/// let score = combiner.combine(
///     "INFY",
///     &[SignalScore::new("momentum", Some(1.0)), SignalScore::new("trend_quality", None)],
/// );
/// assert_eq!(score.score, Some(1.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct WeightedAverageCombiner {
    config: WeightedConfig,
}

impl WeightedAverageCombiner {
    /// Create a new weighted combiner with the given configuration.
    #[must_use]
    pub const fn new(config: WeightedConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &WeightedConfig {
        &self.config
    }
}

impl Combiner for WeightedAverageCombiner {
    fn combine(&self, security_id: &str, signals: &[SignalScore]) -> CompositeScore {
        weighted_average(
            security_id,
            signals,
            |name| self.config.weights.get(name).copied(),
            self.config.min_signals,
        )
    }

    fn name(&self) -> &str {
        "weighted"
    }
}
