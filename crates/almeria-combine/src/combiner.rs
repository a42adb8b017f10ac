//! Core trait definition for composite scorers.

use std::collections::BTreeMap;

use almeria_traits::{CompositeScore, Orientation};

/// One normalized signal value for one security, ready for combination.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalScore {
    /// Signal name, matched against the weight table.
    pub name: String,

    /// Cross-sectional z-score, `None` when missing.
    pub value: Option<f64>,

    /// Direction in which the signal is attractive.
    pub orientation: Orientation,
}

impl SignalScore {
    /// Creates a score for a higher-is-better signal.
    pub fn new(name: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            name: name.into(),
            value,
            orientation: Orientation::HigherIsBetter,
        }
    }

    /// Sets the orientation.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Combines a security's normalized signals into one composite score.
///
/// Implementors decide how signals are weighted. All implementations must be
/// thread-safe (Send + Sync) so securities can be scored in parallel.
///
/// # Examples
///
/// ```
/// use almeria_combine::{Combiner, SignalScore};
/// use almeria_traits::CompositeScore;
///
/// struct FirstSignal;
///
/// impl Combiner for FirstSignal {
///     fn combine(&self, security_id: &str, signals: &[SignalScore]) -> CompositeScore {
///         let first = signals.iter().find_map(|s| s.value.map(|v| (s.name.clone(), v)));
///         CompositeScore {
///             security_id: security_id.to_string(),
///             score: first.as_ref().map(|(_, v)| *v),
///             contributing_signals: first.into_iter().collect(),
///         }
///     }
///
///     fn name(&self) -> &str {
///         "first_signal"
///     }
/// }
///
/// let score = FirstSignal.combine("TCS", &[SignalScore::new("momentum", Some(0.4))]);
/// assert_eq!(score.score, Some(0.4));
/// ```
pub trait Combiner: Send + Sync {
    /// Combine one security's signals into a composite score.
    ///
    /// The score is `None` when coverage is insufficient; this is an outcome,
    /// not an error.
    fn combine(&self, security_id: &str, signals: &[SignalScore]) -> CompositeScore;

    /// Name of this combination strategy.
    fn name(&self) -> &str;
}

/// Weighted average of the present signals.
///
/// `weight_of` returns the weight of a signal, or `None` (or a non-positive
/// weight) to ignore it. Each contribution is multiplied by the signal's
/// orientation sign while the breakdown keeps the plain z-score. The score is
/// missing with fewer than `min_signals` contributors or a zero divisor.
pub(crate) fn weighted_average(
    security_id: &str,
    signals: &[SignalScore],
    weight_of: impl Fn(&str) -> Option<f64>,
    min_signals: usize,
) -> CompositeScore {
    let mut contributing = BTreeMap::new();
    let mut total = 0.0;
    let mut weight_sum = 0.0;

    for signal in signals {
        let (Some(value), Some(weight)) = (signal.value, weight_of(&signal.name)) else {
            continue;
        };
        if weight <= 0.0 || !value.is_finite() {
            continue;
        }
        total += weight * signal.orientation.sign() * value;
        weight_sum += weight;
        contributing.insert(signal.name.clone(), value);
    }

    let score = (contributing.len() >= min_signals && weight_sum > 0.0)
        .then(|| total / weight_sum)
        .filter(|s| s.is_finite());

    CompositeScore {
        security_id: security_id.to_string(),
        score,
        contributing_signals: contributing,
    }
}
