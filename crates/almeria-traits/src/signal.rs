//! Signal trait for per-security raw signal values.
//!
//! This module defines the `Signal` trait, the core abstraction of the signal
//! library. A signal maps one security's bar series (and optionally the
//! benchmark series) to a single raw value for the latest bar.

use serde::{Deserialize, Serialize};

use crate::BarSeries;

/// Which end of a signal's scale is attractive.
///
/// Raw values and z-scores are reported as computed; the composite scorer
/// flips the sign of `LowerIsBetter` signals when weighting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Larger values rank higher.
    #[default]
    HigherIsBetter,
    /// Smaller values rank higher.
    LowerIsBetter,
}

impl Orientation {
    /// Multiplier applied to a normalized value before weighting.
    pub const fn sign(self) -> f64 {
        match self {
            Self::HigherIsBetter => 1.0,
            Self::LowerIsBetter => -1.0,
        }
    }
}

/// A stateless per-security signal.
///
/// Implementations must be thread-safe (`Send + Sync`) so the engine can
/// evaluate the universe in parallel.
///
/// # Missing values
///
/// A signal never fails. Anything that prevents a meaningful value (too
/// little history, a zero denominator, absent fields) yields `None`.
/// Callers should go through [`Signal::evaluate`], which applies the
/// lookback check and discards non-finite results, so every signal shares
/// the same missing-data contract.
///
/// # Example
///
/// ```
/// use almeria_traits::{Bar, BarSeries, Signal};
///
/// #[derive(Debug)]
/// struct LastClose;
///
/// impl Signal for LastClose {
///     fn name(&self) -> &str {
///         "last_close"
///     }
///
///     fn lookback(&self) -> usize {
///         1
///     }
///
///     fn compute(&self, series: &BarSeries, _benchmark: Option<&BarSeries>) -> Option<f64> {
///         series.last()?.close
///     }
/// }
///
/// let empty = BarSeries::new("INFY", Vec::new());
/// assert_eq!(LastClose.evaluate(&empty, None), None);
/// ```
pub trait Signal: Send + Sync {
    /// Returns the unique name of this signal.
    fn name(&self) -> &str;

    /// Minimum number of bars the security series must have.
    fn lookback(&self) -> usize;

    /// Minimum number of bars the benchmark must have, or 0 when the
    /// benchmark is not used.
    fn benchmark_lookback(&self) -> usize {
        0
    }

    /// Which direction of this signal is attractive.
    fn orientation(&self) -> Orientation {
        Orientation::HigherIsBetter
    }

    /// Computes the raw value for the latest bar of `series`.
    ///
    /// Implementations may assume `series.len() >= self.lookback()`.
    fn compute(&self, series: &BarSeries, benchmark: Option<&BarSeries>) -> Option<f64>;

    /// Computes the raw value under the uniform missing-data contract.
    fn evaluate(&self, series: &BarSeries, benchmark: Option<&BarSeries>) -> Option<f64> {
        if series.len() < self.lookback() {
            return None;
        }
        let needed = self.benchmark_lookback();
        if needed > 0 && benchmark.is_none_or(|b| b.len() < needed) {
            return None;
        }
        self.compute(series, benchmark).filter(|v| v.is_finite())
    }
}
