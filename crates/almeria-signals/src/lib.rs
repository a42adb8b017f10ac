//! Price and volume signal implementations for the almeria screener.
//!
//! Each signal turns one security's daily bar history (plus, for some, the
//! benchmark's) into a single raw value as of the last bar:
//! - Momentum: weighted multi-horizon price change and its acceleration
//! - Volume: volume spikes and up/down volume profile
//! - Volatility: volatility compression and ATR-scaled gaps
//! - Reversion: z-score from the rolling mean and position in the high/low band
//! - Trend: path efficiency and strength relative to the benchmark
//! - Regime: the benchmark's trending/ranging state
//!
//! Raw values are not comparable across signals; cross-sectional
//! normalization happens downstream.
//!
//! # Example
//!
//! ```
//! use almeria_signals::registry::{SignalRegistry, available_signals};
//!
//! let registry = SignalRegistry::with_defaults();
//! assert_eq!(registry.len(), available_signals().len());
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod math;
pub mod momentum;
pub mod regime;
pub mod registry;
pub mod reversion;
pub mod trend;
pub mod volatility;
pub mod volume;

// Re-export key types
pub use regime::{MarketRegime, RegimeFilterConfig, classify_regime};
pub use registry::{SignalCategory, SignalInfo, SignalRegistry};
