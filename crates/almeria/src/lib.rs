#![doc(issue_tracker_base_url = "https://github.com/factordynamics/almeria/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # almeria
//!
//! Daily cross-sectional stock screener.
//!
//! almeria scores a universe of securities once per trading day from their
//! price and volume history, normalizes each signal across the universe,
//! combines the normalized signals into a composite score, and ranks the
//! universe. This umbrella crate holds the engine and its configuration and
//! re-exports the sub-crates.
//!
//! ## Quick Start
//!
//! ```
//! use almeria::{BarSeries, Engine, EngineConfig};
//! use almeria::traits::Bar;
//! use chrono::{Duration, NaiveDate};
//!
//! # fn main() -> almeria::Result<()> {
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let series = |id: &str, drift: f64| {
//!     let bars = (0..30)
//!         .map(|i| {
//!             let close = 100.0 + drift * i as f64 + (i % 3) as f64;
//!             Bar::new(start + Duration::days(i), close, close + 1.0, close - 1.0, close, 1e5)
//!         })
//!         .collect();
//!     BarSeries::new(id, bars)
//! };
//!
//! let universe = vec![series("A", 0.5), series("B", 0.1), series("C", -0.2)];
//! let benchmark = series("NIFTY", 0.3);
//!
//! let config = EngineConfig { min_cross_sectional_sample: 3, ..EngineConfig::default() };
//! let board = Engine::new(config)?.run(&universe, Some(&benchmark))?;
//!
//! for entry in board.top(10, f64::NEG_INFINITY) {
//!     println!("{} {} {:.3}", entry.rank, entry.security_id, entry.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Bars, the [`Signal`] trait, errors and shared statistics
//! - [`signals`] - The signal library and registry
//! - [`combine`] - Cross-sectional normalization and composite scoring
//! - [`rank`] - Ranking and the [`Leaderboard`] output
//!
//! ## Architecture
//!
//! 1. **Signals** map one security's bars to a raw value
//! 2. **The normalizer** z-scores each signal across the universe
//! 3. **Combiners** average a security's z-scores into a composite score
//! 4. **The ranker** orders composite scores into the leaderboard

mod config;
mod engine;

pub use config::{CombineMethod, EngineConfig};
pub use engine::{Engine, split_benchmark};

/// Version information for the almeria crate.
///
/// This constant contains the current version of almeria as specified in Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Traits
// ============================================================================

/// Core trait definitions and data types.
pub mod traits {
    pub use almeria_traits::*;
}

// Re-export core traits at top level for convenience
pub use almeria_combine::Combiner;
pub use almeria_traits::Signal;

// Re-export error types
pub use almeria_traits::{AlmeriaError, Result};

// Re-export common types
pub use almeria_traits::{BarSeries, Date, MarketData, SecurityId};

// ============================================================================
// Signals
// ============================================================================

/// Signal implementations.
///
/// Eleven price and volume signals grouped by category:
///
/// - **Momentum**: weighted momentum, price acceleration
/// - **Volume**: volume spike, volume profile
/// - **Volatility**: volatility compression, gap pattern
/// - **Reversion**: mean reversion, support/resistance
/// - **Trend**: trend quality, relative strength
/// - **Regime**: benchmark regime filter
///
/// # Example
///
/// ```
/// use almeria::signals::momentum::Momentum;
/// use almeria::Signal;
///
/// assert_eq!(Momentum::default().name(), "momentum");
/// ```
pub mod signals {
    pub use almeria_signals::*;
}

// ============================================================================
// Scoring
// ============================================================================

/// Normalization and combination strategies.
///
/// ## Available Combiners
///
/// - **WeightedAverageCombiner**: weight table over present signals
/// - **EqualWeightCombiner**: simple average of present signals
pub mod combine {
    pub use almeria_combine::*;
}

// ============================================================================
// Ranking
// ============================================================================

/// Ranking and leaderboard output.
pub mod rank {
    pub use almeria_rank::*;
}

pub use almeria_rank::Leaderboard;
