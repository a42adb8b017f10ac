//! Cross-sectional normalization and composite scoring for almeria.
//!
//! This crate turns raw per-security signal values into composite scores in
//! two steps. The [`CrossSectionalNormalizer`] rescales each signal across
//! the universe to z-scores so that signals with different native units can
//! be compared. A [`Combiner`] then averages one security's z-scores, either
//! with a configured weight table or with equal weights.
//!
//! # Examples
//!
//! ```
//! use almeria_combine::{
//!     Combiner, CrossSectionalNormalizer, NormalizerConfig, SignalScore, WeightedAverageCombiner,
//!     WeightedConfig,
//! };
//!
//! let normalizer = CrossSectionalNormalizer::new(NormalizerConfig { min_sample: 3 });
//! let (z, _) = normalizer.normalize_values(&[Some(0.05), Some(0.01), Some(-0.02)]);
//!
//! let combiner = WeightedAverageCombiner::new(WeightedConfig {
//!     weights: [("momentum".to_string(), 1.2)].into(),
//!     min_signals: 1,
//! });
//! let composite = combiner.combine("TCS", &[SignalScore::new("momentum", z[0])]);
//! assert!(composite.score.unwrap() > 0.0);
//! ```

mod combiner;
mod equal_weight;
mod normalize;
mod weighted;

// Re-export main types
pub use combiner::{Combiner, SignalScore};
pub use equal_weight::{EqualWeightCombiner, EqualWeightConfig};
pub use normalize::{CrossSectionalNormalizer, NormalizationStats, NormalizerConfig};
pub use weighted::{WeightedAverageCombiner, WeightedConfig};
