//! Trend signals.
//!
//! - Trend quality: straightness of the recent price path
//! - Relative strength: excess return over the benchmark

mod quality;
mod relative_strength;

pub use quality::{TrendQuality, TrendQualityConfig};
pub use relative_strength::{RelativeStrength, RelativeStrengthConfig};
