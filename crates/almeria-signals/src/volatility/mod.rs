//! Volatility signals.
//!
//! - Volatility compression: short-window over long-window realized volatility
//! - Gap pattern: overnight gap scaled by average true range

mod compression;
mod gap;

pub use compression::{VolCompression, VolCompressionConfig};
pub use gap::{GapPattern, GapPatternConfig};
