//! Momentum signals based on recent price changes.
//!
//! This module provides:
//! - Momentum: weighted blend of 5, 10 and 20-bar price changes, recent
//!   windows weighted highest
//! - Price acceleration: change in momentum over a short period
//!   (momentum of momentum)

mod acceleration;
mod weighted;

pub use acceleration::{PriceAcceleration, PriceAccelerationConfig};
pub use weighted::{Momentum, MomentumConfig, weighted_momentum};
