//! Volume signals.
//!
//! - Volume spike: today's volume relative to its trailing average
//! - Volume profile: whether volume concentrates on up days or down days

mod profile;
mod spike;

pub use profile::{VolumeProfile, VolumeProfileConfig};
pub use spike::{VolumeSpike, VolumeSpikeConfig};
