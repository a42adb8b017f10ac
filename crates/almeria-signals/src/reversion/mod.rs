//! Mean reversion and range-position signals.

mod mean_reversion;
mod support_resistance;

pub use mean_reversion::{MeanReversion, MeanReversionConfig};
pub use support_resistance::{SupportResistance, SupportResistanceConfig};
