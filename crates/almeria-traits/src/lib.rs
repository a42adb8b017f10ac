#![doc(issue_tracker_base_url = "https://github.com/factordynamics/almeria/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core definitions for the Almeria equity screener.
//!
//! This crate provides the foundational abstractions shared by every stage of
//! the scoring pipeline: the bar series input contract, the [`Signal`] trait,
//! the records passed between stages, and the error type.

/// The version of the almeria-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod bars;
pub mod error;
pub mod signal;
pub mod stats;
pub mod types;

// Re-exports
pub use bars::{Bar, BarSeries};
pub use error::{AlmeriaError, Result};
pub use signal::{Orientation, Signal};
pub use types::{
    CompositeScore, Date, MarketData, NormalizedSignalValue, RawSignalValue, SecurityId,
};
