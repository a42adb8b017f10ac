//! Ranking and leaderboard output for almeria.
//!
//! The [`Ranker`] orders composite scores into a dense ranking with
//! deterministic tie-breaks and sets unscored securities aside. The
//! [`Leaderboard`] is the serializable record set a run produces, with
//! query helpers for the top and bottom of the list and a polars export.

mod diagnostics;
mod leaderboard;
mod ranker;

pub use diagnostics::Diagnostics;
pub use leaderboard::{Leaderboard, RejectedSeries};
pub use ranker::{RankedEntry, Ranker, Ranking, UnrankedEntry};
