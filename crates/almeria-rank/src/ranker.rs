//! Ordering composite scores into a dense ranking.

use std::{cmp::Ordering, collections::BTreeMap};

use almeria_traits::{CompositeScore, SecurityId};
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;

/// A security on the ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based dense rank.
    pub rank: usize,
    /// Security identifier.
    pub security_id: SecurityId,
    /// Composite score.
    pub score: f64,
    /// Normalized value of every contributing signal.
    pub breakdown: BTreeMap<String, f64>,
    /// Number of contributing signals.
    pub signal_count: usize,
    /// Display statistics of the security's own series.
    pub diagnostics: Diagnostics,
}

/// A security that could not be scored for lack of signal coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnrankedEntry {
    /// Security identifier.
    pub security_id: SecurityId,
    /// Number of signals that were present.
    pub signal_count: usize,
    /// Normalized value of every present signal.
    pub breakdown: BTreeMap<String, f64>,
}

/// Output of [`Ranker::rank`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    /// Scored securities, best first.
    pub ranked: Vec<RankedEntry>,
    /// Securities without a score, by identifier.
    pub insufficient_data: Vec<UnrankedEntry>,
}

/// Orders composite scores.
///
/// Score descending, then contributing signal count descending, then
/// security identifier ascending. Unscored securities never enter the ranked
/// list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker;

impl Ranker {
    /// Creates a ranker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Ranks `scores`, attaching diagnostics to every ranked entry.
    pub fn rank(
        &self,
        scores: Vec<CompositeScore>,
        mut diagnostics: impl FnMut(&str) -> Diagnostics,
    ) -> Ranking {
        let (scored, unscored): (Vec<_>, Vec<_>) =
            scores.into_iter().partition(CompositeScore::is_scored);

        let mut scored: Vec<(f64, CompositeScore)> = scored
            .into_iter()
            .filter_map(|c| c.score.map(|s| (s, c)))
            .collect();
        scored.sort_by(|(a_score, a), (b_score, b)| compare(*a_score, a, *b_score, b));

        let ranked = scored
            .into_iter()
            .enumerate()
            .map(|(i, (score, composite))| RankedEntry {
                rank: i + 1,
                diagnostics: diagnostics(&composite.security_id),
                signal_count: composite.signal_count(),
                security_id: composite.security_id,
                score,
                breakdown: composite.contributing_signals,
            })
            .collect();

        let mut insufficient_data: Vec<UnrankedEntry> = unscored
            .into_iter()
            .map(|composite| UnrankedEntry {
                signal_count: composite.signal_count(),
                security_id: composite.security_id,
                breakdown: composite.contributing_signals,
            })
            .collect();
        insufficient_data.sort_by(|a, b| a.security_id.cmp(&b.security_id));

        Ranking {
            ranked,
            insufficient_data,
        }
    }
}

fn compare(a_score: f64, a: &CompositeScore, b_score: f64, b: &CompositeScore) -> Ordering {
    b_score
        .total_cmp(&a_score)
        .then_with(|| b.signal_count().cmp(&a.signal_count()))
        .then_with(|| a.security_id.cmp(&b.security_id))
}
