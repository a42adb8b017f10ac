//! The output record set of a scoring run.

use std::collections::{BTreeMap, BTreeSet};

use almeria_combine::NormalizationStats;
use almeria_signals::MarketRegime;
use almeria_traits::{Date, Result, SecurityId};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ranker::{RankedEntry, Ranking, UnrankedEntry};

/// A series excluded from the run as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedSeries {
    /// Security identifier.
    pub security_id: SecurityId,
    /// Why the series was rejected.
    pub reason: String,
}

/// Ranked securities plus everything that was left out and why.
///
/// # Examples
///
/// ```
/// use almeria_rank::Leaderboard;
///
/// let board = Leaderboard::default();
/// assert!(board.top(10, 0.0).is_empty());
/// assert!(board.entry("TCS").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    /// Latest bar date across the scored universe.
    pub as_of: Option<Date>,
    /// Benchmark market regime on that date.
    pub regime: Option<MarketRegime>,
    /// Scored securities, best first.
    pub ranked: Vec<RankedEntry>,
    /// Securities with too few signals to score, by identifier.
    pub insufficient_data: Vec<UnrankedEntry>,
    /// Series rejected as malformed.
    pub rejected: Vec<RejectedSeries>,
    /// Normalization statistics per active signal.
    pub normalization: BTreeMap<String, NormalizationStats>,
}

impl Leaderboard {
    /// Assembles a leaderboard from a ranking.
    #[must_use]
    pub fn new(ranking: Ranking) -> Self {
        Self {
            ranked: ranking.ranked,
            insufficient_data: ranking.insufficient_data,
            ..Self::default()
        }
    }

    /// Sets the as-of date.
    #[must_use]
    pub const fn with_as_of(mut self, as_of: Option<Date>) -> Self {
        self.as_of = as_of;
        self
    }

    /// Sets the market regime.
    #[must_use]
    pub const fn with_regime(mut self, regime: Option<MarketRegime>) -> Self {
        self.regime = regime;
        self
    }

    /// Sets the rejected series.
    #[must_use]
    pub fn with_rejected(mut self, rejected: Vec<RejectedSeries>) -> Self {
        self.rejected = rejected;
        self
    }

    /// Sets the per-signal normalization statistics.
    #[must_use]
    pub fn with_normalization(mut self, normalization: BTreeMap<String, NormalizationStats>) -> Self {
        self.normalization = normalization;
        self
    }

    /// Number of ranked securities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Whether no security was ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// First `n` ranked entries scoring at least `min_score`.
    #[must_use]
    pub fn top(&self, n: usize, min_score: f64) -> Vec<&RankedEntry> {
        self.ranked
            .iter()
            .filter(|e| e.score >= min_score)
            .take(n)
            .collect()
    }

    /// Up to `n` ranked entries scoring at most `max_score`, lowest first.
    #[must_use]
    pub fn bottom(&self, n: usize, max_score: f64) -> Vec<&RankedEntry> {
        self.ranked
            .iter()
            .rev()
            .filter(|e| e.score <= max_score)
            .take(n)
            .collect()
    }

    /// Looks up a security's ranked entry.
    #[must_use]
    pub fn entry(&self, security_id: &str) -> Option<&RankedEntry> {
        self.ranked.iter().find(|e| e.security_id == security_id)
    }

    /// The ranked list as a DataFrame.
    ///
    /// Columns are `rank`, `security_id`, `score`, `signal_count`, then one
    /// column per signal (alphabetical) holding the breakdown z-score, null
    /// where the signal did not contribute.
    ///
    /// # Errors
    ///
    /// Returns an error if polars fails to assemble the frame.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let ranks: Vec<u32> = self.ranked.iter().map(|e| e.rank as u32).collect();
        let ids: Vec<&str> = self.ranked.iter().map(|e| e.security_id.as_str()).collect();
        let scores: Vec<f64> = self.ranked.iter().map(|e| e.score).collect();
        let counts: Vec<u32> = self.ranked.iter().map(|e| e.signal_count as u32).collect();

        let mut df = df! {
            "rank" => ranks,
            "security_id" => ids,
            "score" => scores,
            "signal_count" => counts,
        }?;

        let signals: BTreeSet<&str> = self
            .ranked
            .iter()
            .flat_map(|e| e.breakdown.keys().map(String::as_str))
            .collect();
        for signal in signals {
            let values: Vec<Option<f64>> = self
                .ranked
                .iter()
                .map(|e| e.breakdown.get(signal).copied())
                .collect();
            df.with_column(Series::new(signal.into(), values))?;
        }

        Ok(df)
    }

    /// Serializes the leaderboard as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a leaderboard from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid leaderboard.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;

    fn entry(rank: usize, id: &str, score: f64, breakdown: &[(&str, f64)]) -> RankedEntry {
        RankedEntry {
            rank,
            security_id: id.to_string(),
            score,
            breakdown: breakdown.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            signal_count: breakdown.len(),
            diagnostics: Diagnostics::default(),
        }
    }

    fn board() -> Leaderboard {
        Leaderboard::new(Ranking {
            ranked: vec![
                entry(1, "A", 0.8, &[("momentum", 1.1), ("volume_spike", 0.4)]),
                entry(2, "B", 0.3, &[("momentum", 0.2)]),
                entry(3, "C", -0.1, &[("volume_spike", -0.3)]),
                entry(4, "D", -0.6, &[("momentum", -1.0), ("volume_spike", -0.2)]),
            ],
            insufficient_data: vec![UnrankedEntry {
                security_id: "E".to_string(),
                signal_count: 1,
                breakdown: BTreeMap::new(),
            }],
        })
    }

    #[test]
    fn test_top() {
        let board = board();
        let top: Vec<&str> = board.top(10, 0.2).iter().map(|e| e.security_id.as_str()).collect();
        assert_eq!(top, vec!["A", "B"]);
        assert_eq!(board.top(1, f64::NEG_INFINITY).len(), 1);
    }

    #[test]
    fn test_bottom_lowest_first() {
        let board = board();
        let bottom: Vec<&str> = board
            .bottom(10, 0.0)
            .iter()
            .map(|e| e.security_id.as_str())
            .collect();
        assert_eq!(bottom, vec!["D", "C"]);
        assert_eq!(board.bottom(1, 0.0)[0].security_id, "D");
    }

    #[test]
    fn test_entry_lookup() {
        let board = board();
        assert_eq!(board.entry("C").map(|e| e.rank), Some(3));
        assert!(board.entry("E").is_none());
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn test_to_frame() {
        let df = board().to_frame().unwrap();
        assert_eq!(df.height(), 4);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["rank", "security_id", "score", "signal_count", "momentum", "volume_spike"]
        );

        let momentum = df
            .column("momentum")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .clone();
        assert_eq!(momentum.get(0), Some(1.1));
        assert_eq!(momentum.get(2), None);
    }

    #[test]
    fn test_json_field_names() {
        let board = board().with_regime(Some(MarketRegime::Ranging));
        let json = board.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let first = &value["ranked"][0];
        assert_eq!(first["rank"], 1);
        assert_eq!(first["security_id"], "A");
        assert!(first["breakdown"]["momentum"].is_number());
        assert_eq!(value["regime"], "ranging");

        assert_eq!(Leaderboard::from_json(&json).unwrap(), board);
    }
}
