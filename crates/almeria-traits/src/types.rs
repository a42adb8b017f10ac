//! Common types used throughout the Almeria screener.
//!
//! This module defines the identifiers, the per-stage record types, and the
//! polars-backed [`MarketData`] container that splits a long-format price
//! frame into per-security [`BarSeries`].

use std::collections::{BTreeMap, HashMap};

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{AlmeriaError, Bar, BarSeries, Result};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A security identifier, typically a ticker such as "RELIANCE" or "AAPL".
pub type SecurityId = String;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Columns a long-format price frame must carry.
pub const REQUIRED_COLUMNS: [&str; 7] = ["symbol", "date", "open", "high", "low", "close", "volume"];

/// One raw signal value for one security on the scoring day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSignalValue {
    /// Security the value belongs to.
    pub security_id: SecurityId,
    /// Signal that produced it.
    pub signal_name: String,
    /// The value, or `None` when the signal could not be computed.
    pub value: Option<f64>,
}

/// A raw value rescaled onto the cross-sectional unit (z-score).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSignalValue {
    /// Security the value belongs to.
    pub security_id: SecurityId,
    /// Signal that produced it.
    pub signal_name: String,
    /// The z-score, or `None` when the raw value or the sample was missing.
    pub value: Option<f64>,
}

/// Composite score for one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Security the score belongs to.
    pub security_id: SecurityId,
    /// Weighted score, or `None` for insufficient coverage.
    pub score: Option<f64>,
    /// Normalized value of every signal that was present.
    pub contributing_signals: BTreeMap<String, f64>,
}

impl CompositeScore {
    /// Number of signals that contributed.
    pub fn signal_count(&self) -> usize {
        self.contributing_signals.len()
    }

    /// Whether the security received a score.
    pub const fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}

/// Container for market data.
///
/// `MarketData` wraps a long-format Polars DataFrame with one row per
/// security per day.
///
/// # Expected Schema
///
/// - `symbol`: Security identifier
/// - `date`: Trading date
/// - `open`, `high`, `low`, `close`: Price data
/// - `volume`: Trading volume (any numeric type)
///
/// Null cells become absent bar fields.
#[derive(Debug, Clone)]
pub struct MarketData {
    /// The underlying DataFrame containing market data.
    data: DataFrame,
}

impl MarketData {
    /// Creates a new `MarketData` instance from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Returns the number of rows in the market data.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the market data is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the column names in the market data.
    pub fn columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Checks if a column exists in the market data.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Splits the frame into one [`BarSeries`] per symbol.
    ///
    /// Series are returned in order of first appearance and bars keep their
    /// row order. Rows are deliberately not sorted so that out-of-order input
    /// is caught by [`BarSeries::validate`] instead of being repaired.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing or has the wrong
    /// type, or if a row has no symbol or no date.
    pub fn to_bar_series(&self) -> Result<Vec<BarSeries>> {
        for col in REQUIRED_COLUMNS {
            if !self.has_column(col) {
                return Err(AlmeriaError::MissingColumn(col.to_string()));
            }
        }

        let df = &self.data;
        let symbols = df.column("symbol")?.as_materialized_series().str()?;
        let dates: Vec<Option<i32>> = df
            .column("date")?
            .as_materialized_series()
            .date()?
            .into_iter()
            .collect();

        let open = float_column(df, "open")?;
        let high = float_column(df, "high")?;
        let low = float_column(df, "low")?;
        let close = float_column(df, "close")?;
        let volume = float_column(df, "volume")?;

        let mut order: Vec<(SecurityId, Vec<Bar>)> = Vec::new();
        let mut index: HashMap<SecurityId, usize> = HashMap::new();

        for (row, symbol) in symbols.into_iter().enumerate() {
            let symbol = symbol.ok_or_else(|| AlmeriaError::Other(format!("row {row} has no symbol")))?;
            let date = dates[row]
                .and_then(|d| Date::from_num_days_from_ce_opt(d + UNIX_EPOCH_DAYS_FROM_CE))
                .ok_or_else(|| AlmeriaError::malformed(symbol, format!("row {row} has no date")))?;

            let bar = Bar {
                date,
                open: open[row],
                high: high[row],
                low: low[row],
                close: close[row],
                volume: volume[row],
            };

            let slot = *index.entry(symbol.to_string()).or_insert_with(|| {
                order.push((symbol.to_string(), Vec::new()));
                order.len() - 1
            });
            order[slot].1.push(bar);
        }

        Ok(order
            .into_iter()
            .map(|(symbol, bars)| BarSeries::new(symbol, bars))
            .collect())
    }
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.as_materialized_series().f64()?.into_iter().collect())
}

impl From<DataFrame> for MarketData {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for MarketData {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}
