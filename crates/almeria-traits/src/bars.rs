//! The bar series data contract.
//!
//! A [`BarSeries`] is the only input the signal library sees. It is supplied
//! by the data-fetch collaborator, owned by the caller, and read-only for the
//! duration of a scoring run.

use serde::{Deserialize, Serialize};

use crate::{AlmeriaError, Date, Result, SecurityId};

/// One trading day of open/high/low/close/volume.
///
/// Every numeric field may be absent for a day the provider has no value
/// for. Absence is `None`, never a sentinel such as `0.0` or `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading date.
    pub date: Date,
    /// Opening price.
    pub open: Option<f64>,
    /// Session high.
    pub high: Option<f64>,
    /// Session low.
    pub low: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
    /// Shares traded.
    pub volume: Option<f64>,
}

impl Bar {
    /// Creates a bar with every field present.
    pub const fn new(date: Date, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: Some(volume),
        }
    }

    /// Creates a bar for a date with no values at all.
    pub const fn empty(date: Date) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close: None,
            volume: None,
        }
    }

    /// Volume with zero-volume days treated as missing.
    pub fn traded_volume(&self) -> Option<f64> {
        self.volume.filter(|v| *v > 0.0)
    }

    /// Session high, falling back to the close when the high is absent.
    pub fn high_or_close(&self) -> Option<f64> {
        self.high.or(self.close)
    }

    /// Session low, falling back to the close when the low is absent.
    pub fn low_or_close(&self) -> Option<f64> {
        self.low.or(self.close)
    }

    fn fields(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ]
    }
}

/// Ordered daily bars for one security.
///
/// Construction does not check the contract; call [`BarSeries::validate`]
/// before computing signals. The engine rejects a series that fails it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    security_id: SecurityId,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Creates a series from bars in ascending date order.
    pub fn new(security_id: impl Into<SecurityId>, bars: Vec<Bar>) -> Self {
        Self {
            security_id: security_id.into(),
            bars,
        }
    }

    /// Returns the security identifier.
    pub fn security_id(&self) -> &str {
        &self.security_id
    }

    /// Returns the bars, oldest first.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series holds no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Date of the most recent bar.
    pub fn last_date(&self) -> Option<Date> {
        self.bars.last().map(|bar| bar.date)
    }

    /// Index of the bar on `date`, if the series has one.
    pub fn position(&self, date: Date) -> Option<usize> {
        self.bars.binary_search_by_key(&date, |bar| bar.date).ok()
    }

    /// The bar on `date`, if the series has one.
    pub fn on(&self, date: Date) -> Option<&Bar> {
        self.position(date).map(|i| &self.bars[i])
    }

    /// Checks the input contract.
    ///
    /// # Errors
    ///
    /// Returns [`AlmeriaError::MalformedInput`] if any present value is
    /// negative or non-finite, or if dates are not strictly increasing.
    pub fn validate(&self) -> Result<()> {
        for (i, bar) in self.bars.iter().enumerate() {
            for (field, value) in bar.fields() {
                if let Some(v) = value
                    && (!v.is_finite() || v < 0.0)
                {
                    return Err(AlmeriaError::malformed(
                        self.security_id.clone(),
                        format!("{field} is {v} on {}", bar.date),
                    ));
                }
            }
            if i > 0 && bar.date <= self.bars[i - 1].date {
                return Err(AlmeriaError::malformed(
                    self.security_id.clone(),
                    format!(
                        "date {} does not follow {}",
                        bar.date,
                        self.bars[i - 1].date
                    ),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> Date {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_traded_volume_treats_zero_as_missing() {
        let mut bar = Bar::new(day(1), 10.0, 11.0, 9.0, 10.5, 0.0);
        assert_eq!(bar.traded_volume(), None);
        bar.volume = Some(1_500.0);
        assert_eq!(bar.traded_volume(), Some(1_500.0));
    }

    #[test]
    fn test_high_low_fallback() {
        let mut bar = Bar::empty(day(1));
        bar.close = Some(42.0);
        assert_eq!(bar.high_or_close(), Some(42.0));
        assert_eq!(bar.low_or_close(), Some(42.0));
    }

    #[test]
    fn test_validate_accepts_well_formed_series() {
        let series = BarSeries::new(
            "TCS",
            vec![
                Bar::new(day(1), 10.0, 11.0, 9.0, 10.5, 100.0),
                Bar::empty(day(4)),
                Bar::new(day(5), 10.5, 12.0, 10.0, 11.0, 120.0),
            ],
        );
        assert!(series.validate().is_ok());
        assert_eq!(series.len(), 3);
        assert_eq!(series.last_date(), Some(day(5)));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let series = BarSeries::new("TCS", vec![Bar::new(day(1), 10.0, 11.0, -9.0, 10.5, 100.0)]);
        let err = series.validate().unwrap_err();
        assert!(matches!(err, AlmeriaError::MalformedInput { ref security, .. } if security == "TCS"));
    }

    #[test]
    fn test_validate_rejects_non_finite_volume() {
        let series = BarSeries::new(
            "TCS",
            vec![Bar::new(day(1), 10.0, 11.0, 9.0, 10.5, f64::NAN)],
        );
        assert!(series.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_and_unordered_dates() {
        let duplicate = BarSeries::new(
            "TCS",
            vec![
                Bar::new(day(2), 10.0, 11.0, 9.0, 10.5, 100.0),
                Bar::new(day(2), 10.0, 11.0, 9.0, 10.5, 100.0),
            ],
        );
        assert!(duplicate.validate().is_err());

        let unordered = BarSeries::new(
            "TCS",
            vec![
                Bar::new(day(3), 10.0, 11.0, 9.0, 10.5, 100.0),
                Bar::new(day(2), 10.0, 11.0, 9.0, 10.5, 100.0),
            ],
        );
        assert!(unordered.validate().is_err());
    }

    #[test]
    fn test_lookup_by_date() {
        let series = BarSeries::new(
            "NIFTY",
            vec![
                Bar::new(day(1), 1.0, 1.0, 1.0, 1.0, 1.0),
                Bar::new(day(4), 2.0, 2.0, 2.0, 2.0, 1.0),
                Bar::new(day(5), 3.0, 3.0, 3.0, 3.0, 1.0),
            ],
        );
        assert_eq!(series.position(day(4)), Some(1));
        assert_eq!(series.on(day(5)).and_then(|b| b.close), Some(3.0));
        assert!(series.on(day(2)).is_none());
    }
}
