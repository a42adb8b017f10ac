//! Series arithmetic shared by the signals.
//!
//! Every helper works on a plain `&[Bar]` slice so that a signal can be
//! evaluated "as of" an earlier bar by slicing, which is how
//! price acceleration compares momentum today with momentum a few bars ago.
//! Absent fields are skipped or make the result `None`; nothing here panics
//! on short input.

use almeria_traits::{Bar, stats::MIN_STD_THRESHOLD};

/// The last `n` bars, or all of them if there are fewer.
pub fn tail(bars: &[Bar], n: usize) -> &[Bar] {
    &bars[bars.len().saturating_sub(n)..]
}

/// Present closing prices, oldest first.
pub fn present_closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().filter_map(|bar| bar.close).collect()
}

/// Percentage change of the close across a window of `span` bars:
/// `close[last] / close[last - span + 1] - 1`.
///
/// `None` when the window does not fit, either close is absent, or the base
/// close is zero.
pub fn pct_change(bars: &[Bar], span: usize) -> Option<f64> {
    if span == 0 || bars.len() < span {
        return None;
    }
    let current = bars.last()?.close?;
    let base = bars[bars.len() - span].close?;
    ratio(current, base).map(|r| r - 1.0)
}

/// Simple daily returns between consecutive bars whose closes are both
/// present and whose earlier close is positive.
pub fn daily_returns(bars: &[Bar]) -> Vec<f64> {
    bars.windows(2)
        .filter_map(|pair| match (pair[0].close, pair[1].close) {
            (Some(prev), Some(cur)) => ratio(cur, prev).map(|r| r - 1.0),
            _ => None,
        })
        .collect()
}

/// True range of `bar` given the previous close.
///
/// Without a previous close this degrades to the high-low range.
pub fn true_range(prev_close: Option<f64>, bar: &Bar) -> Option<f64> {
    let high = bar.high_or_close()?;
    let low = bar.low_or_close()?;
    let range = high - low;
    Some(match prev_close {
        Some(pc) => range.max((high - pc).abs()).max((low - pc).abs()),
        None => range,
    })
}

/// Net close movement divided by total absolute path, in `[0, 1]`.
///
/// Returns the signed net move alongside the ratio so callers can tell the
/// direction of a straight path. `None` for fewer than two present closes or
/// a flat path.
pub fn efficiency_ratio(bars: &[Bar]) -> Option<(f64, f64)> {
    let closes = present_closes(bars);
    if closes.len() < 2 {
        return None;
    }
    let net = closes[closes.len() - 1] - closes[0];
    let path: f64 = closes.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    if path <= MIN_STD_THRESHOLD {
        return None;
    }
    Some((net.abs() / path, net))
}

/// `numerator / denominator`, `None` when the denominator is not positive.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator > MIN_STD_THRESHOLD).then(|| numerator / denominator)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use almeria_traits::{Bar, BarSeries, Date};
    use chrono::{Duration, NaiveDate};

    pub(crate) fn date(i: usize) -> Date {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(i as i64)
    }

    /// Bars with the given closes; open equals the previous close, the range
    /// is one percent either side and volume is constant.
    pub(crate) fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let open = if i == 0 { c } else { closes[i - 1] };
                Bar::new(date(i), open, c.max(open) * 1.01, c.min(open) * 0.99, c, 1_000.0)
            })
            .collect()
    }

    pub(crate) fn series_from_closes(id: &str, closes: &[f64]) -> BarSeries {
        BarSeries::new(id, bars_from_closes(closes))
    }

    /// A gently rising series of `n` closes starting at 100.
    pub(crate) fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    /// A zig-zag series of `n` closes around 100.
    pub(crate) fn zigzag(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| if i % 2 == 0 { 100.0 } else { 102.0 })
            .collect()
    }
}
