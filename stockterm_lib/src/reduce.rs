//! Historical reducer: filters a price series to a trailing window and
//! summarizes it as average/high/low/close.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::precision::round_sig;

/// One daily bar as consumed by the reducer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: DateTime<Utc>,
    pub close: f64,
    pub high: f64,
    pub low: f64,
}

/// Summary of the points inside one window. Always fully populated; an empty
/// window is represented by `None` from [`reduce`], never by a partial value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reduction {
    pub average: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Reduces the points of `series` that lie within `window_ms` of `now`.
///
/// A point is kept when `now - point.date <= window_ms` (closed interval).
/// `average` is the mean close, `high`/`low` are the extremes of the high and
/// low fields, and `close` is the close of the last kept point in input order,
/// so the series must be chronological with the most recent bar last.
/// Every field is rounded to `precision` significant digits.
///
/// Returns `None` when no point falls in the window.
pub fn reduce(
    series: &[PricePoint],
    window_ms: i64,
    now: DateTime<Utc>,
    precision: u32,
) -> Option<Reduction> {
    let now_ms = now.timestamp_millis();
    let kept: Vec<&PricePoint> = series
        .iter()
        .filter(|p| now_ms - p.date.timestamp_millis() <= window_ms)
        .collect();

    let last = kept.last()?;

    let total_close: f64 = kept.iter().map(|p| p.close).sum();
    let high = kept.iter().map(|p| p.high).fold(f64::NEG_INFINITY, f64::max);
    let low = kept.iter().map(|p| p.low).fold(f64::INFINITY, f64::min);

    Some(Reduction {
        average: round_sig(total_close / kept.len() as f64, precision),
        high: round_sig(high, precision),
        low: round_sig(low, precision),
        close: round_sig(last.close, precision),
    })
}
