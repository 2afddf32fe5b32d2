//! Market data abstraction consumed by the analyzer, and its Yahoo chart implementation.

use std::future::Future;

use chrono::NaiveDate;
use serde::Serialize;
use stockterm_api::types::ChartResult;
use stockterm_api::{Client, Error, HistoryQuery, Interval, Query, SnapshotQuery};

use crate::reduce::PricePoint;

/// Same-day price snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailySnapshot {
    pub current: f64,
    pub high: f64,
    pub low: f64,
}

/// Source of historical bars and same-day quotes.
///
/// `historical` must return bars in chronological order, most recent last.
pub trait MarketData {
    fn historical(
        &self,
        symbol: &str,
        period1: NaiveDate,
        interval: Interval,
    ) -> impl Future<Output = Result<Vec<PricePoint>, Error>> + Send;

    fn daily_quote(&self, symbol: &str)
        -> impl Future<Output = Result<DailySnapshot, Error>> + Send;
}

/// [`MarketData`] backed by the Yahoo v8 chart endpoint.
#[derive(Clone, Debug, Default)]
pub struct YahooSource {
    client: Client,
}

impl YahooSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl MarketData for YahooSource {
    async fn historical(
        &self,
        symbol: &str,
        period1: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<PricePoint>, Error> {
        tracing::debug!(symbol, %period1, %interval, "fetching history");
        let query = HistoryQuery::new(period1).with_interval(interval);
        let result = self.client.get_history(symbol, &query).await?;
        Ok(to_price_points(&result))
    }

    async fn daily_quote(&self, symbol: &str) -> Result<DailySnapshot, Error> {
        tracing::debug!(symbol, "fetching daily snapshot");
        let result = self
            .client
            .get_snapshot(symbol, &SnapshotQuery::default())
            .await?;
        to_snapshot(symbol, &result)
    }
}

fn to_price_points(result: &ChartResult) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = result
        .bars()
        .into_iter()
        .map(|bar| PricePoint {
            date: bar.timestamp,
            close: bar.close,
            high: bar.high,
            low: bar.low,
        })
        .collect();
    // The reducer takes the latest close from the final element.
    points.sort_by_key(|p| p.date);
    points
}

fn to_snapshot(symbol: &str, result: &ChartResult) -> Result<DailySnapshot, Error> {
    let meta = &result.meta;
    match (
        meta.regular_market_price,
        meta.regular_market_day_high,
        meta.regular_market_day_low,
    ) {
        (Some(current), Some(high), Some(low)) => Ok(DailySnapshot { current, high, low }),
        _ => Err(Error::NoData {
            symbol: symbol.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockterm_api::types::{ChartMeta, Indicators, QuoteIndicator};

    fn result(timestamp: Vec<i64>, close: Vec<Option<f64>>, meta_price: Option<f64>) -> ChartResult {
        let n = close.len();
        ChartResult {
            meta: ChartMeta {
                symbol: "AAPL".to_string(),
                currency: None,
                exchange_name: None,
                instrument_type: None,
                regular_market_price: meta_price,
                regular_market_day_high: Some(12.0),
                regular_market_day_low: Some(9.0),
                regular_market_time: None,
                chart_previous_close: None,
            },
            timestamp,
            indicators: Indicators {
                quote: vec![QuoteIndicator {
                    open: vec![None; n],
                    high: close.iter().map(|c| c.map(|v| v + 1.0)).collect(),
                    low: close.iter().map(|c| c.map(|v| v - 1.0)).collect(),
                    close,
                    volume: vec![None; n],
                }],
            },
        }
    }

    #[test]
    fn price_points_are_chronological() {
        let r = result(
            vec![1_700_172_800, 1_700_000_000, 1_700_086_400],
            vec![Some(3.0), Some(1.0), Some(2.0)],
            None,
        );
        let points = to_price_points(&r);
        let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
        assert_eq!(points[0].high, 2.0);
        assert_eq!(points[0].low, 0.0);
    }

    #[test]
    fn null_rows_dropped() {
        let r = result(vec![1_700_000_000, 1_700_086_400], vec![Some(1.0), None], None);
        assert_eq!(to_price_points(&r).len(), 1);
    }

    #[test]
    fn snapshot_from_meta() {
        let r = result(vec![], vec![], Some(10.5));
        let snap = to_snapshot("AAPL", &r).unwrap();
        assert_eq!(
            snap,
            DailySnapshot {
                current: 10.5,
                high: 12.0,
                low: 9.0
            }
        );
    }

    #[test]
    fn snapshot_missing_price_is_no_data() {
        let r = result(vec![], vec![], None);
        let err = to_snapshot("AAPL", &r).unwrap_err();
        assert!(matches!(err, Error::NoData { ref symbol } if symbol == "AAPL"));
    }
}
