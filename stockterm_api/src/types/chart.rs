//! Wire types for the `/v8/finance/chart/{symbol}` endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Bar open times in unix seconds. Absent when the range holds no bars.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    pub currency: Option<String>,
    pub exchange_name: Option<String>,
    pub instrument_type: Option<String>,
    pub regular_market_price: Option<f64>,
    pub regular_market_day_high: Option<f64>,
    pub regular_market_day_low: Option<f64>,
    pub regular_market_time: Option<i64>,
    pub chart_previous_close: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
}

/// Column-oriented OHLCV arrays. Entries are null for halted or missing sessions.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct QuoteIndicator {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

/// One fully populated daily bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: Option<f64>,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl ChartResult {
    /// Zips the timestamp column with the first quote indicator, in response order.
    ///
    /// Rows missing a high, low, or close value are skipped.
    pub fn bars(&self) -> Vec<Bar> {
        let Some(quote) = self.indicators.quote.first() else {
            return Vec::new();
        };
        self.timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                let high = quote.high.get(i).copied().flatten()?;
                let low = quote.low.get(i).copied().flatten()?;
                let close = quote.close.get(i).copied().flatten()?;
                let timestamp = DateTime::from_timestamp(ts, 0)?;
                Some(Bar {
                    timestamp,
                    open: quote.open.get(i).copied().flatten(),
                    high,
                    low,
                    close,
                    volume: quote.volume.get(i).copied().flatten(),
                })
            })
            .collect()
    }
}
