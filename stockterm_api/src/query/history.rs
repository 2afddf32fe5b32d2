use chrono::{DateTime, NaiveDate, Utc};
use url::Url;

use super::common::{Query, QueryCommon};

/// Daily history between `period1` (inclusive, midnight UTC) and `period2`.
#[derive(Clone, Debug)]
pub struct HistoryQuery {
    pub common: QueryCommon,
    pub period1: NaiveDate,
    pub period2: Option<DateTime<Utc>>,
}

impl HistoryQuery {
    pub fn new(period1: NaiveDate) -> Self {
        Self {
            common: QueryCommon::default(),
            period1,
            period2: None,
        }
    }

    /// Sets the end of the range. Without it the range ends at the request time.
    pub fn with_period2(mut self, period2: DateTime<Utc>) -> Self {
        self.period2 = Some(period2);
        self
    }

    fn period1_timestamp(&self) -> i64 {
        self.period1
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default()
    }
}

impl Query for HistoryQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        url.query_pairs_mut()
            .append_pair("period1", &self.period1_timestamp().to_string());
        let period2 = self.period2.unwrap_or_else(Utc::now);
        url.query_pairs_mut()
            .append_pair("period2", &period2.timestamp().to_string());
        url
    }
}
