use url::Url;

use super::common::{Query, QueryCommon};

/// Same-day quote request. Uses a relative `range` instead of explicit periods.
#[derive(Clone, Debug)]
pub struct SnapshotQuery {
    pub common: QueryCommon,
    pub range: String,
}

impl Default for SnapshotQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon::default(),
            range: "1d".to_string(),
        }
    }
}

impl SnapshotQuery {
    pub fn with_range(mut self, range: &str) -> Self {
        self.range = range.to_string();
        self
    }
}

impl Query for SnapshotQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        url.query_pairs_mut().append_pair("range", &self.range);
        url
    }
}
