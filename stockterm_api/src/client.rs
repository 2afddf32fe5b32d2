//! HTTP client for the Yahoo Finance chart API.

use std::time::Duration;

use url::Url;

use crate::{
    query::{HistoryQuery, Query, SnapshotQuery},
    types::{ChartResponse, ChartResult},
    user_agent::get_user_agent,
    Error,
};

/// HTTP client for the Yahoo Finance v8 chart endpoint.
///
/// Sends requests with a randomized browser user agent. Each request builds
/// a fresh `reqwest::Client` with a 30-second timeout.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the API. Defaults to `https://query1.finance.yahoo.com`.
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production Yahoo Finance host.
    pub fn new() -> Self {
        Self {
            base_api_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_url(&self, symbol: &str, query: &impl Query) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", self.base_api_url);
                Error::RequestFailed
            })?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        Ok(query.add_to_url(&url))
    }

    async fn get_chart<Q: Query>(&self, symbol: &str, query: &Q) -> Result<ChartResult, Error> {
        let url = self.get_url(symbol, query)?;
        tracing::debug!("GET {}", url);
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        // Yahoo reports unknown symbols as 404 with a chart.error payload.
        let parsed = serde_json::from_str::<ChartResponse>(&body);

        if !status.is_success() {
            if let Ok(ChartResponse { chart }) = parsed {
                if let Some(err) = chart.error {
                    return Err(Error::Api {
                        code: err.code,
                        description: err.description,
                    });
                }
            }
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = parsed.map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Parse(e.to_string())
        })?;

        if let Some(err) = parsed.chart.error {
            return Err(Error::Api {
                code: err.code,
                description: err.description,
            });
        }

        parsed
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| Error::NoData {
                symbol: symbol.to_string(),
            })
    }

    /// Fetches daily bars for `symbol` over the query's period range.
    pub async fn get_history(
        &self,
        symbol: &str,
        query: &HistoryQuery,
    ) -> Result<ChartResult, Error> {
        self.get_chart(symbol, query).await
    }

    /// Fetches the same-day quote for `symbol`. The price fields live in `meta`.
    pub async fn get_snapshot(
        &self,
        symbol: &str,
        query: &SnapshotQuery,
    ) -> Result<ChartResult, Error> {
        self.get_chart(symbol, query).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
