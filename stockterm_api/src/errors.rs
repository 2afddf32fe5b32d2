//! Error types for the chart API client.

/// Errors that can occur when requesting chart data.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The data source rejected the request credentials (HTTP 401).
    #[error("Unauthorized")]
    Unauthorized,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The chart payload carried an error object instead of a result.
    #[error("{code}: {description}")]
    Api { code: String, description: String },
    /// The response body could not be deserialized.
    #[error("Failed to parse response: {0}")]
    Parse(String),
    /// The chart payload contained no result for the symbol.
    #[error("No chart data returned for {symbol}")]
    NoData { symbol: String },
}

impl Error {
    /// True when the failure is an authorization rejection from the data source.
    ///
    /// This is the only failure class the analysis pipeline recovers from.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Unauthorized => true,
            Self::HttpStatus { status, .. } => *status == 401,
            Self::Api { code, .. } => code.eq_ignore_ascii_case("unauthorized"),
            _ => false,
        }
    }
}
