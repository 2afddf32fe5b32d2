//! Error types for the library layer.

use std::fmt;

use crate::stock_list::StockListError;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding term and stock list failures.
#[derive(Debug)]
pub enum StockTermError {
    /// An error from the underlying chart client.
    Api(stockterm_api::Error),
    /// A stock entry named a term other than LONG, MID or SHORT.
    UnknownTerm(String),
    /// The stock list could not be read or parsed.
    StockList(StockListError),
}

impl StockTermError {
    /// True when the underlying failure is an authorization rejection.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }
}

impl fmt::Display for StockTermError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::UnknownTerm(_) => write!(f, "undefined stock term"),
            Self::StockList(e) => write!(f, "Stock list error: {}", e),
        }
    }
}

impl std::error::Error for StockTermError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::StockList(e) => Some(e),
            Self::UnknownTerm(_) => None,
        }
    }
}

impl From<stockterm_api::Error> for StockTermError {
    fn from(e: stockterm_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<StockListError> for StockTermError {
    fn from(e: StockListError) -> Self {
        Self::StockList(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stock_list::parse_stock_list;

    #[test]
    fn unauthorized_detected_through_api_variant() {
        let err = StockTermError::from(stockterm_api::Error::Unauthorized);
        assert!(err.is_unauthorized());

        let err = StockTermError::from(stockterm_api::Error::RequestFailed);
        assert!(!err.is_unauthorized());
        assert!(!StockTermError::UnknownTerm("X".into()).is_unauthorized());
    }

    #[test]
    fn unknown_term_message() {
        let err = StockTermError::UnknownTerm("DECADE".into());
        assert_eq!(err.to_string(), "undefined stock term");
    }

    #[test]
    fn stock_list_error_converts() {
        let err: StockTermError = parse_stock_list("stocks: [name: {").unwrap_err().into();
        assert!(err.to_string().starts_with("Stock list error: Failed to parse stock list YAML"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
