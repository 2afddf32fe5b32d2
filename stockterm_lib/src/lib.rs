//! Library layer for stockterm: historical windowing, term analysis, and reporting.
//!
//! Fetches price history through `stockterm_api`, reduces it over fixed
//! sub-windows per analysis horizon, derives growth metrics, and fans the
//! formatted results out to report sinks.

pub mod analyze;
pub mod config;
pub mod error;
pub mod formulas;
pub mod metrics;
pub mod precision;
pub mod reduce;
pub mod report;
pub mod source;
pub mod stock_list;
pub mod term;
pub mod time_window;

pub use stockterm_api;

pub use analyze::{Analyzer, RetryPolicy};
pub use config::Settings;
pub use error::StockTermError;
pub use reduce::{PricePoint, Reduction};
pub use report::{ReportEntry, ReportEvent, ReportSink, Reporter};
pub use source::{DailySnapshot, MarketData, YahooSource};
pub use stock_list::{StockEntry, StockRequest};
pub use term::Horizon;
