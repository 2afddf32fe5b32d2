mod chart;
pub use self::chart::{
    Bar, Chart, ChartError, ChartMeta, ChartResponse, ChartResult, Indicators, QuoteIndicator,
};
