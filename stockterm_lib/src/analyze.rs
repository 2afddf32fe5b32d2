//! Term analysis driver and its authorization retry wrapper.
//!
//! One history fetch seeds every sub-window of a horizon. Windows are reduced
//! shortest first; the first empty window ends the horizon. Any failure
//! abandons the symbol, except an authorization rejection, which waits
//! [`RetryPolicy::delay`] and restarts the symbol from scratch.

use std::time::Duration;

use chrono::{DateTime, Utc};
use stockterm_api::Interval;

use crate::error::StockTermError;
use crate::metrics::{technical_analyze, TechnicalResult};
use crate::precision::{round_default, DEFAULT_PRECISION};
use crate::reduce::{reduce, Reduction};
use crate::report::{AnalyzeBlock, AnalyzeRow, ReportEntry, Reporter};
use crate::source::{DailySnapshot, MarketData};
use crate::stock_list::{normalize_symbol, EntryError, StockEntry, StockRequest};
use crate::term::Horizon;
use crate::time_window::{past_date, WindowSpec};

pub const ANALYZE_EXCEPTION: &str = "Analyze Exception";
const DAILY_CAPTION: &str = "-- Daily Analyze --";
const TECHNICAL_CAPTION: &str = "- Technical Analyze (Reference: Average) -";

/// How authorization failures are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    /// `None` retries forever.
    pub max_retries: Option<usize>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(120),
            max_retries: None,
        }
    }
}

impl RetryPolicy {
    fn allows(&self, retries_so_far: usize) -> bool {
        self.max_retries.map_or(true, |max| retries_so_far < max)
    }
}

pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct Analyzer<'r, D> {
    source: D,
    reporter: &'r mut Reporter,
    clock: Clock,
    retry: RetryPolicy,
}

impl<'r, D: MarketData> Analyzer<'r, D> {
    pub fn new(source: D, reporter: &'r mut Reporter) -> Self {
        Self {
            source,
            reporter,
            clock: Box::new(Utc::now),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Analyzes each request in order. One symbol's failure never stops the next.
    pub async fn analyze_all(&mut self, requests: &[StockRequest]) {
        for request in requests {
            self.analyze(request).await;
        }
    }

    /// Analyzes a raw, unvalidated entry such as one typed on the command line.
    ///
    /// An unknown term is reported as `undefined stock term` and nothing is fetched.
    pub async fn analyze_entry(&mut self, entry: &StockEntry) {
        let term = entry.term.as_deref().unwrap_or_default();
        let horizon = match term.parse::<Horizon>() {
            Ok(h) => h,
            Err(e) => {
                self.reporter
                    .error(ReportEntry::new(e.to_string()).with_data(term.to_string()));
                return;
            }
        };
        let Some(symbol) = entry.name.as_deref().and_then(normalize_symbol) else {
            let data = serde_json::to_value(entry).unwrap_or_default();
            self.reporter
                .error(ReportEntry::new(EntryError::InvalidSymbol.to_string()).with_data(data));
            return;
        };
        self.analyze(&StockRequest { symbol, horizon }).await;
    }

    /// Runs one symbol's horizon, retrying from scratch on authorization failure.
    pub async fn analyze(&mut self, request: &StockRequest) {
        tracing::info!(symbol = %request.symbol, horizon = %request.horizon, "analyzing");
        let mut retries = 0usize;
        loop {
            match self.run_horizon(request).await {
                Ok(()) => return,
                Err(err) if err.is_unauthorized() && self.retry.allows(retries) => {
                    retries += 1;
                    tracing::warn!(
                        "{} authorization rejected (retry {}), retrying in {:.0}s",
                        request.symbol,
                        retries,
                        self.retry.delay.as_secs_f64()
                    );
                    self.reporter.log(format!(
                        "Authorization error. Stock analysis will be tried again in {}...",
                        describe_delay(self.retry.delay)
                    ));
                    tokio::time::sleep(self.retry.delay).await;
                }
                Err(err) => {
                    tracing::warn!("{} analysis failed: {}", request.symbol, err);
                    self.reporter
                        .error(ReportEntry::new(ANALYZE_EXCEPTION).with_data(err.to_string()));
                    return;
                }
            }
        }
    }

    async fn run_horizon(&mut self, request: &StockRequest) -> Result<(), StockTermError> {
        let schedule = request.horizon.schedule();
        let symbol = request.symbol.as_str();

        let period1 = past_date((self.clock)(), schedule.fetch);
        let history = self
            .source
            .historical(symbol, period1, Interval::OneDay)
            .await?;
        tracing::debug!(symbol, bars = history.len(), %period1, "history received");

        self.reporter.analyze(AnalyzeBlock::heading(format!(
            "==== {} ({}) ====",
            symbol,
            request.horizon.title()
        )));

        let daily = self.source.daily_quote(symbol).await?;
        self.reporter.analyze(daily_block(&daily));

        for sub in schedule.windows {
            let Some(reduction) = reduce(
                &history,
                sub.window.duration_ms(),
                (self.clock)(),
                DEFAULT_PRECISION,
            ) else {
                tracing::debug!(symbol, "no data within {}, stopping", sub.window);
                break;
            };

            let mut block = window_block(sub.window, &reduction);
            if schedule.spaced {
                block = block.with_trailing_blank();
            }
            self.reporter.analyze(block);

            if let Some(period) = sub.period_years {
                let technical = technical_analyze(reduction.average, reduction.close, period);
                self.reporter.analyze(technical_block(&technical));
            }
        }
        Ok(())
    }
}

fn daily_block(daily: &DailySnapshot) -> AnalyzeBlock {
    AnalyzeBlock::section(
        DAILY_CAPTION,
        vec![
            AnalyzeRow::new("High", round_default(daily.high)),
            AnalyzeRow::new("Low", round_default(daily.low)),
            AnalyzeRow::new("Current", round_default(daily.current)),
        ],
    )
    .with_trailing_blank()
}

fn window_block(window: WindowSpec, reduction: &Reduction) -> AnalyzeBlock {
    AnalyzeBlock::section(
        format!("-- {} Analyze --", window),
        vec![
            AnalyzeRow::new("Average", reduction.average),
            AnalyzeRow::new("High", reduction.high),
            AnalyzeRow::new("Low", reduction.low),
            AnalyzeRow::new("Close", reduction.close),
        ],
    )
}

fn technical_block(result: &TechnicalResult) -> AnalyzeBlock {
    AnalyzeBlock::technical(
        TECHNICAL_CAPTION,
        vec![
            AnalyzeRow::new("Future Value (FV)", result.future_value),
            AnalyzeRow::new("Compound Annual Growth Rate (CAGR)", result.cagr),
            AnalyzeRow::new("Rule of 72 (R72)", result.rule72),
        ],
    )
}

fn describe_delay(delay: Duration) -> String {
    let secs = delay.as_secs();
    match secs {
        60 => "1 minute".to_string(),
        s if s > 0 && s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s => format!("{} seconds", s),
    }
}
