//! Environment-driven settings. CLI flags override these in the binary.

use std::path::PathBuf;
use std::time::Duration;

use crate::analyze::RetryPolicy;
use crate::report::DEFAULT_REPORT_DIR;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_AUTH_RETRY_DELAY_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub report_dir: PathBuf,
    pub retry: RetryPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            retry: RetryPolicy::default(),
        }
    }
}

impl Settings {
    /// Reads `STOCKTERM_BASE_URL`, `STOCKTERM_REPORT_DIR`,
    /// `STOCKTERM_AUTH_RETRY_DELAY_SECS` and `STOCKTERM_AUTH_RETRY_MAX`.
    /// Unset or unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("STOCKTERM_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let report_dir = lookup("STOCKTERM_REPORT_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR));
        let delay_secs = lookup("STOCKTERM_AUTH_RETRY_DELAY_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_AUTH_RETRY_DELAY_SECS);
        let max_retries =
            lookup("STOCKTERM_AUTH_RETRY_MAX").and_then(|v| v.parse::<usize>().ok());

        Self {
            base_url,
            report_dir,
            retry: RetryPolicy {
                delay: Duration::from_secs(delay_secs),
                max_retries,
            },
        }
    }
}
