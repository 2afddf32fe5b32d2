//! Technical metrics for one sub-window: future value, CAGR, and Rule of 72.

use serde::Serialize;

use crate::formulas;
use crate::precision::{round_sig, DEFAULT_PRECISION, RULE_72_PRECISION};

/// Rounded metrics derived from a reference value, a current value, and a period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TechnicalResult {
    pub future_value: f64,
    pub cagr: f64,
    pub rule72: f64,
}

/// Linear per-period change from `reference` to `current`, rounded.
///
/// This is not a compounding rate. It feeds the future value and Rule of 72
/// only; CAGR is computed from the raw endpoints.
pub fn linear_rate(reference: f64, current: f64, period_years: f64) -> f64 {
    round_sig((current - reference) / period_years, DEFAULT_PRECISION)
}

/// Computes the technical metrics for one window.
///
/// The rate fed to the future value and Rule of 72 is a price difference,
/// not a percentage, and the results are not percent-scaled: a window
/// averaging 90 that closes at 100 over one year reports FV 1100, CAGR
/// 0.111 and R72 0.072.
///
/// No input guarding: a zero `period_years` yields whatever the formulas
/// produce for a non-finite rate.
pub fn technical_analyze(reference: f64, current: f64, period_years: f64) -> TechnicalResult {
    let rate = linear_rate(reference, current, period_years);
    TechnicalResult {
        future_value: round_sig(
            formulas::future_value(rate, current, period_years),
            DEFAULT_PRECISION,
        ),
        cagr: round_sig(
            formulas::cagr(reference, current, period_years),
            DEFAULT_PRECISION,
        ),
        rule72: round_sig(formulas::rule_of_72(rate), RULE_72_PRECISION),
    }
}
