//! Textbook finance formulas. Pure and unguarded: non-finite inputs produce
//! non-finite outputs.

/// Compound annual growth rate as a fraction: `(end / begin)^(1 / periods) - 1`.
pub fn cagr(begin: f64, end: f64, periods: f64) -> f64 {
    (end / begin).powf(1.0 / periods) - 1.0
}

/// Future value of `principal` compounded at `rate` per period: `principal * (1 + rate)^periods`.
pub fn future_value(rate: f64, principal: f64, periods: f64) -> f64 {
    principal * (1.0 + rate).powf(periods)
}

/// Rule of 72 doubling-time estimate for a fractional `rate`: `72 / (rate * 100)`.
pub fn rule_of_72(rate: f64) -> f64 {
    72.0 / (rate * 100.0)
}
