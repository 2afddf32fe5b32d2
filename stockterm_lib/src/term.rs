//! Analysis horizons and their fixed sub-window schedules.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::StockTermError;
use crate::time_window::{TimeUnit, WindowSpec};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Horizon {
    Long,
    Mid,
    Short,
}

/// One slice of a horizon's schedule. `period_years` is `None` when the
/// horizon reports only the reduction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubWindow {
    pub window: WindowSpec,
    pub period_years: Option<f64>,
}

/// How much history to fetch, and the ascending windows cut from it.
#[derive(Clone, Copy, Debug)]
pub struct TermSchedule {
    pub fetch: WindowSpec,
    pub windows: &'static [SubWindow],
    /// Whether each window block is followed by a blank line.
    pub spaced: bool,
}

const LONG_WINDOWS: &[SubWindow] = &[
    SubWindow {
        window: WindowSpec::new(1, TimeUnit::Year),
        period_years: Some(1.0),
    },
    SubWindow {
        window: WindowSpec::new(3, TimeUnit::Year),
        period_years: Some(3.0),
    },
    SubWindow {
        window: WindowSpec::new(5, TimeUnit::Year),
        period_years: Some(5.0),
    },
];

const MID_WINDOWS: &[SubWindow] = &[
    SubWindow {
        window: WindowSpec::new(6, TimeUnit::Month),
        period_years: Some(0.5),
    },
    SubWindow {
        window: WindowSpec::new(12, TimeUnit::Month),
        period_years: Some(1.0),
    },
    SubWindow {
        window: WindowSpec::new(24, TimeUnit::Month),
        period_years: Some(2.0),
    },
];

const SHORT_WINDOWS: &[SubWindow] = &[
    SubWindow {
        window: WindowSpec::new(2, TimeUnit::Week),
        period_years: None,
    },
    SubWindow {
        window: WindowSpec::new(4, TimeUnit::Week),
        period_years: None,
    },
    SubWindow {
        window: WindowSpec::new(8, TimeUnit::Week),
        period_years: None,
    },
];

impl Horizon {
    pub fn schedule(self) -> TermSchedule {
        match self {
            Horizon::Long => TermSchedule {
                fetch: WindowSpec::new(5, TimeUnit::Year),
                windows: LONG_WINDOWS,
                spaced: false,
            },
            Horizon::Mid => TermSchedule {
                fetch: WindowSpec::new(3, TimeUnit::Year),
                windows: MID_WINDOWS,
                spaced: false,
            },
            Horizon::Short => TermSchedule {
                fetch: WindowSpec::new(6, TimeUnit::Month),
                windows: SHORT_WINDOWS,
                spaced: true,
            },
        }
    }

    /// Caption used in the stock header, e.g. `LONG TERM`.
    pub fn title(self) -> &'static str {
        match self {
            Horizon::Long => "LONG TERM",
            Horizon::Mid => "MID TERM",
            Horizon::Short => "SHORT TERM",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Horizon::Long => "LONG",
            Horizon::Mid => "MID",
            Horizon::Short => "SHORT",
        };
        f.write_str(s)
    }
}

impl FromStr for Horizon {
    type Err = StockTermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" => Ok(Horizon::Long),
            "mid" => Ok(Horizon::Mid),
            "short" => Ok(Horizon::Short),
            _ => Err(StockTermError::UnknownTerm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("LONG".parse::<Horizon>().unwrap(), Horizon::Long);
        assert_eq!("mid".parse::<Horizon>().unwrap(), Horizon::Mid);
        assert_eq!(" Short ".parse::<Horizon>().unwrap(), Horizon::Short);
    }

    #[test]
    fn unknown_term_rejected() {
        let err = "decade".parse::<Horizon>().unwrap_err();
        assert!(matches!(err, StockTermError::UnknownTerm(ref t) if t == "decade"));
        assert!("".parse::<Horizon>().is_err());
    }

    #[test]
    fn schedules_are_ascending() {
        for horizon in [Horizon::Long, Horizon::Mid, Horizon::Short] {
            let schedule = horizon.schedule();
            let durations: Vec<i64> = schedule
                .windows
                .iter()
                .map(|w| w.window.duration_ms())
                .collect();
            assert!(durations.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(durations.iter().all(|&d| d <= schedule.fetch.duration_ms()));
        }
    }

    #[test]
    fn only_short_skips_metrics() {
        assert!(Horizon::Short
            .schedule()
            .windows
            .iter()
            .all(|w| w.period_years.is_none()));
        for horizon in [Horizon::Long, Horizon::Mid] {
            assert!(horizon
                .schedule()
                .windows
                .iter()
                .all(|w| w.period_years.is_some()));
        }
    }

    #[test]
    fn mid_term_periods() {
        let periods: Vec<f64> = Horizon::Mid
            .schedule()
            .windows
            .iter()
            .filter_map(|w| w.period_years)
            .collect();
        assert_eq!(periods, vec![0.5, 1.0, 2.0]);
    }

    #[test]
    fn titles() {
        assert_eq!(Horizon::Long.title(), "LONG TERM");
        assert_eq!(Horizon::Short.to_string(), "SHORT");
    }
}
