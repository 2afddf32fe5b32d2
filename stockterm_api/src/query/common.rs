//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`Interval`].

use std::fmt;
use std::str::FromStr;

use url::Url;

/// Trait implemented by all chart query builders. Provides URL serialization and
/// shared builder methods for the bar interval and extended-hours flag.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the bar interval.
    fn with_interval(mut self, interval: Interval) -> Self
    where
        Self: Sized,
    {
        self.get_common().interval = interval;
        self
    }

    /// Includes pre- and post-market bars.
    fn with_pre_post(mut self, include: bool) -> Self
    where
        Self: Sized,
    {
        self.get_common().include_pre_post = include;
        self
    }
}

/// Bar granularity accepted by the chart endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interval {
    /// One bar per trading day. The smallest interval the analysis uses.
    #[default]
    OneDay,
    OneWeek,
    OneMonth,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Interval::OneDay => "1d",
            Interval::OneWeek => "1wk",
            Interval::OneMonth => "1mo",
        };
        f.write_str(s)
    }
}

impl FromStr for Interval {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Interval::OneDay),
            "1wk" => Ok(Interval::OneWeek),
            "1mo" => Ok(Interval::OneMonth),
            _ => Err(()),
        }
    }
}

/// Fields shared by all query types.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryCommon {
    /// Bar interval. Defaults to one day.
    pub interval: Interval,
    /// Whether extended-hours bars are included. Defaults to false.
    pub include_pre_post: bool,
}

impl QueryCommon {
    /// Appends the interval and extended-hours parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("interval", &self.interval.to_string())
            .append_pair("includePrePost", if self.include_pre_post { "true" } else { "false" });
        url
    }
}
