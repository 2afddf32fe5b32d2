use chrono::{DateTime, NaiveDate};
use stockterm_api::{HistoryQuery, Interval, Query, SnapshotQuery};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/v8/finance/chart/AAPL").unwrap()
}

#[test]
fn history_query_defaults() {
    let period1 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let url = HistoryQuery::new(period1).add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("interval=1d"));
    assert!(query.contains("includePrePost=false"));
    assert!(query.contains("period1=1577836800"));
    assert!(query.contains("period2="));
}

#[test]
fn history_query_with_period2_and_interval() {
    let period1 = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    let period2 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let url = HistoryQuery::new(period1)
        .with_period2(period2)
        .with_interval(Interval::OneWeek)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("interval=1wk"));
    assert!(query.contains("period2=1700000000"));
}

#[test]
fn snapshot_query_defaults() {
    let url = SnapshotQuery::default().add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("range=1d"));
    assert!(query.contains("interval=1d"));
    assert!(!query.contains("period1"));
}

#[test]
fn snapshot_query_with_range_and_pre_post() {
    let url = SnapshotQuery::default()
        .with_range("5d")
        .with_pre_post(true)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("range=5d"));
    assert!(query.contains("includePrePost=true"));
}

#[test]
fn interval_round_trips_through_strings() {
    for interval in [Interval::OneDay, Interval::OneWeek, Interval::OneMonth] {
        let parsed: Interval = interval.to_string().parse().unwrap();
        assert_eq!(parsed, interval);
    }
    assert!("2h".parse::<Interval>().is_err());
}
