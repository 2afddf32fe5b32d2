use chrono::NaiveDate;
use stockterm_api::{Client, Error, HistoryQuery, SnapshotQuery};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn history_query() -> HistoryQuery {
    HistoryQuery::new(NaiveDate::from_ymd_opt(2023, 11, 1).unwrap())
}

#[tokio::test]
async fn get_history_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("chart_history.json");

    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .and(query_param("interval", "1d"))
        .and(query_param("period1", "1698796800"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_history("AAPL", &history_query()).await;
    assert!(result.is_ok());

    let chart = result.unwrap();
    assert_eq!(chart.meta.symbol, "AAPL");
    assert_eq!(chart.bars().len(), 3);
}

#[tokio::test]
async fn get_snapshot_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("chart_snapshot.json");

    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/MSFT"))
        .and(query_param("range", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let chart = client
        .get_snapshot("MSFT", &SnapshotQuery::default())
        .await
        .unwrap();
    assert_eq!(chart.meta.regular_market_price, Some(415.26));
}

#[tokio::test]
async fn unauthorized_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client
        .get_history("AAPL", &history_query())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized));
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Unauthorized");
}

#[tokio::test]
async fn server_error_carries_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client
        .get_history("AAPL", &history_query())
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn not_found_surfaces_chart_error() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("chart_not_found.json");

    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/ZZZZ"))
        .respond_with(ResponseTemplate::new(404).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client
        .get_snapshot("ZZZZ", &SnapshotQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { ref code, .. } if code == "Not Found"));
    assert!(!err.is_unauthorized());
}

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client
        .get_history("AAPL", &history_query())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[tokio::test]
async fn empty_result_is_no_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"chart": {"result": [], "error": null}})),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client
        .get_history("AAPL", &history_query())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoData { ref symbol } if symbol == "AAPL"));
}
