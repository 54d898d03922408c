//! Contract tests for the REST backend adapter against canned responses.

use std::sync::Arc;

use perfchart_core::{
    BackendAdapter, BackendConfig, CannedHttpClient, DataSource, HttpError, HttpResponse,
    SourceErrorKind, Timeframe,
};

const BASE: &str = "http://backend.test";

const PERFORMANCE_BODY: &str = r#"{
    "crypto_data": [
        {"date": "2024-05-01", "price": 45000.0, "normalized_return": 0.0},
        {"date": "2024-05-02", "price": 46350.0, "normalized_return": 3.0},
        {"date": "2024-05-03", "price": 44100.0, "normalized_return": -2.0}
    ],
    "traditional_data": [
        {"date": "2024-05-01", "price": 100.0, "normalized_return": 0.0},
        {"date": "2024-05-02", "price": 100.4, "normalized_return": 0.4}
    ],
    "timeframe": "1M"
}"#;

const ASSETS_BODY: &str = r##"{
    "crypto": {"name": "Bitcoin", "symbol": "BTC", "description": "Leading cryptocurrency", "color": "#f7931a"},
    "traditional": {"name": "60/40 Portfolio", "description": "60% S&P 500 (SPY) + 40% 20+ Year Treasury Bonds (TLT)", "color": "#3b82f6"}
}"##;

fn adapter(client: CannedHttpClient) -> (BackendAdapter, Arc<CannedHttpClient>) {
    let client = Arc::new(client);
    let config = BackendConfig::default()
        .with_base_url(BASE)
        .with_timeout_ms(1_500)
        .validate()
        .expect("valid config");
    (BackendAdapter::with_http_client(client.clone(), config), client)
}

// =============================================================================
// Successful responses
// =============================================================================

#[tokio::test]
async fn when_backend_returns_performance_adapter_decodes_both_series() {
    // Given: A backend answering the 1M performance endpoint
    let (adapter, client) = adapter(CannedHttpClient::new().with_response(
        format!("{BASE}/api/performance/1M"),
        HttpResponse::ok_json(PERFORMANCE_BODY),
    ));

    // When: The adapter requests the 1M window
    let snapshot = adapter
        .performance(Timeframe::OneMonth)
        .await
        .expect("valid body decodes");

    // Then: Both raw series arrive untouched, in backend order
    assert_eq!(snapshot.crypto_data.len(), 3);
    assert_eq!(snapshot.traditional_data.len(), 2);
    assert_eq!(snapshot.crypto_data[1].normalized_return, 3.0);
    assert_eq!(snapshot.traditional_data[1].price, 100.4);
    assert_eq!(snapshot.timeframe, Some(Timeframe::OneMonth));

    // And: The request honoured the configured timeout and asked for JSON
    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].timeout_ms, 1_500);
    assert_eq!(
        requests[0].headers.get("accept").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn when_backend_returns_assets_info_adapter_decodes_metadata() {
    let (adapter, _) = adapter(CannedHttpClient::new().with_response(
        format!("{BASE}/api/assets/info"),
        HttpResponse::ok_json(ASSETS_BODY),
    ));

    let info = adapter.assets_info().await.expect("valid body decodes");

    assert_eq!(info.crypto.name, "Bitcoin");
    assert_eq!(info.crypto.symbol.as_deref(), Some("BTC"));
    assert_eq!(info.traditional.symbol, None);
    assert!(info.traditional.description.contains("TLT"));
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn when_backend_answers_non_2xx_adapter_reports_network_error() {
    // Given: The backend rejects the request
    let (adapter, _) = adapter(CannedHttpClient::new().with_response(
        format!("{BASE}/api/performance/ALL"),
        HttpResponse::with_status(500, r#"{"detail":"Failed to fetch performance data"}"#),
    ));

    // When: The adapter requests the ALL window
    let error = adapter
        .performance(Timeframe::All)
        .await
        .expect_err("500 must fail");

    // Then: The failure is a network error carrying the status
    assert_eq!(error.kind(), SourceErrorKind::Network);
    assert_eq!(error.http_status(), Some(500));
}

#[tokio::test]
async fn when_transport_times_out_adapter_reports_network_error() {
    let (adapter, _) = adapter(CannedHttpClient::new().with_error(
        format!("{BASE}/api/performance/6M"),
        HttpError::timeout("request timeout"),
    ));

    let error = adapter
        .performance(Timeframe::SixMonths)
        .await
        .expect_err("timeout must fail");

    assert_eq!(error.kind(), SourceErrorKind::Network);
    assert!(error.message().contains("timed out after 1500 ms"));
}

#[tokio::test]
async fn when_endpoint_is_missing_adapter_reports_network_error() {
    let (adapter, _) = adapter(CannedHttpClient::new());

    let error = adapter.assets_info().await.expect_err("404 must fail");

    assert_eq!(error.kind(), SourceErrorKind::Network);
    assert_eq!(error.http_status(), Some(404));
}

#[tokio::test]
async fn when_body_is_not_json_adapter_reports_decode_error() {
    let (adapter, _) = adapter(CannedHttpClient::new().with_response(
        format!("{BASE}/api/performance/1Y"),
        HttpResponse::ok_json("<html>gateway</html>"),
    ));

    let error = adapter
        .performance(Timeframe::OneYear)
        .await
        .expect_err("html must fail");

    assert_eq!(error.kind(), SourceErrorKind::Decode);
    assert_eq!(error.code(), "source.decode");
}
