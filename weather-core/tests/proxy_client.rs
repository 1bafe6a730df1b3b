//! Integration tests for the proxy client using wiremock.

mod common;

use std::time::Duration;

use serde_json::json;
use weather_core::{ProxyClient, WeatherError, WeatherSource};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn create_test_client(mock_server: &MockServer) -> ProxyClient {
    ProxyClient::new(mock_server.uri(), Duration::from_secs(5)).expect("Failed to create client")
}

async fn setup_weather_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn fetch_maps_successful_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "Mumbai"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::forecast_payload("Mumbai", 31.4, 7, 24)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = create_test_client(&mock_server).fetch("Mumbai").await.expect("fetch");

    assert_eq!(report.snapshot.location.name, "Mumbai");
    assert_eq!(report.days.len(), 7);
    assert_eq!(report.days[0].hourly.as_ref().map(Vec::len), Some(24));
}

#[tokio::test]
async fn city_is_url_encoded() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "São Paulo & Co"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::forecast_payload("São Paulo", 25.0, 1, 24)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = create_test_client(&mock_server).fetch("São Paulo & Co").await.expect("fetch");
    assert_eq!(report.snapshot.location.name, "São Paulo");
}

#[tokio::test]
async fn error_status_surfaces_body_message() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(400).set_body_json(json!({ "error": "No matching location found." })),
    )
    .await;

    let err = create_test_client(&mock_server).fetch("Atlantis").await.unwrap_err();
    assert_eq!(err, WeatherError::provider("No matching location found."));
}

#[tokio::test]
async fn error_status_without_message_falls_back_to_generic() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(&mock_server, ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .await;

    let err = create_test_client(&mock_server).fetch("Paris").await.unwrap_err();
    assert_eq!(err, WeatherError::transport("Failed to fetch weather data"));
}

#[tokio::test]
async fn ok_status_with_provider_error_is_a_provider_error() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })),
    )
    .await;

    let err = create_test_client(&mock_server).fetch("Atlantis").await.unwrap_err();
    assert_eq!(err.to_string(), "No matching location found.");
}

#[tokio::test]
async fn error_status_with_empty_message_falls_back_to_generic() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(&mock_server, ResponseTemplate::new(500).set_body_json(json!({ "error": "" })))
        .await;

    let err = create_test_client(&mock_server).fetch("Paris").await.unwrap_err();
    assert_eq!(err, WeatherError::transport("Failed to fetch weather data"));
}

#[tokio::test]
async fn ok_status_with_null_error_still_renders() {
    let mock_server = MockServer::start().await;
    let mut payload = common::forecast_payload("Paris", 12.0, 3, 24);
    payload["error"] = serde_json::Value::Null;
    setup_weather_mock(&mock_server, ResponseTemplate::new(200).set_body_json(payload)).await;

    let report = create_test_client(&mock_server).fetch("Paris").await.expect("fetch");
    assert_eq!(report.snapshot.location.name, "Paris");
    assert_eq!(report.days.len(), 3);
}

#[tokio::test]
async fn incomplete_payload_is_a_shape_error() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(json!({ "location": { "name": "Paris" } })),
    )
    .await;

    let err = create_test_client(&mock_server).fetch("Paris").await.unwrap_err();
    assert!(err.is_data_shape());
}

#[tokio::test]
async fn slow_proxy_times_out_as_transport_error() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(common::forecast_payload("Paris", 12.0, 1, 24))
            .set_delay(Duration::from_millis(500)),
    )
    .await;

    let client = ProxyClient::new(mock_server.uri(), Duration::from_millis(50)).expect("client");
    let err = client.fetch("Paris").await.unwrap_err();

    assert!(matches!(err, WeatherError::Transport(_)));
}

#[tokio::test]
async fn unreachable_proxy_is_a_transport_error() {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = ProxyClient::new("http://127.0.0.1:9", Duration::from_secs(2)).expect("client");
    let err = client.fetch("Paris").await.unwrap_err();

    assert!(matches!(err, WeatherError::Transport(_)));
}
