//! Integration tests for the Visual Crossing fetcher using wiremock
//!
//! These tests run the fetcher and the dashboard state against a mock HTTP
//! server, covering request shape, normalization and failure handling.

use forecast_core::{
    Completion, DashboardState, FETCH_FAILED_NOTICE, FetchError, ForecastQuery, ProviderConfig,
    UnitPreference, WeatherFetcher, provider::visual_crossing::VisualCrossingProvider,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

/// Six aggregated days for Paris, shaped like the real provider output
fn paris_response() -> serde_json::Value {
    let conditions = [
        "Rain, Partially cloudy",
        "Clear",
        "Partially cloudy",
        "Rain",
        "Overcast",
        "Snow",
    ];

    let values: Vec<_> = conditions
        .iter()
        .enumerate()
        .map(|(i, c)| {
            serde_json::json!({
                "wdir": 222.4,
                "uvindex": 0,
                "datetimeStr": format!("2024-03-{:02}T00:00:00+01:00", 10 + i),
                "preciptype": null,
                "cloudcover": 80.6,
                "pop": 90,
                "mint": 6.0 + i as f64,
                "datetime": 1_710_025_200_000_i64 + (i as i64) * 86_400_000,
                "precip": 7.2,
                "humidity": 84.4,
                "temp": 11.2 + i as f64,
                "maxt": 13.9 + i as f64,
                "visibility": 18.7,
                "wspd": 33.1,
                "conditions": c
            })
        })
        .collect();

    serde_json::json!({
        "columns": {},
        "remainingCost": 0,
        "queryCost": 1,
        "messages": null,
        "locations": {
            "Paris": {
                "stationContributions": null,
                "values": values,
                "id": "Paris",
                "address": "Paris, France",
                "name": "Paris",
                "index": 0,
                "latitude": 48.8567,
                "longitude": 2.3510,
                "tz": "Europe/Paris"
            }
        }
    })
}

/// Create a provider pointed at the mock server
fn create_test_provider(mock_server: &MockServer) -> VisualCrossingProvider {
    let settings = ProviderConfig {
        base_url: mock_server.uri(),
        timeout_secs: Some(5),
        ..ProviderConfig::default()
    };
    VisualCrossingProvider::new("TEST_KEY".to_string(), &settings).expect("client builds")
}

async fn mount_forecast(mock_server: &MockServer, place: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("location", place))
        .respond_with(response)
        .expect(1)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Request shape
// ============================================================================

#[tokio::test]
async fn sends_fixed_parameters_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("aggregateHours", "24"))
        .and(query_param("location", "Paris"))
        .and(query_param("contentType", "json"))
        .and(query_param("unitGroup", "metric"))
        .and(query_param("shortColumnNames", "0"))
        .and(header("X-RapidAPI-Key", "TEST_KEY"))
        .and(header("X-RapidAPI-Host", "visual-crossing-weather.p.rapidapi.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let result = provider.fetch(&ForecastQuery::new("Paris")).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn repeated_query_fetches_again() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_response()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let query = ForecastQuery::new("Paris");
    provider.fetch(&query).await.expect("first fetch");
    provider.fetch(&query).await.expect("second fetch");
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn normalizes_first_location() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        "Paris",
        ResponseTemplate::new(200).set_body_json(paris_response()),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let forecast = provider.fetch(&ForecastQuery::new("Paris")).await.unwrap();

    assert_eq!(forecast.location_label(), "Paris, France");
    assert_eq!(forecast.days().len(), 6);

    let today = forecast.today();
    assert!((today.temperature - 11.2).abs() < 1e-9);
    assert!((today.min_temperature - 6.0).abs() < 1e-9);
    assert!((today.max_temperature - 13.9).abs() < 1e-9);
    assert_eq!(today.humidity, Some(84.4));
    assert_eq!(today.wind_speed, Some(33.1));
    assert_eq!(today.wind_direction_degrees, Some(222.4));
    assert_eq!(today.condition_text, "Rain, Partially cloudy");
}

#[tokio::test]
async fn paris_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        "Paris",
        ResponseTemplate::new(200).set_body_json(paris_response()),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let mut state = DashboardState::new("Delhi", UnitPreference::Celsius);
    state.set_input("Paris");

    let ticket = state.submit().expect("non-blank input issues a request");
    let result = provider.fetch(ticket.query()).await;
    assert_eq!(state.complete(&ticket, result), Completion::Applied);

    let view = state.view();
    assert_eq!(view.primary.location_label, "Paris, France");
    assert_eq!(view.primary.temperature, "11.20");
    assert_eq!(view.primary.conditions, "Rain, Partially cloudy");
    assert_eq!(view.summaries.len(), 5);
    assert_eq!(view.summaries[0].date, "2024-03-11");
    assert_eq!(view.summaries[4].date, "2024-03-15");
    assert_eq!(view.background.name(), "Cloudy");
}

// ============================================================================
// Failure scenarios
// ============================================================================

#[tokio::test]
async fn atlantis_keeps_previous_forecast() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        "Paris",
        ResponseTemplate::new(200).set_body_json(paris_response()),
    )
    .await;
    mount_forecast(
        &mock_server,
        "Atlantis",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "locations": {} })),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let mut state = DashboardState::new("Delhi", UnitPreference::Celsius);

    let ticket = state.request("Paris").unwrap();
    let result = provider.fetch(ticket.query()).await;
    state.complete(&ticket, result);

    let ticket = state.request("Atlantis").unwrap();
    let result = provider.fetch(ticket.query()).await;
    assert!(matches!(result, Err(FetchError::NotFound)));

    let outcome = state.complete(&ticket, result);
    assert_eq!(outcome, Completion::Failed { notice: FETCH_FAILED_NOTICE });
    assert_eq!(state.view().primary.location_label, "Paris, France");
}

#[tokio::test]
async fn non_success_status_is_provider_error() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        "Nowhere",
        ResponseTemplate::new(400).set_body_string("Bad API Request:Invalid location parameter value."),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let err = provider.fetch(&ForecastQuery::new("Nowhere")).await.unwrap_err();

    match err {
        FetchError::Provider { status, body } => {
            assert_eq!(status.as_u16(), 400);
            assert!(body.contains("Invalid location"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_is_provider_error() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        "Paris",
        ResponseTemplate::new(403).set_body_json(serde_json::json!({ "message": "You are not subscribed to this API." })),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let err = provider.fetch(&ForecastQuery::new("Paris")).await.unwrap_err();

    assert!(matches!(err, FetchError::Provider { .. }));
}

#[tokio::test]
async fn invalid_json_is_malformed() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        "Paris",
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let err = provider.fetch(&ForecastQuery::new("Paris")).await.unwrap_err();

    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test]
async fn empty_values_is_no_days() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        "Paris",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "locations": { "Paris": { "address": "Paris, France", "values": [] } }
        })),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let err = provider.fetch(&ForecastQuery::new("Paris")).await.unwrap_err();

    assert!(matches!(err, FetchError::NoDays { .. }));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let mock_server = MockServer::start().await;
    let provider = create_test_provider(&mock_server);
    drop(mock_server);

    let err = provider.fetch(&ForecastQuery::new("Paris")).await.unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
}
