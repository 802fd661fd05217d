use super::*;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn geocoder(server: &MockServer) -> NominatimGeocoder {
    NominatimGeocoder::new(&server.uri(), "cargo_tracker").unwrap()
}

#[tokio::test]
async fn test_geocode_first_hit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Busan port"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", "cargo_tracker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"lat": "35.1", "lon": "129.04", "display_name": "Busan Port"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let coords = geocoder(&server).await.geocode("Busan port").await.unwrap();
    assert_eq!(coords, Some(Coordinates::new(35.1, 129.04)));
}

#[tokio::test]
async fn test_geocode_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let coords = geocoder(&server).await.geocode("Atlantis port").await.unwrap();
    assert!(coords.is_none());
}

#[tokio::test]
async fn test_geocode_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = geocoder(&server).await.geocode("Busan port").await.unwrap_err();
    assert!(matches!(err, GeocodeError::Status { status: 429 }));
}

#[tokio::test]
async fn test_geocode_bad_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"lat": "north", "lon": "4.5"}])),
        )
        .mount(&server)
        .await;

    let err = geocoder(&server).await.geocode("Rotterdam port").await.unwrap_err();
    assert!(matches!(err, GeocodeError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_geocode_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let err = geocoder(&server).await.geocode("Rotterdam port").await.unwrap_err();
    assert!(matches!(err, GeocodeError::InvalidResponse(_)));
}

#[test]
fn test_trailing_slash_trimmed() {
    let geocoder = NominatimGeocoder::new("http://localhost:8080/", "ua").unwrap();
    assert_eq!(geocoder.base_url, "http://localhost:8080");
}
