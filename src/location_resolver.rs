//! Location Resolution Module
//!
//! Resolves a free-text city name into coordinates via the `OpenMeteo`
//! geocoding service, taking the single best match.

use crate::api::ApiClient;
use crate::config::GeocodingConfig;
use crate::models::Coordinates;
use crate::models::openmeteo::GeocodingResponse;
use crate::{ForecastError, Result};
use tracing::{debug, info, instrument, warn};

/// Service for resolving city names
pub struct LocationResolver {
    client: ApiClient,
    base_url: String,
    language: String,
}

impl LocationResolver {
    #[must_use]
    pub fn new(client: ApiClient, config: &GeocodingConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            language: config.language.clone(),
        }
    }

    /// Resolve a city name to the coordinates of its best match.
    ///
    /// Returns `NotFound` when the service has no match, and the transport's
    /// `Network`/`Status`/`Parse` errors otherwise.
    #[instrument(skip(self))]
    pub fn resolve(&self, city: &str) -> Result<Coordinates> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ForecastError::validation("City name cannot be empty"));
        }

        info!("Geocoding location: '{}'", city);

        let url = format!(
            "{}?name={}&count=1&language={}&format=json",
            self.base_url,
            urlencoding::encode(city),
            urlencoding::encode(&self.language)
        );
        debug!("Geocoding request URL: {}", url);

        let response: GeocodingResponse = self.client.get_json(&url)?;

        let Some(best) = response.results.as_deref().and_then(<[_]>::first) else {
            warn!("No results found for location '{}'", city);
            return Err(ForecastError::not_found(city));
        };

        let coordinates = Coordinates::from(best);
        info!("Found location: {} ({})", best.display_name(), coordinates);

        Ok(coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver(server: &str) -> LocationResolver {
        let config = GeocodingConfig {
            base_url: format!("{server}/v1/search"),
            language: "en".to_string(),
        };
        LocationResolver::new(ApiClient::new(&HttpConfig::default()).unwrap(), &config)
    }

    async fn resolve_blocking(server: String, city: &'static str) -> Result<Coordinates> {
        tokio::task::spawn_blocking(move || resolver(&server).resolve(city))
            .await
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_resolve_city() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "New York"))
            .and(query_param("count", "1"))
            .and(query_param("language", "en"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{
                    "name": "New York",
                    "latitude": 40.71427,
                    "longitude": -74.00597,
                    "country": "United States",
                    "admin1": "New York"
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let coords = resolve_blocking(mock_server.uri(), "New York").await.unwrap();
        assert_eq!(coords, Coordinates::new(40.71427, -74.00597));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_resolve_no_results_key() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"generationtime_ms": 0.3})),
            )
            .mount(&mock_server)
            .await;

        let result = resolve_blocking(mock_server.uri(), "Atlantis").await;
        assert!(matches!(result, Err(ForecastError::NotFound { query }) if query == "Atlantis"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_resolve_empty_results() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})))
            .mount(&mock_server)
            .await;

        let result = resolve_blocking(mock_server.uri(), "Atlantis").await;
        assert!(matches!(result, Err(ForecastError::NotFound { .. })));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_resolve_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = resolve_blocking(mock_server.uri(), "Berlin").await;
        assert!(matches!(result, Err(ForecastError::Status { status: 500, .. })));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_resolve_malformed_result() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"name": "Berlin", "latitude": "north"}]
            })))
            .mount(&mock_server)
            .await;

        let result = resolve_blocking(mock_server.uri(), "Berlin").await;
        assert!(matches!(result, Err(ForecastError::Parse { .. })));
    }

    #[test]
    fn test_resolve_rejects_blank_city() {
        let result = resolver("http://127.0.0.1:9").resolve("   ");
        assert!(matches!(result, Err(ForecastError::Validation { .. })));
    }
}
