//! OSRM routing API client.

use std::time::Duration;

use tracing::debug;

use crate::domain::Coordinate;

use super::error::DistanceError;
use super::types::OsrmRouteResponse;
use super::{DistanceProvider, RouteDetails};

/// Default base URL (public OSRM demo server).
const DEFAULT_BASE_URL: &str = "http://router.project-osrm.org";

/// Default routing profile.
const DEFAULT_PROFILE: &str = "driving";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Routing profile (e.g. "driving")
    pub profile: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// Create a config for the public OSRM server.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the routing profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// OSRM route service client.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    /// Create a new OSRM client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, DistanceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            profile: config.profile,
        })
    }

    /// Build the route request URL. OSRM expects `lon,lat` pairs joined by `;`.
    fn route_url(&self, points: &[Coordinate]) -> String {
        let coordinates = points
            .iter()
            .map(|c| format!("{},{}", c.longitude(), c.latitude()))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}",
            self.base_url, self.profile, coordinates
        )
    }
}

impl DistanceProvider for OsrmClient {
    async fn route_details(&self, points: &[Coordinate]) -> Result<RouteDetails, DistanceError> {
        if points.len() < 2 {
            return Err(DistanceError::TooFewPoints(points.len()));
        }

        let url = self.route_url(points);
        debug!(points = points.len(), "Requesting OSRM route");

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "false")])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        // OSRM reports "NoRoute" and friends as 400 with a JSON body, so try
        // the body before giving up on the status.
        let parsed: Result<OsrmRouteResponse, _> = serde_json::from_str(&body);

        let parsed = match parsed {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => {
                return Err(DistanceError::Json {
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return Err(DistanceError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }
        };

        if !parsed.is_ok() {
            return Err(DistanceError::NoRoute { code: parsed.code });
        }

        let route = parsed
            .routes
            .first()
            .ok_or_else(|| DistanceError::NoRoute {
                code: "NoRoute".to_string(),
            })?;

        Ok(RouteDetails {
            distance_km: route.distance / 1000.0,
            duration_mins: route.duration / 60.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn points() -> Vec<Coordinate> {
        vec![
            Coordinate::new(16.7745, 96.1588).unwrap(),
            Coordinate::new(16.8053, 96.1561).unwrap(),
        ]
    }

    #[test]
    fn config_defaults() {
        let config = OsrmConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.profile, "driving");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_builders() {
        let config = OsrmConfig::new()
            .with_base_url("http://localhost:5000")
            .with_profile("bus")
            .with_timeout(2);
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.profile, "bus");
        assert_eq!(config.timeout_secs, 2);
    }

    #[test]
    fn url_uses_lon_lat_order() {
        let client = OsrmClient::new(OsrmConfig::new().with_base_url("http://osrm/")).unwrap();
        assert_eq!(
            client.route_url(&points()),
            "http://osrm/route/v1/driving/96.1588,16.7745;96.1561,16.8053"
        );
    }

    #[tokio::test]
    async fn converts_units() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(
                "/route/v1/driving/96.1588,16.7745;96.1561,16.8053",
            ))
            .and(query_param("overview", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"code": "Ok", "routes": [{"distance": 4500.0, "duration": 720.0}]}"#,
            ))
            .mount(&server)
            .await;

        let client = OsrmClient::new(OsrmConfig::new().with_base_url(server.uri())).unwrap();
        let details = client.route_details(&points()).await.unwrap();

        assert_eq!(details.distance_km, 4.5);
        assert_eq!(details.duration_mins, 12.0);
    }

    #[tokio::test]
    async fn no_route_code_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"code": "NoRoute", "message": "Impossible route"}"#),
            )
            .mount(&server)
            .await;

        let client = OsrmClient::new(OsrmConfig::new().with_base_url(server.uri())).unwrap();
        let err = client.route_details(&points()).await.unwrap_err();

        assert!(matches!(err, DistanceError::NoRoute { code } if code == "NoRoute"));
    }

    #[tokio::test]
    async fn server_error_without_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = OsrmClient::new(OsrmConfig::new().with_base_url(server.uri())).unwrap();
        let err = client.route_details(&points()).await.unwrap_err();

        assert!(matches!(err, DistanceError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn malformed_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = OsrmClient::new(OsrmConfig::new().with_base_url(server.uri())).unwrap();
        let err = client.route_details(&points()).await.unwrap_err();

        assert!(matches!(err, DistanceError::Json { .. }));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"code": "Ok", "routes": [{"distance": 1.0, "duration": 1.0}]}"#)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = OsrmClient::new(
            OsrmConfig::new()
                .with_base_url(server.uri())
                .with_timeout(1),
        )
        .unwrap();
        let err = client.route_details(&points()).await.unwrap_err();

        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn too_few_points_skips_request() {
        let client = OsrmClient::new(OsrmConfig::new().with_base_url("http://127.0.0.1:9")).unwrap();
        let err = client.route_details(&points()[..1]).await.unwrap_err();

        assert!(matches!(err, DistanceError::TooFewPoints(1)));
    }
}
