//! OSRM HTTP adapter for driving routes.
//!
//! See <http://project-osrm.org/docs/v5.24.0/api/#route-service>.

use serde::Deserialize;

use crate::coordinate::Coordinate;
use crate::polyline::{self, PolylineMode};
use crate::traits::{Route, RouteError, RouteProvider};

/// Geometry encoding requested from OSRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsrmGeometry {
    /// Classic polyline at 1e-5.
    Polyline,
    /// Classic polyline at 1e-6.
    #[default]
    Polyline6,
}

impl OsrmGeometry {
    fn query_value(self) -> &'static str {
        match self {
            Self::Polyline => "polyline",
            Self::Polyline6 => "polyline6",
        }
    }

    pub fn mode(self) -> PolylineMode {
        match self {
            Self::Polyline => PolylineMode::CLASSIC,
            Self::Polyline6 => PolylineMode::CLASSIC6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
    pub geometry: OsrmGeometry,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
            geometry: OsrmGeometry::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Route URL for a start/end pair. OSRM takes `lon,lat`.
    pub fn route_url(&self, start: Coordinate, end: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            start.lon(),
            start.lat(),
            end.lon(),
            end.lat(),
            self.config.geometry.query_value()
        )
    }
}

impl RouteProvider for OsrmClient {
    fn route(&self, start: Coordinate, end: Coordinate) -> Result<Route, RouteError> {
        let url = self.route_url(start, end);
        tracing::debug!(%url, "requesting OSRM route");

        let network_error = |message: String| RouteError::Network {
            url: url.clone(),
            message,
        };

        // OSRM reports failures such as NoRoute with a 4xx status and a JSON
        // body, so the body is parsed regardless of status.
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| network_error(err.to_string()))?;
        let status = response.status();
        let body = response
            .json::<RouteResponse>()
            .map_err(|err| network_error(format!("HTTP {status}: {err}")))?;

        body.into_route(self.config.geometry.mode())
            .inspect_err(|err| tracing::warn!(%url, error = %err, "OSRM route failed"))
    }
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: String,
    distance: f64,
    duration: f64,
}

impl RouteResponse {
    /// Takes the first (best) route and decodes its geometry.
    fn into_route(self, mode: PolylineMode) -> Result<Route, RouteError> {
        match self.code.as_str() {
            "Ok" => {}
            "NoRoute" => return Err(RouteError::NoRoute),
            _ => {
                return Err(RouteError::Service {
                    code: self.code,
                    message: self.message,
                });
            }
        }

        let best = self.routes.into_iter().next().ok_or(RouteError::NoRoute)?;
        let polyline = polyline::decode(&best.geometry, mode)?;
        Ok(Route {
            polyline,
            distance_m: best.distance,
            duration_s: best.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyline::DecodeError;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn parse(json: &str) -> RouteResponse {
        serde_json::from_str(json).expect("should deserialise")
    }

    #[test]
    fn test_route_url_uses_lon_lat_order() {
        let client = OsrmClient::new(OsrmConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..OsrmConfig::default()
        })
        .unwrap();
        let url = client.route_url(coord(36.1147, -115.1728), coord(36.1727, -115.158));
        assert_eq!(
            url,
            "http://localhost:5000/route/v1/driving/-115.172800,36.114700;-115.158000,36.172700?overview=full&geometries=polyline6"
        );
    }

    #[test]
    fn test_success_response_decodes_first_route() {
        let response = parse(
            r#"{
                "code": "Ok",
                "routes": [
                    {"geometry": "_p~iF~ps|U_ulLnnqC_mqNvxq`@", "distance": 523400.5, "duration": 21000.0},
                    {"geometry": "??", "distance": 1.0, "duration": 1.0}
                ],
                "waypoints": []
            }"#,
        );
        let route = response.into_route(PolylineMode::CLASSIC).unwrap();
        assert_eq!(route.polyline.len(), 3);
        assert_eq!(route.distance_m, 523400.5);
        assert_eq!(route.duration_s, 21000.0);
    }

    #[test]
    fn test_no_route_code() {
        let response = parse(r#"{"code": "NoRoute", "message": "Impossible route between points"}"#);
        assert_eq!(response.into_route(PolylineMode::CLASSIC), Err(RouteError::NoRoute));
    }

    #[test]
    fn test_empty_routes() {
        let response = parse(r#"{"code": "Ok", "routes": []}"#);
        assert_eq!(response.into_route(PolylineMode::CLASSIC), Err(RouteError::NoRoute));
    }

    #[test]
    fn test_service_error_keeps_message() {
        let response = parse(r#"{"code": "InvalidQuery", "message": "Query string malformed"}"#);
        assert_eq!(
            response.into_route(PolylineMode::CLASSIC),
            Err(RouteError::Service {
                code: "InvalidQuery".to_string(),
                message: Some("Query string malformed".to_string()),
            })
        );
    }

    #[test]
    fn test_malformed_geometry_is_terminal() {
        let response = parse(
            r#"{"code": "Ok", "routes": [{"geometry": "_p~iF~ps|U_", "distance": 1.0, "duration": 1.0}]}"#,
        );
        assert_eq!(
            response.into_route(PolylineMode::CLASSIC),
            Err(RouteError::Geometry(DecodeError::Truncated { offset: 11 }))
        );
    }

    #[test]
    fn test_config_deserialises_with_defaults() {
        let config: OsrmConfig =
            serde_json::from_str(r#"{"base_url": "http://osrm:5000", "geometry": "polyline"}"#).unwrap();
        assert_eq!(config.base_url, "http://osrm:5000");
        assert_eq!(config.profile, "driving");
        assert_eq!(config.geometry.mode(), PolylineMode::CLASSIC);
    }
}
