//! Nominatim HTTP adapter for place-name lookup.
//!
//! See <https://nominatim.org/release-docs/latest/api/Search/>.

use serde::Deserialize;

use crate::coordinate::Coordinate;
use crate::traits::{GeocodeError, Geocoder};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let url = self.search_url();
        tracing::debug!(%url, query, "geocoding");

        let places = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("limit", "1"), ("q", query)])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<Place>>())
            .map_err(|err| {
                tracing::warn!(%url, query, error = %err, "geocoding request failed");
                GeocodeError::Network {
                    url: url.clone(),
                    message: err.to_string(),
                }
            })?;

        first_position(query, places)
    }
}

/// One search hit. Nominatim serialises coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

fn first_position(query: &str, places: Vec<Place>) -> Result<Coordinate, GeocodeError> {
    let place = places.into_iter().next().ok_or_else(|| GeocodeError::NotFound {
        query: query.to_string(),
    })?;

    let invalid = |message: String| GeocodeError::InvalidPosition {
        query: query.to_string(),
        message,
    };
    let lat = place
        .lat
        .trim()
        .parse::<f64>()
        .map_err(|err| invalid(format!("lat {:?}: {err}", place.lat)))?;
    let lon = place
        .lon
        .trim()
        .parse::<f64>()
        .map_err(|err| invalid(format!("lon {:?}: {err}", place.lon)))?;
    let position = Coordinate::new(lat, lon).map_err(|err| invalid(err.to_string()))?;

    tracing::debug!(
        query,
        name = place.display_name.as_deref().unwrap_or_default(),
        lat,
        lon,
        "geocoded"
    );
    Ok(position)
}
