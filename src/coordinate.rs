//! Geographic coordinate value type.
//!
//! Routing services hand out `(lat, lng)` pairs while map geometry uses
//! `[x, y] = [lng, lat]`. [`Coordinate`] keeps named fields so the two orders
//! are only ever produced through explicit accessors.

use serde::{Deserialize, Serialize};

/// A validated WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    ///
    /// NaN and infinite values are rejected along with anything outside the
    /// geographic range.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Creates a coordinate from geometry order (`x = lon`, `y = lat`).
    pub fn from_xy(x: f64, y: f64) -> Result<Self, CoordinateError> {
        Self::new(y, x)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Provider order: `(lat, lon)`.
    pub fn lat_lon(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }

    /// Geometry order: `[lon, lat]`.
    pub fn xy(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = CoordinateError;

    /// Interprets the tuple as `(lat, lon)`.
    fn try_from((lat, lon): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(lat, lon)
    }
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}
