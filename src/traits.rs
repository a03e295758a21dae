//! Seams between the planner and the external services it talks to.
//!
//! Concrete HTTP adapters live in [`crate::geocode`] and [`crate::osrm`];
//! tests and embedding apps can supply their own implementations.

use crate::coordinate::Coordinate;
use crate::polyline::{DecodeError, Polyline};

/// Resolves a free-text place name to a position.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Coordinate, GeocodeError>;
}

/// Computes a driving route between two positions.
pub trait RouteProvider {
    fn route(&self, start: Coordinate, end: Coordinate) -> Result<Route, RouteError>;
}

/// A route as returned by a routing service, geometry already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub polyline: Polyline,
    /// Length in meters.
    pub distance_m: f64,
    /// Travel time in seconds.
    pub duration_s: f64,
}

impl Route {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_s / 60.0
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeocodeError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Location not found: {query}")]
    NotFound { query: String },

    #[error("geocoder returned an invalid position for {query}: {message}")]
    InvalidPosition { query: String, message: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("routing service answered {code}: {}", .message.as_deref().unwrap_or("no message"))]
    Service {
        code: String,
        message: Option<String>,
    },

    #[error("No routes found.")]
    NoRoute,

    #[error("route geometry could not be decoded: {0}")]
    Geometry(#[from] DecodeError),
}
