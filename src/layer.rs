//! Map layer built from a planned route.
//!
//! The layer is a vector layer holding GeoJSON features: the route line and
//! one point per endpoint. All positions are written `[lon, lat]`.

use std::fmt;

use serde::Serialize;

use crate::coordinate::Coordinate;
use crate::polyline::Polyline;
use crate::traits::Route;

pub const ROUTE_LAYER_ID: &str = "routeLayer";
pub const ROUTE_LAYER_NAME: &str = "Route";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLayer {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    kind: LayerKind,
    pub visibility: bool,
    pub features: Vec<Feature>,
    pub style: LayerStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
enum LayerKind {
    Vector,
}

impl RouteLayer {
    /// Route line first, then the start and end markers.
    pub fn new(route_line: &Polyline, start: Coordinate, end: Coordinate) -> Self {
        Self {
            id: ROUTE_LAYER_ID.to_string(),
            name: ROUTE_LAYER_NAME.to_string(),
            kind: LayerKind::Vector,
            visibility: true,
            features: vec![
                Feature::new(
                    Geometry::LineString {
                        coordinates: route_line.xy_coordinates(),
                    },
                    FeatureRole::Route,
                ),
                Feature::new(
                    Geometry::Point {
                        coordinates: start.xy(),
                    },
                    FeatureRole::Start,
                ),
                Feature::new(
                    Geometry::Point {
                        coordinates: end.xy(),
                    },
                    FeatureRole::End,
                ),
            ],
            style: LayerStyle::default(),
        }
    }

    pub fn with_style(mut self, style: LayerStyle) -> Self {
        self.style = style;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: FeatureKind,
    pub geometry: Geometry,
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
enum FeatureKind {
    Feature,
}

impl Feature {
    fn new(geometry: Geometry, role: FeatureRole) -> Self {
        Self {
            kind: FeatureKind::Feature,
            geometry,
            properties: FeatureProperties { role },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString { coordinates: Vec<[f64; 2]> },
    Point { coordinates: [f64; 2] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureProperties {
    pub role: FeatureRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureRole {
    Route,
    Start,
    End,
}

/// Stroke for the line, fill and radius for the markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStyle {
    pub weight: f64,
    pub opacity: f64,
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub radius: f64,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            weight: 4.0,
            opacity: 1.0,
            color: "blue".to_string(),
            fill_color: "red".to_string(),
            fill_opacity: 1.0,
            radius: 6.0,
        }
    }
}

/// One-line description of a found route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_min: f64,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            distance_km: route.distance_km(),
            duration_min: route.duration_min(),
        }
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Route found! Distance: {:.2} km, Duration: {:.0} minutes",
            self.distance_km, self.duration_min
        )
    }
}
