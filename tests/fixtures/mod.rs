//! Test fixtures for route-planner.
//!
//! Provides:
//! - Real Las Vegas / Henderson places (from OpenStreetMap)
//! - Stub geocoder and router that record what they were asked

#![allow(dead_code)]

use std::cell::RefCell;

use route_planner::coordinate::Coordinate;
use route_planner::polyline::{self, PolylineMode};
use route_planner::traits::{GeocodeError, Geocoder, Route, RouteError, RouteProvider};

/// A named place with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng).expect("fixture coordinates are valid")
    }
}

pub const BELLAGIO: Place = Place::new("Bellagio", 36.1126, -115.1767);
pub const MGM_GRAND: Place = Place::new("MGM Grand", 36.1023654, -115.1688720);
pub const WYNN: Place = Place::new("Wynn Las Vegas", 36.1263781, -115.1658180);
pub const HENDERSON_PAVILION: Place = Place::new("Henderson Pavilion", 36.0147, -115.0389);

pub const PLACES: &[Place] = &[BELLAGIO, MGM_GRAND, WYNN, HENDERSON_PAVILION];

/// Geocoder backed by [`PLACES`], matching names exactly.
#[derive(Debug, Default)]
pub struct StubGeocoder {
    pub queries: RefCell<Vec<String>>,
    pub failure: Option<GeocodeError>,
}

impl StubGeocoder {
    pub fn failing(error: GeocodeError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        self.queries.borrow_mut().push(query.to_string());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        PLACES
            .iter()
            .find(|place| place.name == query)
            .map(Place::coordinate)
            .ok_or_else(|| GeocodeError::NotFound {
                query: query.to_string(),
            })
    }
}

/// What [`StubRouter`] answers with.
#[derive(Debug, Clone)]
pub enum RouterBehaviour {
    /// Start, a midpoint, end; shipped through the classic codec.
    Direct,
    /// A route whose geometry decodes to nothing.
    EmptyGeometry,
    Fail(RouteError),
}

#[derive(Debug)]
pub struct StubRouter {
    pub behaviour: RouterBehaviour,
    pub requests: RefCell<Vec<(Coordinate, Coordinate)>>,
}

impl StubRouter {
    pub fn new(behaviour: RouterBehaviour) -> Self {
        Self {
            behaviour,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl RouteProvider for StubRouter {
    fn route(&self, start: Coordinate, end: Coordinate) -> Result<Route, RouteError> {
        self.requests.borrow_mut().push((start, end));
        let encoded = match &self.behaviour {
            RouterBehaviour::Fail(error) => return Err(error.clone()),
            RouterBehaviour::EmptyGeometry => String::new(),
            RouterBehaviour::Direct => {
                let mid = Coordinate::new(
                    (start.lat() + end.lat()) / 2.0,
                    (start.lon() + end.lon()) / 2.0,
                )
                .expect("midpoint is valid");
                polyline::encode(&[start, mid, end], PolylineMode::CLASSIC6)
                    .expect("precision 6 is supported")
            }
        };

        Ok(Route {
            polyline: polyline::decode(&encoded, PolylineMode::CLASSIC6)?,
            distance_m: 2_450.0,
            duration_s: 420.0,
        })
    }
}
