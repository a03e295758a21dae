//! Place names in, map-ready route out.
//!
//! The planner runs the steps strictly in sequence: geocode start, geocode
//! end, fetch the route, then derive the layer, extent and summary. The first
//! failure ends the attempt.

use crate::bounds::BoundingBox;
use crate::coordinate::Coordinate;
use crate::layer::{RouteLayer, RouteSummary};
use crate::traits::{GeocodeError, Geocoder, Route, RouteError, RouteProvider};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("Please enter both start and end locations.")]
    MissingLocation,

    #[error("Failed to geocode location: {query}")]
    Geocode {
        query: String,
        #[source]
        source: GeocodeError,
    },

    #[error("Unable to draw route. {0}")]
    Route(#[from] RouteError),

    #[error("Unable to draw route. The route has no geometry.")]
    EmptyRoute,
}

/// Everything a map needs to show a route.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    pub start: Coordinate,
    pub end: Coordinate,
    pub route: Route,
    /// Extent of the route line, in [`PlannedRoute::CRS`].
    pub bounds: BoundingBox,
    pub layer: RouteLayer,
    pub summary: RouteSummary,
}

impl PlannedRoute {
    /// Coordinate reference system of `bounds` and the layer geometry.
    pub const CRS: &'static str = "EPSG:4326";
}

#[derive(Debug, Clone)]
pub struct RoutePlanner<G, R> {
    geocoder: G,
    router: R,
}

impl<G, R> RoutePlanner<G, R>
where
    G: Geocoder,
    R: RouteProvider,
{
    pub fn new(geocoder: G, router: R) -> Self {
        Self { geocoder, router }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn plan(&self, start: &str, end: &str) -> Result<PlannedRoute, PlanError> {
        let (start_query, end_query) = (start.trim(), end.trim());
        if start_query.is_empty() || end_query.is_empty() {
            return Err(PlanError::MissingLocation);
        }

        let start = self.locate(start_query)?;
        let end = self.locate(end_query)?;
        let route = self.router.route(start, end)?;

        let bounds = route.polyline.bounds().map_err(|_| PlanError::EmptyRoute)?;
        let layer = RouteLayer::new(&route.polyline, start, end);
        let summary = RouteSummary::from(&route);

        tracing::info!(
            start = start_query,
            end = end_query,
            points = route.polyline.len(),
            distance_km = summary.distance_km,
            duration_min = summary.duration_min,
            "planned route"
        );

        Ok(PlannedRoute {
            start,
            end,
            route,
            bounds,
            layer,
            summary,
        })
    }

    fn locate(&self, query: &str) -> Result<Coordinate, PlanError> {
        self.geocoder
            .geocode(query)
            .map_err(|source| PlanError::Geocode {
                query: query.to_string(),
                source,
            })
    }
}
