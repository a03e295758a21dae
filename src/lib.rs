//! route-planner core
//!
//! Resolves place names, fetches a driving route, decodes its encoded
//! polyline and turns it into a map layer with a viewport extent.

pub mod bounds;
pub mod coordinate;
pub mod geocode;
pub mod layer;
pub mod osrm;
pub mod planner;
pub mod polyline;
pub mod traits;

pub use bounds::{BoundingBox, EmptyInputError, compute_bounds};
pub use coordinate::{Coordinate, CoordinateError};
pub use planner::{PlanError, PlannedRoute, RoutePlanner};
pub use polyline::{DecodeError, EncodeError, Polyline, PolylineMode, decode, encode};
