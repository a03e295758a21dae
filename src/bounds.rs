//! Axis-aligned bounds of route geometry, used to fit the map viewport.
//!
//! Bounds are in geometry order: `x` is longitude, `y` is latitude.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Smallest rectangle enclosing a set of points.
///
/// Always satisfies `min_x <= max_x` and `min_y <= max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Returned by [`compute_bounds`] when there are no points to bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot compute bounds of an empty coordinate sequence")]
pub struct EmptyInputError;

impl BoundingBox {
    /// The whole WGS84 world, for callers that want a fallback extent.
    pub const WORLD: Self = Self {
        min_x: -180.0,
        min_y: -90.0,
        max_x: 180.0,
        max_y: 90.0,
    };

    /// A degenerate box around a single point.
    pub fn from_point(point: Coordinate) -> Self {
        let [x, y] = point.xy();
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Grows the box to include `point`.
    pub fn extend(&mut self, point: Coordinate) {
        let [x, y] = point.xy();
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// `[minX, minY, maxX, maxY]`, the extent form map widgets take.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center in geometry order (`[x, y]`).
    pub fn center(&self) -> [f64; 2] {
        [
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        ]
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        let [x, y] = point.xy();
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

/// Computes the bounding box of `points` in one pass.
///
/// Empty input is an error rather than an infinite or world-sized box;
/// callers pick their own fallback, e.g. `.unwrap_or(BoundingBox::WORLD)`.
pub fn compute_bounds(points: &[Coordinate]) -> Result<BoundingBox, EmptyInputError> {
    let (first, rest) = points.split_first().ok_or(EmptyInputError)?;
    let mut bounds = BoundingBox::from_point(*first);
    for point in rest {
        bounds.extend(*point);
    }
    Ok(bounds)
}
