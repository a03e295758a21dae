//! Polyline representation and encoded-polyline codecs for route geometries.
//!
//! Routing services ship geometry as compact ASCII strings of zigzagged,
//! 5-bit chunked coordinate deltas. Two variants are supported and the caller
//! always picks one through [`PolylineMode`]; they share too much of their
//! alphabet to be told apart from content.
//!
//! - [`classic`]: the Google/OSRM format, precision fixed out of band
//!   (1e-5 by default, 1e-6 for OSRM's `polyline6`).
//! - [`flexible`]: the HERE format, whose header carries its own precision
//!   and an optional third dimension.
//!
//! Encoded streams are always latitude first. Decoded points are
//! [`Coordinate`]s, so callers never see an ambiguous `(f64, f64)`.

pub mod classic;
pub mod flexible;
mod varint;

use serde::{Deserialize, Serialize};

use crate::bounds::{BoundingBox, EmptyInputError, compute_bounds};
use crate::coordinate::{Coordinate, CoordinateError};

/// Largest supported decimal precision. `180 * 10^15` still fits an `i64`.
pub const MAX_PRECISION: u32 = 15;

/// Precision of the classic encoding used by Google and OSRM `polyline`.
pub const DEFAULT_PRECISION: u32 = 5;

/// Selects the encoded polyline variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolylineMode {
    /// Fixed precision known to both sides, in decimal digits.
    Classic { precision: u32 },
    /// Self-describing header. Encoding in this mode writes a 2D stream at
    /// [`DEFAULT_PRECISION`]; use [`flexible::encode`] for anything else.
    Flexible,
}

impl PolylineMode {
    pub const CLASSIC: Self = Self::Classic {
        precision: DEFAULT_PRECISION,
    };

    /// OSRM's `geometries=polyline6`.
    pub const CLASSIC6: Self = Self::Classic { precision: 6 };
}

impl Default for PolylineMode {
    fn default() -> Self {
        Self::CLASSIC
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid byte 0x{byte:02x} at offset {offset}")]
    InvalidByte { offset: usize, byte: u8 },

    #[error("encoded polyline ends mid-value at offset {offset}")]
    Truncated { offset: usize },

    #[error("encoded value overflows 64 bits")]
    Overflow,

    #[error("decoded point {index} is invalid: {source}")]
    OutOfRange {
        index: usize,
        #[source]
        source: CoordinateError,
    },

    #[error("precision {0} exceeds the supported maximum of {max}", max = MAX_PRECISION)]
    InvalidPrecision(u32),

    #[error("flexible polyline has no header")]
    MissingHeader,

    #[error("unsupported flexible polyline version {0}")]
    UnsupportedVersion(u64),

    #[error("reserved third dimension type {0}")]
    ReservedThirdDimension(u8),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    #[error("precision {0} exceeds the supported maximum of {max}", max = MAX_PRECISION)]
    InvalidPrecision(u32),

    #[error("third dimension has {actual} values, expected {expected}")]
    ThirdDimensionMismatch { expected: usize, actual: usize },

    #[error("third dimension value {0} cannot be encoded")]
    ThirdDimensionOutOfRange(f64),
}

/// A route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decodes `encoded` with the given variant.
    pub fn decode(encoded: &str, mode: PolylineMode) -> Result<Self, DecodeError> {
        decode(encoded, mode)
    }

    /// Encodes the points with the given variant.
    pub fn encode(&self, mode: PolylineMode) -> Result<String, EncodeError> {
        encode(&self.points, mode)
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in geometry order (`[lon, lat]`), as GeoJSON expects.
    pub fn xy_coordinates(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(Coordinate::xy).collect()
    }

    /// Bounding box of the geometry; fails on an empty polyline.
    pub fn bounds(&self) -> Result<BoundingBox, EmptyInputError> {
        compute_bounds(&self.points)
    }
}

impl FromIterator<Coordinate> for Polyline {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Decodes an encoded polyline.
///
/// An empty string is an empty polyline in either mode. Any malformed value
/// fails the whole decode; no partial geometry is returned.
pub fn decode(encoded: &str, mode: PolylineMode) -> Result<Polyline, DecodeError> {
    let polyline = match mode {
        PolylineMode::Classic { precision } => classic::decode(encoded, precision)?,
        PolylineMode::Flexible if encoded.is_empty() => Polyline::default(),
        PolylineMode::Flexible => flexible::decode(encoded)?.polyline,
    };
    tracing::debug!(?mode, points = polyline.len(), "decoded polyline");
    Ok(polyline)
}

/// Encodes points so that [`decode`] with the same mode reproduces them to
/// within the mode's precision.
pub fn encode(points: &[Coordinate], mode: PolylineMode) -> Result<String, EncodeError> {
    match mode {
        PolylineMode::Classic { precision } => classic::encode(points, precision),
        PolylineMode::Flexible => flexible::encode(points, None, flexible::Header::default()),
    }
}

/// `10^precision` as a float divisor.
fn scale(precision: u32) -> Option<f64> {
    (precision <= MAX_PRECISION).then(|| 10f64.powi(precision as i32))
}
