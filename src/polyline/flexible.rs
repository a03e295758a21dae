//! Flexible polyline (HERE routing API).
//!
//! Digits come from the URL-safe base64 alphabet. The stream opens with a
//! format version and a header describing precision and an optional third
//! dimension, then carries `lat, lon[, z]` deltas per point.

use super::varint;
use super::{DEFAULT_PRECISION, DecodeError, EncodeError, MAX_PRECISION, Polyline, scale};
use crate::coordinate::Coordinate;

pub const FORMAT_VERSION: u64 = 1;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Largest scaled third-dimension value we accept; keeps deltas inside `i64`.
const MAX_SCALED: f64 = (1u64 << 61) as f64;

/// Meaning of the optional third value carried with each point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThirdDimension {
    Absent,
    Level,
    Altitude,
    Elevation,
    Custom1,
    Custom2,
}

impl ThirdDimension {
    fn from_bits(bits: u8) -> Result<Self, DecodeError> {
        match bits {
            0 => Ok(Self::Absent),
            1 => Ok(Self::Level),
            2 => Ok(Self::Altitude),
            3 => Ok(Self::Elevation),
            6 => Ok(Self::Custom1),
            7 => Ok(Self::Custom2),
            other => Err(DecodeError::ReservedThirdDimension(other)),
        }
    }

    fn bits(self) -> u64 {
        match self {
            Self::Absent => 0,
            Self::Level => 1,
            Self::Altitude => 2,
            Self::Elevation => 3,
            Self::Custom1 => 6,
            Self::Custom2 => 7,
        }
    }

    pub fn is_present(self) -> bool {
        self != Self::Absent
    }
}

/// Header of a flexible polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Decimal digits kept for latitude and longitude.
    pub precision: u32,
    pub third_dimension: ThirdDimension,
    /// Decimal digits kept for the third dimension.
    pub third_dimension_precision: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl Header {
    /// A 2D header.
    pub fn new(precision: u32) -> Self {
        Self {
            precision,
            third_dimension: ThirdDimension::Absent,
            third_dimension_precision: 0,
        }
    }

    pub fn with_third_dimension(mut self, kind: ThirdDimension, precision: u32) -> Self {
        self.third_dimension = kind;
        self.third_dimension_precision = precision;
        self
    }

    fn to_bits(self) -> Result<u64, EncodeError> {
        for precision in [self.precision, self.third_dimension_precision] {
            if precision > MAX_PRECISION {
                return Err(EncodeError::InvalidPrecision(precision));
            }
        }
        Ok(u64::from(self.third_dimension_precision) << 7
            | self.third_dimension.bits() << 4
            | u64::from(self.precision))
    }

    fn from_bits(bits: u64) -> Result<Self, DecodeError> {
        Ok(Self {
            precision: (bits & 0xf) as u32,
            third_dimension: ThirdDimension::from_bits(((bits >> 4) & 0x7) as u8)?,
            third_dimension_precision: ((bits >> 7) & 0xf) as u32,
        })
    }

    fn dimensions(self) -> usize {
        if self.third_dimension.is_present() { 3 } else { 2 }
    }
}

/// A decoded flexible polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub header: Header,
    pub polyline: Polyline,
    /// One value per point when the header declares a third dimension.
    pub third_dimension: Option<Vec<f64>>,
}

/// Decodes a flexible polyline, header included.
pub fn decode(encoded: &str) -> Result<Decoded, DecodeError> {
    let digits = encoded
        .bytes()
        .enumerate()
        .map(|(offset, byte)| {
            digit_of(byte).ok_or(DecodeError::InvalidByte { offset, byte })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    let values = varint::split(&digits)?;
    let (version, header_bits, body) = match values.as_slice() {
        [version, header, body @ ..] => (*version, *header, body),
        _ => return Err(DecodeError::MissingHeader),
    };
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let header = Header::from_bits(header_bits)?;
    // Precision fields are 4 bits wide, so scale() cannot fail here.
    let factor = scale(header.precision).ok_or(DecodeError::InvalidPrecision(header.precision))?;
    let third_factor = scale(header.third_dimension_precision)
        .ok_or(DecodeError::InvalidPrecision(header.third_dimension_precision))?;

    let dims = header.dimensions();
    if body.len() % dims != 0 {
        return Err(DecodeError::Truncated {
            offset: encoded.len(),
        });
    }

    let mut acc = [0i64; 3];
    let mut points = Vec::with_capacity(body.len() / dims);
    let mut third = header
        .third_dimension
        .is_present()
        .then(|| Vec::with_capacity(body.len() / dims));

    for (index, tuple) in body.chunks_exact(dims).enumerate() {
        let lat = varint::accumulate(&mut acc[0], tuple[0])?;
        let lon = varint::accumulate(&mut acc[1], tuple[1])?;
        let point = Coordinate::new(lat as f64 / factor, lon as f64 / factor)
            .map_err(|source| DecodeError::OutOfRange { index, source })?;
        points.push(point);

        if let Some(third) = third.as_mut() {
            let z = varint::accumulate(&mut acc[2], tuple[2])?;
            third.push(z as f64 / third_factor);
        }
    }

    Ok(Decoded {
        header,
        polyline: Polyline::new(points),
        third_dimension: third,
    })
}

/// Encodes points under `header`.
///
/// `third_dimension` must hold one value per point exactly when the header
/// declares a third dimension.
pub fn encode(
    points: &[Coordinate],
    third_dimension: Option<&[f64]>,
    header: Header,
) -> Result<String, EncodeError> {
    let header_bits = header.to_bits()?;
    let expected = if header.third_dimension.is_present() {
        points.len()
    } else {
        0
    };
    let actual = third_dimension.map_or(0, <[f64]>::len);
    if expected != actual || (third_dimension.is_some() && !header.third_dimension.is_present()) {
        return Err(EncodeError::ThirdDimensionMismatch { expected, actual });
    }

    let factor = 10f64.powi(header.precision as i32);
    let third_factor = 10f64.powi(header.third_dimension_precision as i32);

    let mut out = String::with_capacity(4 + points.len() * 10);
    varint::push(&mut out, FORMAT_VERSION, to_char);
    varint::push(&mut out, header_bits, to_char);

    let mut prev = [0i64; 3];
    for (index, point) in points.iter().enumerate() {
        let lat = (point.lat() * factor).round() as i64;
        let lon = (point.lon() * factor).round() as i64;
        varint::push(&mut out, varint::zigzag(lat - prev[0]), to_char);
        varint::push(&mut out, varint::zigzag(lon - prev[1]), to_char);
        prev[0] = lat;
        prev[1] = lon;

        if let Some(values) = third_dimension {
            let value = values[index];
            let scaled = (value * third_factor).round();
            if !scaled.is_finite() || scaled.abs() > MAX_SCALED {
                return Err(EncodeError::ThirdDimensionOutOfRange(value));
            }
            let z = scaled as i64;
            varint::push(&mut out, varint::zigzag(z - prev[2]), to_char);
            prev[2] = z;
        }
    }
    Ok(out)
}

fn digit_of(byte: u8) -> Option<u8> {
    match byte {
        b'A'..=b'Z' => Some(byte - b'A'),
        b'a'..=b'z' => Some(byte - b'a' + 26),
        b'0'..=b'9' => Some(byte - b'0' + 52),
        b'-' => Some(62),
        b'_' => Some(63),
        _ => None,
    }
}

fn to_char(digit: u8) -> char {
    char::from(ALPHABET[usize::from(digit)])
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRANKFURT: &str = "BFoz5xJ67i1B1B7PzIhaxL7Y";

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_alphabet_matches_digit_lookup() {
        for (digit, &byte) in ALPHABET.iter().enumerate() {
            assert_eq!(digit_of(byte), Some(digit as u8));
        }
    }

    #[test]
    fn test_decode_reference_vector() {
        let decoded = decode(FRANKFURT).unwrap();
        assert_eq!(decoded.header, Header::new(5));
        assert_eq!(decoded.third_dimension, None);

        let expected = [
            (50.10228, 8.69821),
            (50.10201, 8.69567),
            (50.10063, 8.69150),
            (50.09878, 8.68752),
        ];
        assert_eq!(decoded.polyline.len(), expected.len());
        for (point, (lat, lon)) in decoded.polyline.points().iter().zip(expected) {
            assert!((point.lat() - lat).abs() < 1e-9);
            assert!((point.lon() - lon).abs() < 1e-9);
        }
    }

    #[test]
    fn test_encode_reference_vector() {
        let points = [
            coord(50.10228, 8.69821),
            coord(50.10201, 8.69567),
            coord(50.10063, 8.69150),
            coord(50.09878, 8.68752),
        ];
        assert_eq!(encode(&points, None, Header::new(5)).unwrap(), FRANKFURT);
    }

    #[test]
    fn test_third_dimension_round_trip() {
        let points = [coord(50.1022829, 8.6982122), coord(50.1020076, 8.6956695)];
        let elevations = [10.5, -3.25];
        let header = Header::new(7).with_third_dimension(ThirdDimension::Elevation, 2);

        let encoded = encode(&points, Some(&elevations[..]), header).unwrap();
        let decoded = decode(&encoded).unwrap();

        assert_eq!(decoded.header, header);
        assert_eq!(decoded.third_dimension, Some(vec![10.5, -3.25]));
        for (a, b) in decoded.polyline.points().iter().zip(&points) {
            assert!((a.lat() - b.lat()).abs() < 1e-7);
            assert!((a.lon() - b.lon()).abs() < 1e-7);
        }
    }

    #[test]
    fn test_header_only_is_empty() {
        let encoded = encode(&[], None, Header::new(5)).unwrap();
        assert_eq!(encoded, "BF");
        assert!(decode(&encoded).unwrap().polyline.is_empty());
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(decode(""), Err(DecodeError::MissingHeader));
        assert_eq!(decode("B"), Err(DecodeError::MissingHeader));
    }

    #[test]
    fn test_unsupported_version() {
        assert_eq!(decode("CF"), Err(DecodeError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_reserved_third_dimension() {
        // Header 0x45: precision 5, third dimension type 4.
        let mut encoded = String::new();
        varint::push(&mut encoded, 1, to_char);
        varint::push(&mut encoded, 0x45, to_char);
        assert_eq!(decode(&encoded), Err(DecodeError::ReservedThirdDimension(4)));
    }

    #[test]
    fn test_rejects_classic_alphabet_bytes() {
        assert_eq!(
            decode("BF?"),
            Err(DecodeError::InvalidByte {
                offset: 2,
                byte: b'?'
            })
        );
    }

    #[test]
    fn test_truncated_value() {
        // 'g' is digit 32: continuation set, no following digit.
        assert_eq!(decode("BFg"), Err(DecodeError::Truncated { offset: 3 }));
    }

    #[test]
    fn test_incomplete_tuple() {
        let encoded = &FRANKFURT[..FRANKFURT.len() - 2];
        assert!(matches!(decode(encoded), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn test_third_dimension_mismatch() {
        let points = [coord(1.0, 2.0)];
        let header = Header::new(5).with_third_dimension(ThirdDimension::Altitude, 0);
        assert_eq!(
            encode(&points, None, header),
            Err(EncodeError::ThirdDimensionMismatch {
                expected: 1,
                actual: 0
            })
        );
        assert_eq!(
            encode(&points, Some(&[1.0][..]), Header::new(5)),
            Err(EncodeError::ThirdDimensionMismatch {
                expected: 0,
                actual: 1
            })
        );
    }

    #[test]
    fn test_rejects_non_finite_third_dimension() {
        let header = Header::new(5).with_third_dimension(ThirdDimension::Level, 0);
        let err = encode(&[coord(1.0, 2.0)], Some(&[f64::NAN][..]), header).unwrap_err();
        assert!(matches!(err, EncodeError::ThirdDimensionOutOfRange(_)));
    }

    #[test]
    fn test_rejects_wide_precision() {
        assert_eq!(
            encode(&[], None, Header::new(16)),
            Err(EncodeError::InvalidPrecision(16))
        );
    }
}
