//! Classic encoded polyline (Google, OSRM `polyline`/`polyline6`).
//!
//! Each digit is a printable byte offset by 63 (`'?'`), so the alphabet is
//! `'?'..='~'`. Values alternate latitude, longitude as deltas from the
//! previous point.

use super::varint;
use super::{DecodeError, EncodeError, Polyline, scale};
use crate::coordinate::Coordinate;

const OFFSET: u8 = 63;

/// Decodes a classic polyline at `precision` decimal digits.
pub fn decode(encoded: &str, precision: u32) -> Result<Polyline, DecodeError> {
    let factor = scale(precision).ok_or(DecodeError::InvalidPrecision(precision))?;

    let digits = encoded
        .bytes()
        .enumerate()
        .map(|(offset, byte)| match byte {
            b'?'..=b'~' => Ok(byte - OFFSET),
            _ => Err(DecodeError::InvalidByte { offset, byte }),
        })
        .collect::<Result<Vec<u8>, _>>()?;

    let values = varint::split(&digits)?;
    if values.len() % 2 != 0 {
        // A latitude without its longitude.
        return Err(DecodeError::Truncated {
            offset: encoded.len(),
        });
    }

    let (mut lat_acc, mut lon_acc) = (0i64, 0i64);
    values
        .chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| {
            let lat = varint::accumulate(&mut lat_acc, pair[0])?;
            let lon = varint::accumulate(&mut lon_acc, pair[1])?;
            Coordinate::new(lat as f64 / factor, lon as f64 / factor)
                .map_err(|source| DecodeError::OutOfRange { index, source })
        })
        .collect()
}

/// Encodes points at `precision` decimal digits.
pub fn encode(points: &[Coordinate], precision: u32) -> Result<String, EncodeError> {
    let factor = scale(precision).ok_or(EncodeError::InvalidPrecision(precision))?;

    let mut out = String::with_capacity(points.len() * 8);
    let (mut prev_lat, mut prev_lon) = (0i64, 0i64);
    for point in points {
        let lat = (point.lat() * factor).round() as i64;
        let lon = (point.lon() * factor).round() as i64;
        varint::push(&mut out, varint::zigzag(lat - prev_lat), to_char);
        varint::push(&mut out, varint::zigzag(lon - prev_lon), to_char);
        prev_lat = lat;
        prev_lon = lon;
    }
    Ok(out)
}

fn to_char(digit: u8) -> char {
    char::from(digit + OFFSET)
}
