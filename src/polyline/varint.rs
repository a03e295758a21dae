//! 5-bit chunked varints and zigzag mapping shared by both encodings.
//!
//! Digits are 6-bit values: the low 5 bits carry data, least significant
//! chunk first, and `0x20` marks that another chunk follows.

use super::DecodeError;

const CONTINUATION: u8 = 0x20;
const CHUNK_MASK: u64 = 0x1f;

/// Splits a digit stream into unsigned values.
pub(super) fn split(digits: &[u8]) -> Result<Vec<u64>, DecodeError> {
    let mut values = Vec::new();
    let mut acc: u64 = 0;
    let mut shift: u32 = 0;

    for &digit in digits {
        let chunk = u64::from(digit) & CHUNK_MASK;
        if shift >= u64::BITS || (chunk << shift) >> shift != chunk {
            return Err(DecodeError::Overflow);
        }
        acc |= chunk << shift;

        if digit & CONTINUATION == 0 {
            values.push(acc);
            acc = 0;
            shift = 0;
        } else {
            shift += 5;
        }
    }

    if shift > 0 {
        return Err(DecodeError::Truncated {
            offset: digits.len(),
        });
    }
    Ok(values)
}

/// Appends `value` as digits, mapping each through `to_char`.
pub(super) fn push(out: &mut String, mut value: u64, to_char: impl Fn(u8) -> char) {
    while value > CHUNK_MASK {
        out.push(to_char((value & CHUNK_MASK) as u8 | CONTINUATION));
        value >>= 5;
    }
    out.push(to_char(value as u8));
}

pub(super) fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

pub(super) fn unzigzag(value: u64) -> i64 {
    let half = (value >> 1) as i64;
    if value & 1 == 1 { !half } else { half }
}

/// Adds a decoded delta to a running accumulator.
pub(super) fn accumulate(acc: &mut i64, encoded: u64) -> Result<i64, DecodeError> {
    *acc = acc
        .checked_add(unzigzag(encoded))
        .ok_or(DecodeError::Overflow)?;
    Ok(*acc)
}
