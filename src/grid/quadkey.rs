//! Quad-tree keys
//!
//! A quad key interleaves the bits of a grid position into one base-4 digit
//! per zoom level, most significant first: bit `i` of x contributes 1 and
//! bit `i` of y contributes 2. A key's length is its zoom level, and a key
//! is a prefix of the keys of all positions it covers at deeper zooms.

use crate::error::{Error, Result};
use super::MAX_ZOOM;

/// Encodes a grid position as a quad key.
///
/// Digits for bits beyond the width of `i64` are `0`.
pub fn encode(zoom: u8, x: i64, y: i64) -> String {
    let mut key = String::with_capacity(zoom as usize);

    for i in (1..=zoom).rev() {
        let mask = 1i64.checked_shl(u32::from(i - 1)).unwrap_or(0);
        let mut digit = b'0';
        if x & mask != 0 {
            digit += 1;
        }
        if y & mask != 0 {
            digit += 2;
        }
        key.push(digit as char);
    }

    key
}

/// Decodes a quad key into `(zoom, x, y)`
pub fn decode(key: &str) -> Result<(u8, i64, i64)> {
    if key.len() > MAX_ZOOM as usize {
        return Err(Error::InvalidQuadKey(key.to_string()));
    }

    let mut x = 0i64;
    let mut y = 0i64;

    for c in key.chars() {
        let digit = match c {
            '0'..='3' => c as i64 - '0' as i64,
            _ => return Err(Error::InvalidQuadKey(key.to_string())),
        };
        x = (x << 1) | (digit & 1);
        y = (y << 1) | (digit >> 1);
    }

    Ok((key.len() as u8, x, y))
}
