//! Power-of-two tile grids
//!
//! At zoom level `z` the world is split into `2^z` × `2^z` tiles, numbered
//! from the north-west corner. Tiles can be grouped into square regions,
//! subdivided into the next zoom level, and named by quad keys.

pub mod coordinate;
pub mod iter;
pub mod quadkey;

pub use coordinate::{GridCoordinate, RegionCoordinate, RegionTiles, TileCoordinate};
pub use iter::{grid_iter, GridIter};

use crate::error::{Error, Result};

/// Deepest zoom level a quad key or configuration may name
pub const MAX_ZOOM: u8 = 30;

/// Largest region size, as log2 of tiles per row (16 tiles per row)
pub const MAX_LOG_TILES_PER_ROW: u8 = 4;

/// Number of tiles along one edge of the world at `zoom`.
///
/// Saturates at `i64::MAX` for zoom levels past 62.
pub fn grid_size(zoom: u8) -> i64 {
    1i64.checked_shl(u32::from(zoom))
        .filter(|n| *n > 0)
        .unwrap_or(i64::MAX)
}

/// Rejects zoom levels deeper than [`MAX_ZOOM`]
pub fn check_zoom(zoom: u8) -> Result<u8> {
    if zoom > MAX_ZOOM {
        return Err(Error::InvalidZoom(zoom));
    }
    Ok(zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size() {
        assert_eq!(grid_size(0), 1);
        assert_eq!(grid_size(1), 2);
        assert_eq!(grid_size(10), 1024);
        assert_eq!(grid_size(MAX_ZOOM), 1 << 30);
    }

    #[test]
    fn test_grid_size_saturates() {
        assert_eq!(grid_size(62), 1 << 62);
        assert_eq!(grid_size(63), i64::MAX);
        assert_eq!(grid_size(64), i64::MAX);
        assert_eq!(grid_size(u8::MAX), i64::MAX);
    }

    #[test]
    fn test_check_zoom() {
        assert_eq!(check_zoom(0).unwrap(), 0);
        assert_eq!(check_zoom(MAX_ZOOM).unwrap(), MAX_ZOOM);
        assert!(matches!(check_zoom(MAX_ZOOM + 1), Err(Error::InvalidZoom(31))));
        assert!(matches!(check_zoom(u8::MAX), Err(Error::InvalidZoom(255))));
    }
}
