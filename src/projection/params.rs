use std::f64::consts::PI;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::grid::grid_size;

/// WGS84 equatorial radius in meters
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Default tile edge length in pixels
pub const DEFAULT_TILE_SIZE: f64 = 256.0;

/// Constants of the spherical Mercator tiling scheme for one tile size.
///
/// Computed once and never mutated; hand a copy to every [`Transformer`]
/// that needs it. Two parameter sets with different tile sizes can be
/// used side by side.
///
/// [`Transformer`]: crate::projection::Transformer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionParams {
    tile_size: f64,
    initial_resolution: f64,
    origin_shift: f64,
    origin_shift_180: f64,
    inv_origin_shift_180: f64,
}

impl ProjectionParams {
    /// Computes the parameter set for the given tile size in pixels
    pub fn new(tile_size: f64) -> Result<Self> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(Error::InvalidTileSize(tile_size));
        }

        Ok(Self::compute(tile_size))
    }

    fn compute(tile_size: f64) -> Self {
        let origin_shift = PI * EARTH_RADIUS;

        Self {
            tile_size,
            initial_resolution: 2.0 * PI * EARTH_RADIUS / tile_size,
            origin_shift,
            origin_shift_180: origin_shift / 180.0,
            inv_origin_shift_180: 180.0 / origin_shift,
        }
    }

    /// Tile edge length in pixels
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Meters per pixel at zoom level 0
    pub fn initial_resolution(&self) -> f64 {
        self.initial_resolution
    }

    /// Half the circumference of the earth in meters
    pub fn origin_shift(&self) -> f64 {
        self.origin_shift
    }

    /// Meters per degree of longitude (`origin_shift / 180`)
    pub fn origin_shift_180(&self) -> f64 {
        self.origin_shift_180
    }

    /// Degrees of longitude per meter (`180 / origin_shift`)
    pub fn inv_origin_shift_180(&self) -> f64 {
        self.inv_origin_shift_180
    }

    /// Meters per pixel at the given zoom level
    pub fn resolution(&self, zoom: u8) -> f64 {
        self.initial_resolution / grid_size(zoom) as f64
    }
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self::compute(DEFAULT_TILE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_params() {
        let params = ProjectionParams::default();
        assert_eq!(params.tile_size(), 256.0);
        assert_relative_eq!(params.initial_resolution(), 156543.03392804097, max_relative = 1e-12);
        assert_relative_eq!(params.origin_shift(), 20037508.342789244, max_relative = 1e-12);
    }

    #[test]
    fn test_new_matches_default() {
        let params = ProjectionParams::new(DEFAULT_TILE_SIZE).unwrap();
        assert_eq!(params, ProjectionParams::default());
    }

    #[test]
    fn test_tile_size_changes_resolution_only() {
        let small = ProjectionParams::new(256.0).unwrap();
        let large = ProjectionParams::new(512.0).unwrap();

        assert_relative_eq!(small.initial_resolution(), 2.0 * large.initial_resolution());
        assert_eq!(small.origin_shift(), large.origin_shift());
    }

    #[test]
    fn test_resolution_halves_per_zoom() {
        let params = ProjectionParams::default();
        assert_relative_eq!(params.resolution(0), params.initial_resolution());
        assert_relative_eq!(params.resolution(3), params.initial_resolution() / 8.0);
    }

    #[test]
    fn test_reciprocal_constants() {
        let params = ProjectionParams::default();
        assert_relative_eq!(params.origin_shift_180() * params.inv_origin_shift_180(), 1.0);
    }

    #[test]
    fn test_invalid_tile_size() {
        assert!(matches!(ProjectionParams::new(0.0), Err(Error::InvalidTileSize(_))));
        assert!(matches!(ProjectionParams::new(-256.0), Err(Error::InvalidTileSize(_))));
        assert!(ProjectionParams::new(f64::NAN).is_err());
        assert!(ProjectionParams::new(f64::INFINITY).is_err());
    }
}
