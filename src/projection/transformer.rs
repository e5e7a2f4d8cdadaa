use std::f64::consts::{FRAC_PI_2, PI};

use tracing::{trace, warn};

use crate::bbox::{GeographicBB, GridBB, MercatorBB};
use crate::error::Result;
use crate::grid::{grid_size, GridCoordinate, TileCoordinate, MAX_ZOOM};
use crate::projection::coordinate::{CartesianCoordinate, GeographicCoordinate, MercatorCoordinate};
use crate::projection::params::{ProjectionParams, EARTH_RADIUS};

const PI_180: f64 = PI / 180.0;
const PI_360: f64 = PI / 360.0;
const DEG_PER_RAD: f64 = 180.0 / PI;

/// Fractional tile positions closer than this to a tile edge are treated as
/// lying on it
const EDGE_EPSILON: f64 = 1e-6;

fn snap_to_edge(v: f64) -> f64 {
    let edge = v.round();
    if (v - edge).abs() < EDGE_EPSILON {
        edge
    } else {
        v
    }
}

/// Converts between geographic, geocentric, Mercator, and grid coordinates
/// for one set of projection parameters.
///
/// Unset components pass through: converting a coordinate with only a
/// longitude yields a result with only the matching component.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transformer {
    params: ProjectionParams,
}

impl Transformer {
    pub fn new(params: ProjectionParams) -> Self {
        Self { params }
    }

    /// Creates a transformer for the given tile size in pixels
    pub fn with_tile_size(tile_size: f64) -> Result<Self> {
        Ok(Self::new(ProjectionParams::new(tile_size)?))
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Geocentric position of a point above the spheroid.
    ///
    /// Returns `None` unless both longitude and latitude are set.
    pub fn geographic_to_cartesian(&self, coord: &GeographicCoordinate) -> Option<CartesianCoordinate> {
        let (lon, lat) = coord.lon_lat()?;
        let r = EARTH_RADIUS + coord.height;

        let (sin_lon, cos_lon) = (lon * PI_180).sin_cos();
        let (sin_lat, cos_lat) = (lat * PI_180).sin_cos();

        Some(CartesianCoordinate::new(
            r * cos_lat * cos_lon,
            r * cos_lat * sin_lon,
            r * sin_lat,
        ))
    }

    /// Projects a geographic coordinate to spherical Mercator.
    ///
    /// Latitudes of ±90° have no finite Mercator y; clamp to about ±85.0511°
    /// before calling.
    pub fn geographic_to_mercator(&self, coord: &GeographicCoordinate) -> MercatorCoordinate {
        if let Some(lat) = coord.lat {
            if lat.abs() >= 90.0 {
                warn!(lat, "latitude at or beyond the pole has no finite Mercator y");
            }
        }

        let scale = self.params.origin_shift_180();
        MercatorCoordinate::partial(
            coord.lon.map(|lon| lon * scale),
            coord.lat.map(|lat| ((90.0 + lat) * PI_360).tan().ln() / PI_180 * scale),
        )
    }

    /// Inverse of [`Transformer::geographic_to_mercator`]
    pub fn mercator_to_geographic(&self, coord: &MercatorCoordinate) -> GeographicCoordinate {
        let scale = self.params.inv_origin_shift_180();
        GeographicCoordinate::partial(
            coord.x.map(|x| x * scale),
            coord.y.map(|y| (2.0 * (y * scale * PI_180).exp().atan() - FRAC_PI_2) * DEG_PER_RAD),
        )
    }

    /// Fractional tile position, counted from the west and from the south
    fn tile_fraction(&self, meters: f64, zoom: u8) -> f64 {
        let res = self.params.resolution(zoom);
        (meters + self.params.origin_shift()) / res / self.params.tile_size()
    }

    /// The tile containing a Mercator point at `zoom`.
    ///
    /// A point on a tile edge belongs to the tile east and south of it, so
    /// every tile's north-west corner maps back to that tile. Points on the
    /// east and south edges of the world belong to the last column and row.
    /// Returns `None` unless both components are set and finite and `zoom`
    /// is at most [`MAX_ZOOM`].
    pub fn mercator_to_tile(&self, coord: &MercatorCoordinate, zoom: u8) -> Option<TileCoordinate> {
        let (x, y) = coord.xy()?;
        if zoom > MAX_ZOOM {
            return None;
        }

        let fx = self.tile_fraction(x, zoom);
        let fy = self.tile_fraction(y, zoom);
        if !fx.is_finite() || !fy.is_finite() {
            return None;
        }

        let last = (grid_size(zoom) - 1) as f64;
        let tx = snap_to_edge(fx).floor().clamp(0.0, last) as i64;
        let ty = (last + 1.0 - snap_to_edge(fy).ceil()).clamp(0.0, last) as i64;

        trace!(x, y, zoom, tx, ty, "mercator to tile");
        Some(TileCoordinate::new(zoom, tx, ty))
    }

    /// The tile containing a geographic point at `zoom`
    pub fn geographic_to_tile(&self, coord: &GeographicCoordinate, zoom: u8) -> Option<TileCoordinate> {
        self.mercator_to_tile(&self.geographic_to_mercator(coord), zoom)
    }

    /// Mercator position of a tile's north-west corner
    pub fn tile_to_mercator(&self, tile: &TileCoordinate) -> MercatorCoordinate {
        let span = self.params.tile_size() * self.params.resolution(tile.zoom);
        let origin_shift = self.params.origin_shift();

        MercatorCoordinate::new(
            tile.x as f64 * span - origin_shift,
            (grid_size(tile.zoom) as f64 - tile.y as f64) * span - origin_shift,
        )
    }

    /// Geographic position of a tile's north-west corner
    pub fn tile_to_geographic(&self, tile: &TileCoordinate) -> GeographicCoordinate {
        self.mercator_to_geographic(&self.tile_to_mercator(tile))
    }

    /// Geographic footprint of a tile or region.
    ///
    /// Spans from the north-west corner of the (root) tile to the north-west
    /// corner of the tile one full tile or region further south-east.
    pub fn geographic_bounds(&self, coord: impl Into<GridCoordinate>) -> GeographicBB {
        let (root, span) = match coord.into() {
            GridCoordinate::Tile(tile) => (tile, 1),
            GridCoordinate::Region(region) => (region.root_tile(), region.tiles_per_row()),
        };

        let north_west = self.tile_to_geographic(&root);
        let south_east = self.tile_to_geographic(&TileCoordinate::new(root.zoom, root.x.saturating_add(span), root.y.saturating_add(span)));

        GeographicBB::from_corners(
            GeographicCoordinate::partial(north_west.lon, south_east.lat),
            GeographicCoordinate::partial(south_east.lon, north_west.lat),
        )
    }

    /// Projects both corners of a geographic box to Mercator
    pub fn bb_to_mercator(&self, bb: &GeographicBB) -> MercatorBB {
        MercatorBB::new(self.geographic_to_mercator(&bb.min), self.geographic_to_mercator(&bb.max))
    }

    /// Tiles covered by a Mercator box at `zoom`.
    ///
    /// West and north edges are inclusive, east and south edges exclusive,
    /// so a box ending exactly on a tile edge does not pull in the next
    /// tile. A box reaching east of 180° yields `max_x >= 2^zoom`. Returns
    /// `None` unless all four components are set and finite and `zoom` is
    /// at most [`MAX_ZOOM`].
    pub fn bb_to_grid(&self, bb: &MercatorBB, zoom: u8) -> Option<GridBB> {
        let (min_x, min_y) = bb.min.xy()?;
        let (max_x, max_y) = bb.max.xy()?;
        if zoom > MAX_ZOOM {
            return None;
        }

        let n = grid_size(zoom) as f64;
        let fractions = [
            self.tile_fraction(min_x, zoom),
            self.tile_fraction(max_x, zoom),
            n - self.tile_fraction(max_y, zoom),
            n - self.tile_fraction(min_y, zoom),
        ];
        if fractions.iter().any(|f| !f.is_finite()) {
            return None;
        }
        let [west, east, north, south] = fractions.map(snap_to_edge);

        let west = west.floor() as i64;
        let east = (east.ceil() as i64).saturating_sub(1);
        let north = north.floor() as i64;
        let south = (south.ceil() as i64).saturating_sub(1);

        Some(GridBB::new(zoom, west, north, east.max(west), south.max(north)))
    }

    /// Tiles covered by a geographic box at `zoom`
    pub fn geographic_bb_to_grid(&self, bb: &GeographicBB, zoom: u8) -> Option<GridBB> {
        self.bb_to_grid(&self.bb_to_mercator(bb), zoom)
    }

    /// Projects many geographic coordinates to Mercator
    pub fn geographic_to_mercator_many(&self, coords: &[GeographicCoordinate]) -> Vec<MercatorCoordinate> {
        coords.iter().map(|coord| self.geographic_to_mercator(coord)).collect()
    }
}
