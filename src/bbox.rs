//! Axis-aligned bounding boxes in geographic, Mercator, and grid space
//!
//! Every single-result intersection returns `None` when the boxes do not
//! overlap. Unset coordinate components are treated as unbounded on that
//! side, so a box that only constrains latitude intersects on latitude
//! alone.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::grid::{grid_size, GridIter, TileCoordinate};
use crate::projection::{GeographicCoordinate, MercatorCoordinate};

/// Longitude of the antimeridian in degrees
const ANTIMERIDIAN: f64 = 180.0;

/// `a <= b`, where an unset bound never excludes anything
fn bound_le(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a <= b,
        _ => true,
    }
}

/// Picks the tighter of two bounds, keeping whichever is set
fn tighter(a: Option<f64>, b: Option<f64>, pick: fn(f64, f64) -> f64) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (a, b) => a.or(b),
    }
}

/// Whether `[a_min, a_max]` and `[b_min, b_max]` overlap
fn ranges_overlap(a_min: Option<f64>, a_max: Option<f64>, b_min: Option<f64>, b_max: Option<f64>) -> bool {
    bound_le(a_min, b_max) && bound_le(b_min, a_max)
}

/// A box bounded by two WGS84 coordinates.
///
/// A box straddling the antimeridian is written with `max.lon > 180`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeographicBB {
    pub min: GeographicCoordinate,
    pub max: GeographicCoordinate,
}

impl GeographicBB {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min: GeographicCoordinate::new(min_lon, min_lat),
            max: GeographicCoordinate::new(max_lon, max_lat),
        }
    }

    pub fn from_corners(min: GeographicCoordinate, max: GeographicCoordinate) -> Self {
        Self { min, max }
    }

    /// Overlap of two boxes.
    ///
    /// If the boxes are disjoint and this box runs past the antimeridian,
    /// its part east of 180° is moved to `[-180, max.lon - 360]` and the
    /// test is repeated.
    pub fn intersection(&self, other: &GeographicBB) -> Option<GeographicBB> {
        let intersects = ranges_overlap(self.min.lon, self.max.lon, other.min.lon, other.max.lon)
            && ranges_overlap(self.min.lat, self.max.lat, other.min.lat, other.max.lat);

        if intersects {
            return Some(GeographicBB {
                min: GeographicCoordinate::partial(
                    tighter(self.min.lon, other.min.lon, f64::max),
                    tighter(self.min.lat, other.min.lat, f64::max),
                ),
                max: GeographicCoordinate::partial(
                    tighter(self.max.lon, other.max.lon, f64::min),
                    tighter(self.max.lat, other.max.lat, f64::min),
                ),
            });
        }

        match self.max.lon {
            Some(max_lon) if max_lon > ANTIMERIDIAN && max_lon.is_finite() => {
                trace!(max_lon, "retrying geographic intersection west of the antimeridian");
                let wrapped = GeographicBB {
                    min: GeographicCoordinate::partial(Some(-ANTIMERIDIAN), self.min.lat),
                    max: GeographicCoordinate::partial(Some(max_lon - 360.0), self.max.lat),
                };
                wrapped.intersection(other)
            }
            _ => None,
        }
    }

    /// Midpoint of the longitude and latitude ranges.
    ///
    /// No antimeridian correction is applied.
    pub fn center(&self) -> GeographicCoordinate {
        let mid = |min: Option<f64>, max: Option<f64>| Some(min? + (max? - min?) / 2.0);
        GeographicCoordinate::partial(mid(self.min.lon, self.max.lon), mid(self.min.lat, self.max.lat))
    }
}

impl fmt::Display for GeographicBB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<geographic min: {}, max: {}>", self.min, self.max)
    }
}

/// A box bounded by two spherical Mercator coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MercatorBB {
    pub min: MercatorCoordinate,
    pub max: MercatorCoordinate,
}

impl MercatorBB {
    pub fn new(min: MercatorCoordinate, max: MercatorCoordinate) -> Self {
        Self { min, max }
    }

    /// Overlap of two boxes
    pub fn intersection(&self, other: &MercatorBB) -> Option<MercatorBB> {
        let intersects = ranges_overlap(self.min.x, self.max.x, other.min.x, other.max.x)
            && ranges_overlap(self.min.y, self.max.y, other.min.y, other.max.y);

        if !intersects {
            return None;
        }

        Some(MercatorBB {
            min: MercatorCoordinate::partial(
                tighter(self.min.x, other.min.x, f64::max),
                tighter(self.min.y, other.min.y, f64::max),
            ),
            max: MercatorCoordinate::partial(
                tighter(self.max.x, other.max.x, f64::min),
                tighter(self.max.y, other.max.y, f64::min),
            ),
        })
    }
}

impl fmt::Display for MercatorBB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<mercator min: {}, max: {}>", self.min, self.max)
    }
}

/// An inclusive block of tiles at one zoom level.
///
/// `max_x` may reach past the east edge of the world (`>= 2^zoom`); such a
/// box continues at column 0, which is how a view crossing the antimeridian
/// is expressed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBB {
    pub zoom: u8,
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl GridBB {
    pub fn new(zoom: u8, min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        Self { zoom, min_x, min_y, max_x, max_y }
    }

    /// The whole world at `zoom`
    pub fn world(zoom: u8) -> Self {
        let last = grid_size(zoom) - 1;
        Self::new(zoom, 0, 0, last, last)
    }

    /// Whether the box runs past the east edge of the world
    pub fn wraps(&self) -> bool {
        self.max_x >= grid_size(self.zoom)
    }

    /// Direct rectangular overlap, without wraparound
    pub fn intersection(&self, other: &GridBB) -> Option<GridBB> {
        let intersects = self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y;

        if !intersects {
            return None;
        }

        Some(GridBB::new(
            self.zoom,
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        ))
    }

    /// All disjoint overlaps with `other`, honoring wraparound.
    ///
    /// The direct overlap comes first. When this box wraps, the part past
    /// the east edge is remapped to `[0, max_x mod 2^zoom]` and its overlap
    /// is appended, so the result holds zero, one, or two boxes.
    pub fn intersections(&self, other: &GridBB) -> Vec<GridBB> {
        let mut result = Vec::with_capacity(2);

        if let Some(direct) = self.intersection(other) {
            result.push(direct);
        }

        if self.wraps() {
            let remapped = GridBB::new(
                self.zoom,
                0,
                self.min_y,
                self.max_x.rem_euclid(grid_size(self.zoom)),
                self.max_y,
            );
            debug!(zoom = self.zoom, max_x = self.max_x, remapped_max_x = remapped.max_x, "grid box wraps");

            if let Some(wrapped) = remapped.intersection(other) {
                result.push(wrapped);
            }
        }

        result
    }

    /// Whether `tile` lies in this box, counting the wrapped continuation.
    ///
    /// A tile of a different zoom level is never inside.
    pub fn is_inside(&self, tile: &TileCoordinate) -> bool {
        if tile.zoom != self.zoom {
            return false;
        }

        let n = grid_size(self.zoom);
        let in_rows = (self.min_y..=self.max_y).contains(&tile.y);
        let in_cols = (self.min_x..=self.max_x).contains(&tile.x);
        let in_wrapped = self.max_x > n - 1 && (0..=self.max_x.rem_euclid(n)).contains(&tile.x);

        in_rows && (in_cols || in_wrapped)
    }

    /// Number of columns covered
    pub fn width(&self) -> i64 {
        self.max_x.saturating_sub(self.min_x).saturating_add(1).max(0)
    }

    /// Number of rows covered
    pub fn height(&self) -> i64 {
        self.max_y.saturating_sub(self.min_y).saturating_add(1).max(0)
    }

    /// Tiles of the box in column-major order, without wraparound.
    ///
    /// Run this over the result of [`GridBB::intersections`] with
    /// [`GridBB::world`] to get only tiles that exist.
    pub fn tiles(&self) -> impl ExactSizeIterator<Item = TileCoordinate> + Clone {
        let zoom = self.zoom;
        GridIter::new(self.min_x, self.min_y, self.width())
            .rows(self.height())
            .map(move |(x, y)| TileCoordinate::new(zoom, x, y))
    }
}

impl fmt::Display for GridBB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<tile min: <zoom: {z}, x: {}, y: {}>, max: <zoom: {z}, x: {}, y: {}>>",
            self.min_x,
            self.min_y,
            self.max_x,
            self.max_y,
            z = self.zoom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geographic_intersection() {
        let a = GeographicBB::new(0.0, 0.0, 20.0, 20.0);
        let b = GeographicBB::new(10.0, -5.0, 30.0, 15.0);

        assert_eq!(a.intersection(&b), Some(GeographicBB::new(10.0, 0.0, 20.0, 15.0)));
        assert_eq!(b.intersection(&a), Some(GeographicBB::new(10.0, 0.0, 20.0, 15.0)));
    }

    #[test]
    fn test_geographic_disjoint() {
        let a = GeographicBB::new(0.0, 0.0, 10.0, 10.0);
        let b = GeographicBB::new(20.0, 0.0, 30.0, 10.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn test_geographic_touching_edges_intersect() {
        let a = GeographicBB::new(0.0, 0.0, 10.0, 10.0);
        let b = GeographicBB::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(a.intersection(&b), Some(GeographicBB::new(10.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_geographic_antimeridian_retry() {
        // View from 170°E across the seam to 170°W
        let view = GeographicBB::new(170.0, -10.0, 190.0, 10.0);
        let west = GeographicBB::new(-175.0, -5.0, -160.0, 5.0);

        assert_eq!(view.intersection(&west), Some(GeographicBB::new(-175.0, -5.0, -170.0, 5.0)));
    }

    #[test]
    fn test_geographic_antimeridian_direct_hit_preferred() {
        let view = GeographicBB::new(170.0, -10.0, 190.0, 10.0);
        let east = GeographicBB::new(175.0, 0.0, 180.0, 5.0);

        assert_eq!(view.intersection(&east), Some(GeographicBB::new(175.0, 0.0, 180.0, 5.0)));
    }

    #[test]
    fn test_geographic_no_retry_without_wrap() {
        let a = GeographicBB::new(100.0, 0.0, 180.0, 10.0);
        let b = GeographicBB::new(-180.0, 0.0, -170.0, 10.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn test_geographic_infinite_east_edge_stops() {
        let a = GeographicBB::new(170.0, -10.0, f64::INFINITY, 10.0);
        let b = GeographicBB::new(-20.0, 30.0, -10.0, 40.0);
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn test_geographic_partial_box() {
        let lat_band = GeographicBB::from_corners(
            GeographicCoordinate::partial(None, Some(-10.0)),
            GeographicCoordinate::partial(None, Some(10.0)),
        );
        let b = GeographicBB::new(30.0, 5.0, 40.0, 20.0);

        assert_eq!(lat_band.intersection(&b), Some(GeographicBB::new(30.0, 5.0, 40.0, 10.0)));
    }

    #[test]
    fn test_geographic_center() {
        let bb = GeographicBB::new(-10.0, 20.0, 30.0, 40.0);
        assert_eq!(bb.center(), GeographicCoordinate::new(10.0, 30.0));

        let partial = GeographicBB::from_corners(
            GeographicCoordinate::partial(Some(0.0), None),
            GeographicCoordinate::partial(Some(4.0), None),
        );
        assert_eq!(partial.center(), GeographicCoordinate::partial(Some(2.0), None));
    }

    #[test]
    fn test_mercator_intersection() {
        let a = MercatorBB::new(MercatorCoordinate::new(0.0, 0.0), MercatorCoordinate::new(100.0, 100.0));
        let b = MercatorBB::new(MercatorCoordinate::new(50.0, -50.0), MercatorCoordinate::new(150.0, 50.0));
        let c = MercatorBB::new(MercatorCoordinate::new(200.0, 0.0), MercatorCoordinate::new(300.0, 10.0));

        assert_eq!(
            a.intersection(&b),
            Some(MercatorBB::new(MercatorCoordinate::new(50.0, 0.0), MercatorCoordinate::new(100.0, 50.0)))
        );
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_grid_intersection() {
        let a = GridBB::new(3, 0, 0, 4, 4);
        let b = GridBB::new(3, 2, 3, 7, 7);
        let c = GridBB::new(3, 5, 0, 7, 7);

        assert_eq!(a.intersection(&b), Some(GridBB::new(3, 2, 3, 4, 4)));
        assert_eq!(a.intersection(&c), None);
    }

    #[test]
    fn test_grid_wraparound_example() {
        let view = GridBB::new(2, 3, 0, 5, 1);
        let other = GridBB::new(2, 0, 0, 1, 1);

        assert!(view.wraps());
        assert_eq!(view.intersection(&other), None);
        assert_eq!(view.intersections(&other), vec![GridBB::new(2, 0, 0, 1, 1)]);
    }

    #[test]
    fn test_grid_intersections_two_parts() {
        let view = GridBB::new(2, 3, 0, 5, 1);
        let world = GridBB::world(2);

        assert_eq!(
            view.intersections(&world),
            vec![GridBB::new(2, 3, 0, 3, 1), GridBB::new(2, 0, 0, 1, 1)]
        );
    }

    #[test]
    fn test_grid_intersections_without_wrap() {
        let a = GridBB::new(2, 0, 0, 1, 1);
        let b = GridBB::new(2, 1, 1, 3, 3);
        assert_eq!(a.intersections(&b), vec![GridBB::new(2, 1, 1, 1, 1)]);

        let c = GridBB::new(2, 3, 3, 3, 3);
        assert!(a.intersections(&c).is_empty());
    }

    #[test]
    fn test_is_inside() {
        let bb = GridBB::new(3, 2, 2, 4, 5);
        assert!(bb.is_inside(&TileCoordinate::new(3, 2, 2)));
        assert!(bb.is_inside(&TileCoordinate::new(3, 4, 5)));
        assert!(!bb.is_inside(&TileCoordinate::new(3, 5, 3)));
        assert!(!bb.is_inside(&TileCoordinate::new(3, 3, 6)));
        assert!(!bb.is_inside(&TileCoordinate::new(4, 3, 3)));
    }

    #[test]
    fn test_is_inside_wrapped() {
        let view = GridBB::new(2, 3, 0, 5, 1);
        assert!(view.is_inside(&TileCoordinate::new(2, 3, 0)));
        assert!(view.is_inside(&TileCoordinate::new(2, 0, 1)));
        assert!(view.is_inside(&TileCoordinate::new(2, 1, 0)));
        assert!(!view.is_inside(&TileCoordinate::new(2, 2, 0)));
        assert!(!view.is_inside(&TileCoordinate::new(2, 0, 2)));
    }

    #[test]
    fn test_is_inside_agrees_with_intersections_at_seam() {
        let views = [
            GridBB::new(2, 3, 0, 5, 1),
            GridBB::new(2, 3, 1, 4, 3),
            GridBB::new(3, 6, 0, 9, 7),
            GridBB::new(3, 0, 0, 7, 7),
        ];

        for view in views {
            for tile in GridBB::world(view.zoom).tiles() {
                let single = GridBB::new(tile.zoom, tile.x, tile.y, tile.x, tile.y);
                assert_eq!(
                    view.is_inside(&tile),
                    !view.intersections(&single).is_empty(),
                    "view {} tile {}",
                    view,
                    tile
                );
            }
        }
    }

    #[test]
    fn test_extreme_box_extent_saturates() {
        let bb = GridBB::new(3, i64::MIN, i64::MIN, i64::MAX, i64::MAX);
        assert_eq!(bb.width(), i64::MAX);
        assert_eq!(bb.height(), i64::MAX);
        assert_eq!(GridBB::new(3, 5, 5, 2, 2).width(), 0);
    }

    #[test]
    fn test_grid_tiles() {
        let tiles: Vec<_> = GridBB::new(4, 1, 2, 2, 3).tiles().collect();
        assert_eq!(
            tiles,
            vec![
                TileCoordinate::new(4, 1, 2),
                TileCoordinate::new(4, 1, 3),
                TileCoordinate::new(4, 2, 2),
                TileCoordinate::new(4, 2, 3),
            ]
        );
        assert_eq!(GridBB::world(3).tiles().len(), 64);
    }

    #[test]
    fn test_display() {
        let bb = GridBB::new(1, 0, 0, 1, 1);
        assert_eq!(bb.to_string(), "<tile min: <zoom: 1, x: 0, y: 0>, max: <zoom: 1, x: 1, y: 1>>");
    }
}
