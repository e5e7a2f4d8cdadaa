//! Coordinate systems and the conversions between them
//!
//! Geographic (WGS84 degrees), geocentric Cartesian (meters), and spherical
//! Mercator (EPSG:900913 meters) coordinates, plus the [`Transformer`] that
//! also maps Mercator positions onto the tile grid.

pub mod coordinate;
pub mod params;
pub mod transformer;

pub use coordinate::{CartesianCoordinate, GeographicCoordinate, MercatorCoordinate};
pub use params::{ProjectionParams, DEFAULT_TILE_SIZE, EARTH_RADIUS};
pub use transformer::Transformer;
