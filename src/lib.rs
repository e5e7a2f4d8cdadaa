//! tmsgeo - coordinate conversions and tile grid algebra for web maps
//!
//! tmsgeo converts between WGS84, geocentric Cartesian, and spherical
//! Mercator coordinates, maps them onto the power-of-two tile grid used by
//! TMS-style web maps, and intersects bounding boxes, including views that
//! cross the antimeridian.
//!
//! # Examples
//!
//! ## Tiles and quad keys
//!
//! ```
//! use tmsgeo::{GeographicCoordinate, Transformer};
//!
//! let transformer = Transformer::default();
//! let london = GeographicCoordinate::new(-0.1278, 51.5074);
//!
//! let tile = transformer.geographic_to_tile(&london, 10).unwrap();
//! assert_eq!((tile.x, tile.y), (511, 340));
//!
//! let bounds = transformer.geographic_bounds(tile);
//! println!("{} {} covers {}", tile, tile.quad_key(), bounds);
//! ```
//!
//! ## Views across the antimeridian
//!
//! ```
//! use tmsgeo::{GeographicBB, GridBB, Transformer};
//!
//! let transformer = Transformer::default();
//! let view = GeographicBB::new(170.0, -10.0, 200.0, 10.0);
//!
//! let grid = transformer.geographic_bb_to_grid(&view, 2).unwrap();
//! for part in grid.intersections(&GridBB::world(2)) {
//!     for tile in part.tiles() {
//!         println!("{}", tile);
//!     }
//! }
//! ```

pub mod error;
pub mod config;
pub mod projection;
pub mod grid;
pub mod bbox;
pub mod cli;

pub use error::{Error, Result};
pub use config::Config;
pub use projection::{
    CartesianCoordinate, GeographicCoordinate, MercatorCoordinate, ProjectionParams, Transformer,
};
pub use grid::{grid_iter, GridCoordinate, GridIter, RegionCoordinate, TileCoordinate};
pub use bbox::{GeographicBB, GridBB, MercatorBB};
