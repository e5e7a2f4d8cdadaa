use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use super::iter::GridIter;
use super::{check_zoom, grid_size, quadkey, MAX_LOG_TILES_PER_ROW, MAX_ZOOM};

/// A single cell of the worldwide tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoordinate {
    /// Zoom level; the world is `2^zoom` tiles wide
    pub zoom: u8,
    /// Column, 0 at the antimeridian, increasing eastward
    pub x: i64,
    /// Row, 0 at the north edge, increasing southward
    pub y: i64,
}

impl TileCoordinate {
    pub fn new(zoom: u8, x: i64, y: i64) -> Self {
        Self { zoom, x, y }
    }

    /// Parses a quad key into the tile it names
    pub fn from_quad_key(key: &str) -> Result<Self> {
        let (zoom, x, y) = quadkey::decode(key)?;
        Ok(Self { zoom, x, y })
    }

    /// Whether the zoom level is addressable and the tile lies inside the
    /// unwrapped `2^zoom` × `2^zoom` grid
    pub fn is_valid(&self) -> bool {
        let n = grid_size(self.zoom);
        self.zoom <= MAX_ZOOM && (0..n).contains(&self.x) && (0..n).contains(&self.y)
    }

    /// The four tiles at `zoom + 1` covering this tile, x varying fastest.
    ///
    /// `None` at [`MAX_ZOOM`] and deeper, or when the doubled position
    /// does not fit in an `i64`.
    pub fn zoom_in(&self) -> Option<[TileCoordinate; 4]> {
        let (zoom, x, y) = child_origin(self.zoom, self.x, self.y)?;
        Some([
            TileCoordinate::new(zoom, x, y),
            TileCoordinate::new(zoom, x + 1, y),
            TileCoordinate::new(zoom, x, y + 1),
            TileCoordinate::new(zoom, x + 1, y + 1),
        ])
    }

    pub fn quad_key(&self) -> String {
        quadkey::encode(self.zoom, self.x, self.y)
    }
}

impl fmt::Display for TileCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<zoom: {}, x: {}, y: {}>", self.zoom, self.x, self.y)
    }
}

/// A square block of `2^k` × `2^k` tiles, addressed on its own grid.
///
/// Region `(x, y)` at some zoom starts at tile `(x·2^k, y·2^k)` of the same
/// zoom. Grouping tiles this way lets a client fetch one descriptor per
/// block instead of one per tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RegionCoordinate {
    zoom: u8,
    x: i64,
    y: i64,
    log_tiles_per_row: u8,
}

impl RegionCoordinate {
    /// Creates a region of `2^log_tiles_per_row` tiles per row.
    ///
    /// `log_tiles_per_row` must be in `0..=4` (1 to 16 tiles per row) and
    /// `zoom` at most [`MAX_ZOOM`].
    pub fn new(zoom: u8, x: i64, y: i64, log_tiles_per_row: u8) -> Result<Self> {
        check_zoom(zoom)?;
        if log_tiles_per_row > MAX_LOG_TILES_PER_ROW {
            return Err(Error::InvalidRegionSize(log_tiles_per_row));
        }

        Ok(Self { zoom, x, y, log_tiles_per_row })
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }

    pub fn log_tiles_per_row(&self) -> u8 {
        self.log_tiles_per_row
    }

    /// Number of tiles along one edge of the region
    pub fn tiles_per_row(&self) -> i64 {
        1i64 << self.log_tiles_per_row
    }

    /// The north-west tile of the region
    pub fn root_tile(&self) -> TileCoordinate {
        let n = self.tiles_per_row();
        TileCoordinate::new(self.zoom, self.x.saturating_mul(n), self.y.saturating_mul(n))
    }

    /// All tiles of the region, column by column starting at the root tile
    pub fn tiles(&self) -> RegionTiles {
        let root = self.root_tile();
        RegionTiles {
            zoom: root.zoom,
            cells: GridIter::new(root.x, root.y, self.tiles_per_row()),
        }
    }

    /// The four regions at `zoom + 1` covering this region, x varying fastest.
    ///
    /// The children keep the region size, so each covers a quarter of the
    /// parent's footprint with tiles of the next zoom level. `None` at
    /// [`MAX_ZOOM`].
    pub fn zoom_in(&self) -> Option<[RegionCoordinate; 4]> {
        let (zoom, x, y) = child_origin(self.zoom, self.x, self.y)?;
        let k = self.log_tiles_per_row;
        Some([
            RegionCoordinate { zoom, x, y, log_tiles_per_row: k },
            RegionCoordinate { zoom, x: x + 1, y, log_tiles_per_row: k },
            RegionCoordinate { zoom, x, y: y + 1, log_tiles_per_row: k },
            RegionCoordinate { zoom, x: x + 1, y: y + 1, log_tiles_per_row: k },
        ])
    }

    pub fn quad_key(&self) -> String {
        quadkey::encode(self.zoom, self.x, self.y)
    }
}

impl fmt::Display for RegionCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<zoom: {}, x: {}, y: {}, log_tiles_per_row: {}>",
            self.zoom, self.x, self.y, self.log_tiles_per_row
        )
    }
}

/// Zoom and north-west position of the children of `(zoom, x, y)`
fn child_origin(zoom: u8, x: i64, y: i64) -> Option<(u8, i64, i64)> {
    if zoom >= MAX_ZOOM {
        return None;
    }
    Some((zoom + 1, x.checked_mul(2)?, y.checked_mul(2)?))
}

/// Iterator over the tiles of a region
#[derive(Debug, Clone)]
pub struct RegionTiles {
    zoom: u8,
    cells: GridIter,
}

impl Iterator for RegionTiles {
    type Item = TileCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        self.cells.next().map(|(x, y)| TileCoordinate::new(self.zoom, x, y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl ExactSizeIterator for RegionTiles {}

/// A position on the grid at some zoom level: a single tile or a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridCoordinate {
    Tile(TileCoordinate),
    Region(RegionCoordinate),
}

impl GridCoordinate {
    pub fn zoom(&self) -> u8 {
        match self {
            GridCoordinate::Tile(tile) => tile.zoom,
            GridCoordinate::Region(region) => region.zoom,
        }
    }

    pub fn x(&self) -> i64 {
        match self {
            GridCoordinate::Tile(tile) => tile.x,
            GridCoordinate::Region(region) => region.x,
        }
    }

    pub fn y(&self) -> i64 {
        match self {
            GridCoordinate::Tile(tile) => tile.y,
            GridCoordinate::Region(region) => region.y,
        }
    }

    /// Encodes the position as a quad key of `zoom` digits
    pub fn encode_quad_key(&self) -> String {
        quadkey::encode(self.zoom(), self.x(), self.y())
    }

    /// The four coordinates of the same kind at `zoom + 1`
    pub fn zoom_in(&self) -> Option<[GridCoordinate; 4]> {
        match self {
            GridCoordinate::Tile(tile) => tile.zoom_in().map(|c| c.map(GridCoordinate::Tile)),
            GridCoordinate::Region(region) => region.zoom_in().map(|c| c.map(GridCoordinate::Region)),
        }
    }

    /// Unique element name of the form `{prefix}_{zoom}_{x}_{y}`
    pub fn element_name(&self, prefix: &str) -> String {
        format!("{}_{}_{}_{}", prefix, self.zoom(), self.x(), self.y())
    }
}

impl From<TileCoordinate> for GridCoordinate {
    fn from(tile: TileCoordinate) -> Self {
        GridCoordinate::Tile(tile)
    }
}

impl From<RegionCoordinate> for GridCoordinate {
    fn from(region: RegionCoordinate) -> Self {
        GridCoordinate::Region(region)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridCoordinate::Tile(tile) => tile.fmt(f),
            GridCoordinate::Region(region) => region.fmt(f),
        }
    }
}
