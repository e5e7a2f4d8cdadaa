use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bbox::{GeographicBB, GridBB};
use crate::grid::{RegionCoordinate, TileCoordinate};

#[derive(Debug, Serialize)]
pub struct TileReport {
    pub tile: TileCoordinate,
    pub quad_key: String,
    pub bounds: GeographicBB,
}

#[derive(Debug, Serialize)]
pub struct RegionReport {
    pub region: RegionCoordinate,
    pub quad_key: String,
    pub bounds: GeographicBB,
    pub children: Vec<RegionCoordinate>,
    pub tiles: Vec<TileCoordinate>,
}

#[derive(Debug, Serialize)]
pub struct BboxReport {
    pub grid: GridBB,
    pub parts: Vec<GridBB>,
    pub tile_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct CsvPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CsvResult<'a> {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub zoom: u8,
    pub x: i64,
    pub y: i64,
    pub quad_key: String,
}

/// Counts reported after a batch run
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub total_points: usize,
    pub successful: usize,
    pub failed: usize,
}

impl fmt::Display for TileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tile: {}", self.tile)?;
        writeln!(f, "  Quad key: {}", self.quad_key)?;
        writeln!(f, "  Bounds: {}", self.bounds)
    }
}

impl fmt::Display for RegionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Region: {}", self.region)?;
        writeln!(f, "  Quad key: {}", self.quad_key)?;
        writeln!(f, "  Bounds: {}", self.bounds)?;
        writeln!(f, "  Children:")?;
        for child in &self.children {
            writeln!(f, "    {}", child)?;
        }
        writeln!(f, "  Tiles ({}):", self.tiles.len())?;
        for tile in &self.tiles {
            writeln!(f, "    {}", tile)?;
        }
        Ok(())
    }
}

impl fmt::Display for BboxReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid box: {}", self.grid)?;
        for part in &self.parts {
            writeln!(f, "  Part: {} ({} x {})", part, part.width(), part.height())?;
        }
        writeln!(f, "  Tiles: {}", self.tile_count)
    }
}
