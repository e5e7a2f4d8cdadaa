use std::io::{Read, Write};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::bbox::{GeographicBB, GridBB};
use crate::error::Result;
use crate::grid::RegionCoordinate;
use crate::projection::{GeographicCoordinate, Transformer};
use super::models::*;

/// Largest latitude whose Mercator projection stays inside the square world
pub const MAX_MERCATOR_LAT: f64 = 85.0511287798066;

/// Tile under a point, with latitude clamped to the Mercator world
pub fn tile_report(transformer: &Transformer, lon: f64, lat: f64, zoom: u8) -> Option<TileReport> {
    let coord = GeographicCoordinate::new(lon, lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT));
    let tile = transformer.geographic_to_tile(&coord, zoom)?;

    Some(TileReport {
        tile,
        quad_key: tile.quad_key(),
        bounds: transformer.geographic_bounds(tile),
    })
}

pub fn region_report(transformer: &Transformer, region: RegionCoordinate) -> RegionReport {
    RegionReport {
        region,
        quad_key: region.quad_key(),
        bounds: transformer.geographic_bounds(region),
        children: region.zoom_in().map(|c| c.to_vec()).unwrap_or_default(),
        tiles: region.tiles().collect(),
    }
}

pub fn bbox_report(transformer: &Transformer, bounds: &GeographicBB, zoom: u8) -> Option<BboxReport> {
    let clamped = GeographicBB::new(
        bounds.min.lon?,
        bounds.min.lat?.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT),
        bounds.max.lon?,
        bounds.max.lat?.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT),
    );

    let grid = transformer.geographic_bb_to_grid(&clamped, zoom)?;
    let parts = grid.intersections(&GridBB::world(zoom));
    let tile_count = parts.iter().map(|part| part.tiles().len()).sum();

    debug!(%grid, parts = parts.len(), tile_count, "grid box for view");

    Some(BboxReport { grid, parts, tile_count })
}

/// Maps every `latitude,longitude[,name]` row of `input` to its tile at
/// `zoom` and writes the results as CSV.
///
/// Rows that fail to parse or fall outside the Mercator world are skipped
/// and counted as failed.
pub fn process_csv_batch<R: Read, W: Write>(
    transformer: &Transformer,
    input: R,
    output: W,
    zoom: u8,
) -> Result<BatchSummary> {
    let start = Instant::now();

    let mut csv_reader = csv::Reader::from_reader(input);
    let mut points: Vec<CsvPoint> = Vec::new();
    let mut summary = BatchSummary::default();

    for (line, result) in csv_reader.deserialize().enumerate() {
        summary.total_points += 1;
        match result {
            Ok(point) => points.push(point),
            Err(e) => {
                warn!(line = line + 2, error = %e, "skipping unreadable row");
                summary.failed += 1;
            }
        }
    }

    // Check if any point has a name to determine header
    let has_names = points.iter().any(|p| p.name.is_some());

    let mut csv_writer = csv::Writer::from_writer(output);

    for point in &points {
        let coord = GeographicCoordinate::new(point.longitude, point.latitude);
        let tile = match transformer.geographic_to_tile(&coord, zoom) {
            Some(tile) if tile.is_valid() && point.latitude.abs() <= MAX_MERCATOR_LAT => tile,
            _ => {
                warn!(lat = point.latitude, lon = point.longitude, "point outside the tile grid");
                summary.failed += 1;
                continue;
            }
        };

        let name = if has_names {
            Some(point.name.as_deref().unwrap_or(""))
        } else {
            None
        };

        csv_writer.serialize(CsvResult {
            latitude: point.latitude,
            longitude: point.longitude,
            name,
            zoom,
            x: tile.x,
            y: tile.y,
            quad_key: tile.quad_key(),
        })?;
        summary.successful += 1;
    }

    csv_writer.flush()?;

    info!(
        total = summary.total_points,
        successful = summary.successful,
        failed = summary.failed,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "batch complete"
    );

    Ok(summary)
}
