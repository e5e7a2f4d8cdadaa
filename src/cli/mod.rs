//! Command-line front end
//!
//! Thin layer over the engine: parses arguments, resolves configuration,
//! and prints reports as text or JSON.

pub mod handlers;
pub mod models;

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, warn};

use crate::bbox::GeographicBB;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::grid::{check_zoom, RegionCoordinate};

#[derive(Debug, Parser)]
#[command(name = "tmsgeo", version, about = "Tile grid and coordinate conversions for web maps")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Tile edge length in pixels, overriding the configuration
    #[arg(long, global = true)]
    pub tile_size: Option<f64>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Tile, quad key, and bounds of the tile under a point
    Tile {
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long)]
        zoom: Option<u8>,
    },
    /// Bounds, children, and tiles of a region
    Region {
        #[arg(long)]
        zoom: Option<u8>,
        #[arg(long)]
        x: i64,
        #[arg(long)]
        y: i64,
        #[arg(long)]
        log_tiles_per_row: Option<u8>,
    },
    /// Grid boxes covering a geographic view, split at the antimeridian
    Bbox {
        #[arg(long, allow_negative_numbers = true)]
        west: f64,
        #[arg(long, allow_negative_numbers = true)]
        south: f64,
        #[arg(long, allow_negative_numbers = true)]
        east: f64,
        #[arg(long, allow_negative_numbers = true)]
        north: f64,
        #[arg(long)]
        zoom: Option<u8>,
    },
    /// Map `latitude,longitude[,name]` CSV rows on stdin to tiles on stdout
    Batch {
        #[arg(long)]
        zoom: Option<u8>,
    },
}

impl Cli {
    /// Merges the configuration file contents (if any) with flag overrides
    pub fn resolve_config(&self, file_contents: Option<&str>) -> Result<Config> {
        let mut config = match file_contents {
            Some(contents) => Config::from_toml_str(contents)?,
            None => Config::default(),
        };

        if let Some(tile_size) = self.tile_size {
            config.tile_size = tile_size;
        }

        config.validate()?;
        Ok(config)
    }
}

fn print<T: Serialize + std::fmt::Display, W: Write>(out: &mut W, report: &T, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", report)?;
    }
    Ok(())
}

/// Executes one parsed command
pub fn run<R: Read, W: Write>(cli: &Cli, config: &Config, input: R, mut output: W) -> Result<()> {
    let transformer = config.transformer()?;
    debug!(?config, "resolved configuration");

    match &cli.command {
        Command::Tile { lon, lat, zoom } => {
            let zoom = check_zoom(zoom.unwrap_or(config.zoom))?;
            let report = handlers::tile_report(&transformer, *lon, *lat, zoom)
                .ok_or_else(|| Error::OutOfGrid(format!("no tile for lon {} lat {}", lon, lat)))?;
            print(&mut output, &report, cli.json)
        }
        Command::Region { zoom, x, y, log_tiles_per_row } => {
            let region = RegionCoordinate::new(
                zoom.unwrap_or(config.zoom),
                *x,
                *y,
                log_tiles_per_row.unwrap_or(config.log_tiles_per_row),
            )?;
            print(&mut output, &handlers::region_report(&transformer, region), cli.json)
        }
        Command::Bbox { west, south, east, north, zoom } => {
            let view = GeographicBB::new(*west, *south, *east, *north);
            let zoom = check_zoom(zoom.unwrap_or(config.zoom))?;
            let report = handlers::bbox_report(&transformer, &view, zoom)
                .ok_or_else(|| Error::OutOfGrid(format!("view {} has no grid box", view)))?;
            print(&mut output, &report, cli.json)
        }
        Command::Batch { zoom } => {
            let zoom = check_zoom(zoom.unwrap_or(config.zoom))?;
            let summary = handlers::process_csv_batch(&transformer, input, &mut output, zoom)?;
            if summary.failed > 0 {
                warn!(failed = summary.failed, "some rows could not be mapped");
            }
            Ok(())
        }
    }
}
