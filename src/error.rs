//! Error types for tmsgeo

use std::io;
use thiserror::Error;

/// Result type for tmsgeo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in tmsgeo operations
#[derive(Debug, Error)]
pub enum Error {
    /// Tile size must be a positive, finite number of pixels
    #[error("Invalid tile size: {0}")]
    InvalidTileSize(f64),

    /// Region size outside the supported range
    #[error("Invalid region size: log_tiles_per_row {0} (must be between 0 and {max})", max = crate::grid::MAX_LOG_TILES_PER_ROW)]
    InvalidRegionSize(u8),

    /// Grid iteration step of zero
    #[error("Invalid grid step: step must be at least 1")]
    InvalidStep,

    /// Quad key contains invalid characters or is too long
    #[error("Invalid quad key: '{0}'")]
    InvalidQuadKey(String),

    /// Zoom level beyond what the grid can address
    #[error("Invalid zoom level: {0} (must be at most {max})", max = crate::grid::MAX_ZOOM)]
    InvalidZoom(u8),

    /// A position that maps to no tile of the grid
    #[error("Outside the tile grid: {0}")]
    OutOfGrid(String),

    /// Configuration could not be parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// CSV input/output error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
