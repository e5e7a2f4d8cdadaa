//! Runtime configuration
//!
//! ```toml
//! tile_size = 256
//! log_tiles_per_row = 2
//! zoom = 8
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::{check_zoom, MAX_LOG_TILES_PER_ROW};
use crate::projection::{ProjectionParams, Transformer, DEFAULT_TILE_SIZE};

/// Settings shared by every conversion of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tile edge length in pixels
    pub tile_size: f64,
    /// Region size as log2 of tiles per row
    pub log_tiles_per_row: u8,
    /// Zoom level used when a command does not name one
    pub zoom: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            log_tiles_per_row: 0,
            zoom: 0,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document; missing keys take defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value against the range the engine supports
    pub fn validate(&self) -> Result<()> {
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(Error::InvalidTileSize(self.tile_size));
        }
        if self.log_tiles_per_row > MAX_LOG_TILES_PER_ROW {
            return Err(Error::InvalidRegionSize(self.log_tiles_per_row));
        }
        check_zoom(self.zoom)?;
        Ok(())
    }

    /// Projection parameters for the configured tile size
    pub fn projection(&self) -> Result<ProjectionParams> {
        ProjectionParams::new(self.tile_size)
    }

    /// A transformer for the configured tile size
    pub fn transformer(&self) -> Result<Transformer> {
        Ok(Transformer::new(self.projection()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tile_size, 256.0);
    }

    #[test]
    fn test_parse() {
        let config = Config::from_toml_str("tile_size = 512.0\nlog_tiles_per_row = 2\nzoom = 8\n").unwrap();
        assert_eq!(config.tile_size, 512.0);
        assert_eq!(config.log_tiles_per_row, 2);
        assert_eq!(config.zoom, 8);
        assert_eq!(config.projection().unwrap().tile_size(), 512.0);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_toml_str("tile_size = 0.0"),
            Err(Error::InvalidTileSize(_))
        ));
        assert!(matches!(
            Config::from_toml_str("log_tiles_per_row = 5"),
            Err(Error::InvalidRegionSize(5))
        ));
        assert!(matches!(Config::from_toml_str("zoom = 31"), Err(Error::InvalidZoom(31))));
    }

    #[test]
    fn test_unknown_key() {
        assert!(matches!(Config::from_toml_str("tilesize = 256.0"), Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(Config::from_toml_str("tile_size = "), Err(Error::Config(_))));
    }
}
