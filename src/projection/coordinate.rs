use std::fmt;
use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// A WGS84 position: longitude and latitude in degrees, height in meters
/// above the spheroid.
///
/// Either angle may be unset; conversions carry an unset component through
/// instead of failing, which lets a bounding box constrain a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeographicCoordinate {
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    #[serde(default)]
    pub height: f64,
}

impl GeographicCoordinate {
    /// Creates a coordinate on the surface of the spheroid
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon: Some(lon), lat: Some(lat), height: 0.0 }
    }

    /// Creates a coordinate at the given height above the spheroid
    pub fn with_height(lon: f64, lat: f64, height: f64) -> Self {
        Self { lon: Some(lon), lat: Some(lat), height }
    }

    /// Creates a coordinate whose components may be unset
    pub fn partial(lon: Option<f64>, lat: Option<f64>) -> Self {
        Self { lon, lat, height: 0.0 }
    }

    /// Returns `(lon, lat)` when both are set
    pub fn lon_lat(&self) -> Option<(f64, f64)> {
        Some((self.lon?, self.lat?))
    }
}

impl fmt::Display for GeographicCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<lon: {}, lat: {}, height: {}>",
            Component(self.lon),
            Component(self.lat),
            self.height
        )
    }
}

/// A geocentric (earth-centered, earth-fixed) position in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianCoordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianCoordinate {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length of the position vector
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Straight-line distance to another position
    pub fn distance(&self, other: &CartesianCoordinate) -> f64 {
        (*self - *other).length()
    }
}

impl Sub for CartesianCoordinate {
    type Output = CartesianCoordinate;

    fn sub(self, other: Self) -> Self::Output {
        CartesianCoordinate::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl fmt::Display for CartesianCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<x: {}, y: {}, z: {}>", self.x, self.y, self.z)
    }
}

/// A position in spherical Mercator (EPSG:900913) meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MercatorCoordinate {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl MercatorCoordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y) }
    }

    /// Creates a coordinate whose components may be unset
    pub fn partial(x: Option<f64>, y: Option<f64>) -> Self {
        Self { x, y }
    }

    /// Returns `(x, y)` when both are set
    pub fn xy(&self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }
}

impl fmt::Display for MercatorCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<x: {}, y: {}>", Component(self.x), Component(self.y))
    }
}

/// Prints an optional component, `None` when unset
struct Component(Option<f64>);

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "None"),
        }
    }
}
