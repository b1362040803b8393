//! Coordinate type definitions

use std::fmt;

/// Meters per degree of latitude.
pub const LAT_TO_M: f64 = 111_120.0;

/// Meters per foot.
pub const FT_TO_M: f64 = 0.3048;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A geodetic position in degrees.
///
/// Longitude is kept in (-180, 180] by the arithmetic operators in
/// [`super`]; constructors accept any value and normalize it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LLPos {
    /// Longitude in degrees, east positive
    pub lon: f64,
    /// Latitude in degrees, north positive
    pub lat: f64,
}

impl LLPos {
    /// Creates a position, normalizing longitude to (-180, 180].
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon: super::relative_angle(lon),
            lat,
        }
    }

    /// Creates a position after validating both components.
    pub fn checked(lon: f64, lat: f64) -> Result<Self, CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(CoordError::InvalidLongitude(lon));
        }
        Ok(Self::new(lon, lat))
    }
}

impl fmt::Display for LLPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lon)
    }
}

/// A displacement in meters on the local tangent plane.
///
/// `x` points east, `y` points north.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length in meters.
    #[inline]
    pub fn len(&self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

/// Errors that can occur when validating coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is outside valid range (-90.0 to 90.0)
    InvalidLatitude(f64),
    /// Longitude is outside valid range (-180.0 to 180.0)
    InvalidLongitude(f64),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, MIN_LON, MAX_LON
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
