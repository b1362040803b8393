//! Aircraft telemetry snapshot.
//!
//! The simulator hands over position and heights once per tick; everything
//! downstream works on an immutable [`AircraftState`].

use crate::coord::{LLPos, FT_TO_M};

/// Aircraft position and heights at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftState {
    /// Geodetic position.
    pub position: LLPos,

    /// Elevation above mean sea level in meters.
    pub elevation_m: f64,

    /// Height above ground level in meters.
    pub agl_m: f64,
}

impl AircraftState {
    /// Create a state from simulator telemetry in degrees and meters.
    ///
    /// # Arguments
    ///
    /// * `latitude` - Latitude in degrees
    /// * `longitude` - Longitude in degrees
    /// * `elevation_m` - Elevation MSL in meters
    /// * `agl_m` - Height above ground in meters
    pub fn from_telemetry(latitude: f64, longitude: f64, elevation_m: f64, agl_m: f64) -> Self {
        Self {
            position: LLPos::new(longitude, latitude),
            elevation_m,
            agl_m,
        }
    }

    /// Create a state from heights in feet.
    pub fn from_feet(latitude: f64, longitude: f64, elevation_ft: f64, agl_ft: f64) -> Self {
        Self::from_telemetry(latitude, longitude, elevation_ft * FT_TO_M, agl_ft * FT_TO_M)
    }

    pub fn latitude(&self) -> f64 {
        self.position.lat
    }

    pub fn longitude(&self) -> f64 {
        self.position.lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_telemetry() {
        let state = AircraftState::from_telemetry(60.2, 11.08, 250.0, 42.0);
        assert_eq!(state.latitude(), 60.2);
        assert_eq!(state.longitude(), 11.08);
        assert_eq!(state.elevation_m, 250.0);
        assert_eq!(state.agl_m, 42.0);
    }

    #[test]
    fn test_longitude_is_normalized() {
        let state = AircraftState::from_telemetry(0.0, 190.0, 0.0, 0.0);
        assert!((state.longitude() + 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_feet() {
        let state = AircraftState::from_feet(45.0, 7.0, 1000.0, 200.0);
        assert!((state.elevation_m - 304.8).abs() < 1e-9);
        assert!((state.agl_m - 60.96).abs() < 1e-9);
    }
}
