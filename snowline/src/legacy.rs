//! Snow tapering around legacy airports.
//!
//! Legacy runways are transparent, so whatever snow X-Plane draws on the
//! terrain shows through them. Near such an airport the snow depth handed to
//! X-Plane is blended down towards [`FLOOR`], depending on how far the
//! aircraft is from the field and how high above a nominal approach path it
//! flies. Close to the ground the depth is tapered further so the runway is
//! clear on touchdown.

use crate::aircraft::AircraftState;
use crate::airport::LegacyAirports;
use crate::coord::{LLPos, FT_TO_M};

/// Depths below this are returned unchanged.
pub const FLOOR: f32 = 0.07;

/// Upper bound of the blended depth.
pub const CEILING: f32 = 0.25;

/// Search radius around airport circle centers in meters.
pub const SEARCH_RADIUS: f64 = 18_000.0;

/// Reference approach slope, about 5°.
pub const REF_SLOPE: f64 = 0.087;

/// Height above ground below which snow fades out, in meters.
pub const AGL_THRESHOLD: f64 = 200.0 * FT_TO_M;

/// Depth reached at [`AGL_THRESHOLD`].
pub const AGL_SNOW_LIMIT: f32 = 0.11;

/// Each meter above the reference slope counts as this many meters of distance.
const HEIGHT_PENALTY: f64 = 10.0;

/// Result of a terrain height probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainSample {
    /// Ground elevation in meters.
    pub elevation_m: f64,
    /// False if the probe did not hit terrain; `elevation_m` is a best guess.
    pub hit: bool,
}

impl TerrainSample {
    pub fn hit(elevation_m: f64) -> Self {
        Self {
            elevation_m,
            hit: true,
        }
    }

    pub fn miss(elevation_m: f64) -> Self {
        Self {
            elevation_m,
            hit: false,
        }
    }
}

/// Source of ground elevation, usually the simulator's terrain probe.
pub trait TerrainProbe {
    fn probe(&self, pos: LLPos) -> TerrainSample;
}

impl<F> TerrainProbe for F
where
    F: Fn(LLPos) -> TerrainSample,
{
    fn probe(&self, pos: LLPos) -> TerrainSample {
        self(pos)
    }
}

/// Depth blend around the airports of a [`LegacyAirports`] collection.
pub struct LegacyBlend<'a> {
    airports: &'a LegacyAirports,
    probe: &'a dyn TerrainProbe,
}

impl<'a> LegacyBlend<'a> {
    pub fn new(airports: &'a LegacyAirports, probe: &'a dyn TerrainProbe) -> Self {
        Self { airports, probe }
    }

    /// Adjust `sampled_depth` for the aircraft's position and heights.
    ///
    /// Only the first airport in collection order within [`SEARCH_RADIUS`]
    /// is considered, which need not be the nearest one.
    pub fn adjust(&self, sampled_depth: f32, pos: LLPos, elevation_m: f64, agl_m: f64) -> f32 {
        if sampled_depth < FLOOR {
            return sampled_depth;
        }

        let Some((airport, dist)) = self.airports.first_within(pos, SEARCH_RADIUS) else {
            return sampled_depth;
        };

        let haa = elevation_m - airport.resolve_elevation(self.probe);
        let ref_haa = dist * REF_SLOPE;
        let dh = (haa - ref_haa).max(0.0);
        let ref_dist = dist + HEIGHT_PENALTY * dh;

        let radius = airport.mec_radius();
        let span = SEARCH_RADIUS - radius;
        let a = if span > 0.0 {
            ((ref_dist - radius) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let depth = FLOOR + a as f32 * (sampled_depth.min(CEILING) - FLOOR);

        let adjusted = if agl_m > AGL_THRESHOLD {
            depth.max(AGL_SNOW_LIMIT)
        } else {
            let t = (agl_m.max(0.0) / AGL_THRESHOLD) as f32;
            FLOOR + t * (AGL_SNOW_LIMIT - FLOOR)
        };

        tracing::trace!(
            airport = airport.name(),
            dist,
            haa,
            a,
            sampled_depth,
            adjusted,
            "Legacy airport blend"
        );
        adjusted
    }

    /// [`adjust`](Self::adjust) for an aircraft state.
    pub fn adjust_for(&self, sampled_depth: f32, aircraft: &AircraftState) -> f32 {
        self.adjust(
            sampled_depth,
            aircraft.position,
            aircraft.elevation_m,
            aircraft.agl_m,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::{Airport, Runway};
    use crate::coord::LAT_TO_M;
    use proptest::prelude::*;
    use std::cell::Cell;

    const EPS: f32 = 1e-5;
    const FIELD_ELEVATION: f64 = 200.0;

    /// Airport with a zero-length runway at (10°E, 45°N), so its circle has
    /// radius 0.
    fn point_airport() -> LegacyAirports {
        let at = LLPos::new(10.0, 45.0);
        let airport = Airport::new("ZZZZ Point", vec![Runway::new("09", at, at)]).unwrap();
        LegacyAirports::from_airports(vec![airport])
    }

    fn flat(_pos: LLPos) -> TerrainSample {
        TerrainSample::hit(FIELD_ELEVATION)
    }

    /// Position `meters` north of the airport.
    fn north_of_field(meters: f64) -> LLPos {
        LLPos::new(10.0, 45.0 + meters / LAT_TO_M)
    }

    #[test]
    fn test_below_floor_is_unchanged() {
        let airports = point_airport();
        let blend = LegacyBlend::new(&airports, &flat);
        let out = blend.adjust(0.05, north_of_field(0.0), FIELD_ELEVATION, 0.0);
        assert_eq!(out, 0.05);
    }

    #[test]
    fn test_no_airport_in_range_is_unchanged() {
        let airports = point_airport();
        let blend = LegacyBlend::new(&airports, &flat);
        let out = blend.adjust(0.4, north_of_field(18_500.0), 1000.0, 800.0);
        assert_eq!(out, 0.4);

        let empty = LegacyAirports::new();
        let blend = LegacyBlend::new(&empty, &flat);
        assert_eq!(blend.adjust(0.4, north_of_field(0.0), 0.0, 0.0), 0.4);
    }

    #[test]
    fn test_on_ground_at_field_is_floor() {
        let airports = point_airport();
        let blend = LegacyBlend::new(&airports, &flat);
        let out = blend.adjust(0.3, north_of_field(0.0), FIELD_ELEVATION, 0.0);
        assert!((out - FLOOR).abs() < EPS);
    }

    #[test]
    fn test_above_200ft_over_field_is_agl_limit() {
        let airports = point_airport();
        let blend = LegacyBlend::new(&airports, &flat);
        let out = blend.adjust(0.3, north_of_field(0.0), FIELD_ELEVATION + 100.0, 100.0);
        assert!((out - AGL_SNOW_LIMIT).abs() < EPS);
    }

    #[test]
    fn test_agl_taper_is_linear() {
        let airports = point_airport();
        let blend = LegacyBlend::new(&airports, &flat);
        let agl = 100.0 * FT_TO_M;
        let out = blend.adjust(0.3, north_of_field(0.0), FIELD_ELEVATION + agl, agl);
        assert!((out - 0.09).abs() < EPS);
    }

    #[test]
    fn test_on_reference_slope_blends_by_distance() {
        let airports = point_airport();
        let blend = LegacyBlend::new(&airports, &flat);
        let dist = 9000.0;
        let haa = dist * REF_SLOPE;
        let out = blend.adjust(0.3, north_of_field(dist), FIELD_ELEVATION + haa, haa);
        // halfway out: 0.07 + 0.5 * (0.25 - 0.07)
        assert!((out - 0.16).abs() < 1e-4);
    }

    #[test]
    fn test_height_above_slope_counts_as_distance() {
        let airports = point_airport();
        let blend = LegacyBlend::new(&airports, &flat);
        let dist = 9000.0;
        let haa = dist * REF_SLOPE + 600.0;
        let out = blend.adjust(0.3, north_of_field(dist), FIELD_ELEVATION + haa, haa);
        // reference distance 9000 + 10 * 600 = 15000
        let expected = FLOOR + (15_000.0 / 18_000.0) as f32 * (CEILING - FLOOR);
        assert!((out - expected).abs() < 1e-4);
    }

    #[test]
    fn test_ceiling_applies_to_deep_snow() {
        let airports = point_airport();
        let blend = LegacyBlend::new(&airports, &flat);
        // far above everything: full blend
        let out = blend.adjust(0.8, north_of_field(1000.0), 5000.0, 4800.0);
        assert!((out - CEILING).abs() < EPS);
    }

    #[test]
    fn test_elevation_is_probed_once() {
        let airports = point_airport();
        let calls = Cell::new(0);
        let probe = |_pos: LLPos| {
            calls.set(calls.get() + 1);
            TerrainSample::hit(FIELD_ELEVATION)
        };
        let blend = LegacyBlend::new(&airports, &probe);

        for _ in 0..3 {
            blend.adjust(0.3, north_of_field(500.0), 400.0, 200.0);
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_adjust_for_aircraft_state() {
        let airports = point_airport();
        let blend = LegacyBlend::new(&airports, &flat);
        let aircraft = AircraftState::from_telemetry(45.0, 10.0, FIELD_ELEVATION, 0.0);
        assert!((blend.adjust_for(0.3, &aircraft) - FLOOR).abs() < EPS);
    }

    proptest! {
        /// Inside the search radius the blend stays between the floor and
        /// the larger of the capped input and the AGL limit.
        #[test]
        fn prop_adjust_is_bounded(
            depth in FLOOR..2.0f32,
            north in -17_000.0f64..17_000.0,
            haa in -100.0f64..5000.0,
            agl in 0.0f64..3000.0,
        ) {
            let airports = point_airport();
            let blend = LegacyBlend::new(&airports, &flat);
            let out = blend.adjust(depth, north_of_field(north), FIELD_ELEVATION + haa, agl);
            prop_assert!(out >= FLOOR - EPS);
            prop_assert!(out <= depth.min(CEILING).max(AGL_SNOW_LIMIT) + EPS);
        }
    }
}
