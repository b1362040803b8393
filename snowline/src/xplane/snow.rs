//! Snow depth to X-Plane weather datarefs.
//!
//! X-Plane does not take a snow depth. It draws snow from three weather
//! datarefs: `snow_now` (an inverse coverage scale, 1.2 is none and smaller
//! is more), `snow_area_width` and `ice_now`. Depths are mapped onto them by
//! piecewise-linear interpolation over a table tuned by eye.

/// Depths of the table columns in meters.
const DEPTH: [f32; 7] = [0.01, 0.02, 0.03, 0.05, 0.10, 0.20, 0.25];
const SNOW_NOW: [f32; 7] = [0.90, 0.70, 0.60, 0.30, 0.15, 0.06, 0.05];
const SNOW_AREA_WIDTH: [f32; 7] = [0.25, 0.25, 0.25, 0.25, 0.25, 0.29, 0.33];
const ICE_NOW: [f32; 7] = [2.0, 2.0, 2.0, 2.0, 0.80, 0.37, 0.37];

/// X-Plane weather dataref values for one snow depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XPlaneSnow {
    pub snow_now: f32,
    pub snow_area_width: f32,
    pub ice_now: f32,
}

impl XPlaneSnow {
    /// Values that make X-Plane draw no snow.
    pub const NONE: Self = Self {
        snow_now: 1.2,
        snow_area_width: 0.25,
        ice_now: 2.0,
    };

    /// Map a snow depth in meters to dataref values.
    pub fn from_depth(depth: f32) -> Self {
        let last = DEPTH.len() - 1;
        if depth >= DEPTH[last] {
            return Self::column(last, 0.0);
        }
        if depth <= DEPTH[0] || depth.is_nan() {
            return Self::NONE;
        }

        // DEPTH[i] < depth < DEPTH[last] here
        let i = DEPTH.iter().rposition(|&d| d < depth).unwrap_or(0);
        let t = (depth - DEPTH[i]) / (DEPTH[i + 1] - DEPTH[i]);
        Self::column(i, t)
    }

    /// Same values with runways kept clear: no ice and no snow on runways.
    pub fn without_runway_ice(self) -> Self {
        Self {
            snow_area_width: 0.0,
            ice_now: 2.0,
            ..self
        }
    }

    /// Interpolate between column `i` and `i + 1`.
    fn column(i: usize, t: f32) -> Self {
        let lerp = |row: &[f32; 7]| {
            let next = row.get(i + 1).copied().unwrap_or(row[i]);
            row[i] + t * (next - row[i])
        };
        Self {
            snow_now: lerp(&SNOW_NOW),
            snow_area_width: lerp(&SNOW_AREA_WIDTH),
            ice_now: lerp(&ICE_NOW),
        }
    }
}
