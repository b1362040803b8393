//! Geodetic positions and the local tangent-plane vector space.
//!
//! At every geodetic point `(lon, lat)` we attach a 2-D vector space with an
//! orthogonal basis scaled in meters. The difference of two positions is a
//! vector in the space attached at the subtrahend, and adding that vector
//! back yields the original position again:
//!
//! ```
//! use snowline::coord::LLPos;
//!
//! let a = LLPos::new(11.07, 60.18);
//! let b = LLPos::new(11.09, 60.21);
//! let v = b - a;
//! let c = a + v;
//! assert!((c.lon - b.lon).abs() < 1e-9 && (c.lat - b.lat).abs() < 1e-9);
//! ```
//!
//! The approximation is only meant for neighborhoods of ~20 km, which is
//! all the airport geometry needs.

mod types;

pub use types::{CoordError, LLPos, Vec2, FT_TO_M, LAT_TO_M, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

use std::ops::{Add, Mul, Neg, Sub};

/// Normalizes an angle in degrees to (-180, 180].
#[inline]
pub fn relative_angle(angle: f64) -> f64 {
    let angle = angle % 360.0;
    if angle > 180.0 {
        angle - 360.0
    } else if angle <= -180.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Meters per degree of longitude at `lat`.
#[inline]
fn lon_to_m(lat: f64) -> f64 {
    LAT_TO_M * lat.to_radians().cos()
}

// pos - pos
impl Sub for LLPos {
    type Output = Vec2;

    #[inline]
    fn sub(self, origin: LLPos) -> Vec2 {
        Vec2 {
            x: relative_angle(self.lon - origin.lon) * lon_to_m(origin.lat),
            y: relative_angle(self.lat - origin.lat) * LAT_TO_M,
        }
    }
}

// pos + vec
impl Add<Vec2> for LLPos {
    type Output = LLPos;

    #[inline]
    fn add(self, v: Vec2) -> LLPos {
        LLPos {
            lon: relative_angle(self.lon + v.x / lon_to_m(self.lat)),
            lat: relative_angle(self.lat + v.y / LAT_TO_M),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    #[inline]
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

// c * vec
impl Mul<Vec2> for f64 {
    type Output = Vec2;

    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        Vec2::new(self * v.x, self * v.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    #[inline]
    fn mul(self, c: f64) -> Vec2 {
        c * self
    }
}
