//! Legacy airports of the user's custom scenery.
//!
//! Older scenery packs draw their runways with a transparent surface (code
//! 15) on top of X-Plane's own terrain, which then shows snow right through
//! the runway. Around these airports snow depth is tapered down (see
//! [`crate::legacy`]), which needs each airport's footprint: the minimum
//! enclosing circle of its runway endpoints.
//!
//! # Data Source
//!
//! Airports are read from every enabled pack listed in
//! `{XPlane}/Custom Scenery/scenery_packs.ini`, at
//! `{pack}/Earth nav data/apt.dat`.
//!
//! # Example
//!
//! ```ignore
//! use snowline::airport::LegacyAirports;
//!
//! let airports = LegacyAirports::from_xplane_dir("/path/to/X-Plane 12")?;
//! for airport in airports.iter() {
//!     println!("{} r={:.0} m", airport.name(), airport.mec_radius());
//! }
//! ```

mod collection;
pub mod mec;
mod parser;
mod scenery;

use std::sync::OnceLock;

use crate::coord::{LLPos, Vec2};
use crate::legacy::TerrainProbe;

pub use collection::LegacyAirports;
pub use parser::{AirportRecord, AptDatParser, ParseError};
pub use scenery::{SceneryPacks, SceneryPacksError};

/// Runway surface code of legacy transparent runways, modulo 100.
pub const TRANSPARENT_SURFACE: u32 = 15;

/// Error type for airport construction and loading.
#[derive(Debug, thiserror::Error)]
pub enum AirportError {
    #[error("airport '{0}' has no runways")]
    NoRunways(String),
    #[error("failed to read scenery packs: {0}")]
    SceneryPacks(#[from] SceneryPacksError),
    #[error("failed to parse apt.dat: {0}")]
    Parse(#[from] ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A runway with both of its ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Runway {
    /// Designator of end 1 (e.g. "01L").
    pub name: String,
    pub end1: LLPos,
    pub end2: LLPos,
}

impl Runway {
    pub fn new(name: &str, end1: LLPos, end2: LLPos) -> Self {
        Self {
            name: name.to_string(),
            end1,
            end2,
        }
    }
}

/// An airport with legacy runways and its enclosing circle.
#[derive(Debug, Clone)]
pub struct Airport {
    name: String,
    runways: Vec<Runway>,
    mec_center: LLPos,
    mec_radius: f64,
    elevation: OnceLock<f64>,
}

impl Airport {
    /// Create an airport and compute its minimum enclosing circle.
    ///
    /// Fails if `runways` is empty.
    pub fn new(name: &str, runways: Vec<Runway>) -> Result<Self, AirportError> {
        let Some(first) = runways.first() else {
            return Err(AirportError::NoRunways(name.to_string()));
        };

        // tangent plane anchored at the first endpoint
        let anchor = first.end1;
        let points: Vec<Vec2> = runways
            .iter()
            .flat_map(|rwy| [rwy.end1 - anchor, rwy.end2 - anchor])
            .collect();
        let circle = mec::compute_mec(&points);
        let mec_center = anchor + circle.center;

        Ok(Self {
            name: name.to_string(),
            runways,
            mec_center,
            mec_radius: circle.radius,
            elevation: OnceLock::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn runways(&self) -> &[Runway] {
        &self.runways
    }

    /// Center of the minimum enclosing circle of all runway ends.
    pub fn mec_center(&self) -> LLPos {
        self.mec_center
    }

    /// Radius of the minimum enclosing circle in meters.
    pub fn mec_radius(&self) -> f64 {
        self.mec_radius
    }

    /// Ground elevation in meters, if already resolved.
    pub fn elevation(&self) -> Option<f64> {
        self.elevation.get().copied()
    }

    /// Ground elevation in meters, probing the terrain on first use.
    ///
    /// The first runway end is probed once. A miss is logged but its
    /// elevation is kept all the same, so the airport is never probed again.
    pub fn resolve_elevation(&self, probe: &dyn TerrainProbe) -> f64 {
        *self.elevation.get_or_init(|| {
            let pos = self.runways[0].end1;
            let sample = probe.probe(pos);
            if sample.hit {
                tracing::info!(
                    name = %self.name,
                    elevation_m = sample.elevation_m,
                    "Resolved airport elevation"
                );
            } else {
                tracing::warn!(
                    name = %self.name,
                    position = %pos,
                    elevation_m = sample.elevation_m,
                    "Terrain probe missed, using its elevation anyway"
                );
            }
            sample.elevation_m
        })
    }
}
