//! Ordered collection of legacy airports.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::parser::AptDatParser;
use super::scenery::{SceneryPacks, SceneryPacksError};
use super::{Airport, AirportError};
use crate::coord::LLPos;

/// Legacy airports in discovery order.
///
/// The order follows `scenery_packs.ini` and, within a pack, apt.dat. It is
/// the order in which proximity searches visit airports.
#[derive(Debug, Default)]
pub struct LegacyAirports {
    airports: Vec<Airport>,
}

impl LegacyAirports {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_airports(airports: Vec<Airport>) -> Self {
        Self { airports }
    }

    /// Collect legacy airports from all enabled scenery packs of an X-Plane
    /// installation.
    ///
    /// A missing `scenery_packs.ini` yields an empty collection.
    pub fn from_xplane_dir<P: AsRef<Path>>(xplane_dir: P) -> Result<Self, AirportError> {
        match SceneryPacks::from_xplane_dir(xplane_dir) {
            Ok(packs) => Ok(Self::from_scenery_packs(&packs)),
            Err(SceneryPacksError::NotFound(path)) => {
                tracing::warn!(path = %path.display(), "No scenery_packs.ini, no legacy airports");
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Collect legacy airports from the apt.dat of every pack.
    ///
    /// Packs without apt.dat are skipped; unreadable ones are logged and
    /// skipped.
    pub fn from_scenery_packs(packs: &SceneryPacks) -> Self {
        let mut collection = Self::new();

        for apt_dat in packs.apt_dat_paths() {
            if !apt_dat.exists() {
                continue;
            }

            let added = File::open(&apt_dat)
                .map_err(AirportError::from)
                .and_then(|file| collection.extend_from_reader(BufReader::new(file)));
            match added {
                Ok(count) if count > 0 => {
                    tracing::info!(path = %apt_dat.display(), count, "Loaded legacy airports");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %apt_dat.display(), error = %e, "Skipping apt.dat");
                }
            }
        }

        tracing::info!(
            packs = packs.len(),
            airports = collection.len(),
            "Collected legacy airports"
        );
        collection
    }

    /// Build a collection from a single apt.dat reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AirportError> {
        let mut collection = Self::new();
        collection.extend_from_reader(reader)?;
        Ok(collection)
    }

    /// Append the legacy airports of an apt.dat reader, returning how many
    /// were added.
    fn extend_from_reader<R: Read>(&mut self, reader: R) -> Result<usize, AirportError> {
        let records = AptDatParser::parse_all(reader)?;
        let before = self.airports.len();
        for record in records {
            let airport = Airport::new(&record.name, record.runways)?;
            tracing::info!(
                name = airport.name(),
                runways = airport.runways().len(),
                center = %airport.mec_center(),
                radius = airport.mec_radius(),
                "Legacy airport"
            );
            self.airports.push(airport);
        }
        Ok(self.airports.len() - before)
    }

    /// First airport, in collection order, whose circle center is closer
    /// than `radius` meters to `pos`, with its distance.
    pub fn first_within(&self, pos: LLPos, radius: f64) -> Option<(&Airport, f64)> {
        self.airports.iter().find_map(|airport| {
            let dist = (pos - airport.mec_center()).len();
            (dist < radius).then_some((airport, dist))
        })
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.iter()
    }
}
