//! CSV ingestion for depth grids.
//!
//! The weather pipeline converts a GRIB2 snow depth field into rows of
//! `lon,lat,value` with longitude in `[0, 360)`, latitude in `[-90, 90]` and
//! depth in meters, usually preceded by a header line. Longitudes outside
//! `[0, 360)` are wrapped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{DepthGrid, DepthGridError, GRID_HEIGHT, GRID_WIDTH};
use crate::grid::CELLS_PER_DEGREE;

/// Depths below this are stored as zero.
pub const ZERO_THRESHOLD: f32 = 0.001;

/// Outcome of a CSV load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvStats {
    /// Rows written into the grid.
    pub loaded: usize,
    /// Malformed or out-of-range rows that were skipped.
    pub skipped: usize,
}

impl DepthGrid {
    /// Load a grid from a CSV file.
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<(Self, CsvStats), DepthGridError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DepthGridError::NotFound(path.to_path_buf()));
        }

        let reader = BufReader::new(File::open(path)?);
        let mut grid = Self::new();
        let stats = grid.load_csv(reader)?;
        tracing::info!(
            path = %path.display(),
            seqno = grid.seqno(),
            loaded = stats.loaded,
            skipped = stats.skipped,
            "Loaded snow depth CSV"
        );
        Ok((grid, stats))
    }

    /// Read `lon,lat,value` rows into this grid.
    ///
    /// Malformed rows and rows with a latitude off the grid are logged and skipped. A
    /// first line that does not parse is taken as the header.
    pub fn load_csv<R: BufRead>(&mut self, reader: R) -> Result<CsvStats, DepthGridError> {
        let mut stats = CsvStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some((lon, lat, value)) = parse_row(line) else {
                if index == 0 {
                    tracing::debug!(header = line, "Skipping CSV header");
                } else {
                    tracing::warn!(line = index + 1, row = line, "Invalid CSV row");
                    stats.skipped += 1;
                }
                continue;
            };

            let Some((i, j)) = cell_of(lon, lat) else {
                tracing::warn!(line = index + 1, row = line, "CSV row outside grid");
                stats.skipped += 1;
                continue;
            };

            let value = if value < ZERO_THRESHOLD { 0.0 } else { value };
            self.set(i, j, value);
            stats.loaded += 1;
        }

        Ok(stats)
    }
}

fn parse_row(line: &str) -> Option<(f64, f64, f32)> {
    let mut fields = line.split(',').map(str::trim);
    let lon: f64 = fields.next()?.parse().ok()?;
    let lat: f64 = fields.next()?.parse().ok()?;
    let value: f32 = fields.next()?.parse().ok()?;

    if !(lon.is_finite() && lat.is_finite() && value.is_finite()) {
        return None;
    }
    Some((lon, lat, value))
}

/// Grid cell of a CSV grid point, `None` if its latitude is off the grid.
///
/// Longitude wraps, so a point just short of 360° lands on column 0.
fn cell_of(lon: f64, lat: f64) -> Option<(usize, usize)> {
    let i = (lon * CELLS_PER_DEGREE).round().rem_euclid(GRID_WIDTH as f64);
    let j = ((lat + 90.0) * CELLS_PER_DEGREE).round();

    (0.0..GRID_HEIGHT as f64)
        .contains(&j)
        .then_some((i as usize, j as usize))
}
