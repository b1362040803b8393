//! World snow depth grid.
//!
//! A [`DepthGrid`] holds snow depth in meters on a 0.1° world grid of
//! [`GRID_WIDTH`]×[`GRID_HEIGHT`] cells, indexed `[lon][lat]` with
//! `i = lon × 10` (lon in `[0, 360)`) and `j = (lat + 90) × 10`. The extra
//! latitude row makes both poles part of the grid.
//!
//! Grids are built once (from CSV, or by transforming another grid) and are
//! read-only afterwards; see [`GridHandle`] for publishing a grid to readers.
//!
//! # Example
//!
//! ```
//! use snowline::depth::DepthGrid;
//!
//! let csv = "lon,lat,value\n10.0,45.0,0.2\n10.1,45.0,0.4\n";
//! let mut grid = DepthGrid::new();
//! let stats = grid.load_csv(csv.as_bytes()).unwrap();
//! assert_eq!(stats.loaded, 2);
//!
//! // halfway between the two cells
//! let depth = grid.get(10.05, 45.0);
//! assert!((depth - 0.3).abs() < 1e-6);
//! ```

mod coastal;
mod csv;
mod handle;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::grid::{self, CELLS_PER_DEGREE};

pub use coastal::{DECAY, MAX_STEP, MIN_SNOW_DEPTH};
pub use csv::{CsvStats, ZERO_THRESHOLD};
pub use handle::GridHandle;

/// Longitude cells of the depth grid.
pub const GRID_WIDTH: usize = grid::LON_CELLS;

/// Latitude cells of the depth grid, both poles included.
pub const GRID_HEIGHT: usize = 1801;

static NEXT_SEQNO: AtomicU64 = AtomicU64::new(1);

/// Errors raised while loading a depth grid.
#[derive(Debug, Error)]
pub enum DepthGridError {
    #[error("snow depth CSV not found at: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Snow depth on the 0.1° world grid.
pub struct DepthGrid {
    seqno: u64,
    values: Vec<f32>,
}

impl DepthGrid {
    /// Create a grid with zero depth everywhere.
    pub fn new() -> Self {
        Self::with_values(vec![0.0; GRID_WIDTH * GRID_HEIGHT])
    }

    /// Build a grid by evaluating `f` for every in-range cell `(i, j)`.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        let mut values = Vec::with_capacity(GRID_WIDTH * GRID_HEIGHT);
        for i in 0..GRID_WIDTH {
            for j in 0..GRID_HEIGHT {
                values.push(f(i, j));
            }
        }
        Self::with_values(values)
    }

    fn with_values(values: Vec<f32>) -> Self {
        let seqno = NEXT_SEQNO.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(seqno, "DepthGrid created");
        Self { seqno, values }
    }

    /// Process-unique sequence number of this grid.
    pub fn seqno(&self) -> u64 {
        self.seqno
    }

    /// Depth at cell `(i_lon, i_lat)`; longitude wraps, latitude clamps.
    #[inline]
    pub fn get_idx(&self, i_lon: i32, i_lat: i32) -> f32 {
        self.values[grid::offset(i_lon, i_lat, GRID_WIDTH, GRID_HEIGHT)]
    }

    /// Bilinearly interpolated depth at a geodetic position.
    ///
    /// `lon` is expected in `[-180, 180)` and `lat` in `[-90, 90]`.
    pub fn get(&self, lon: f64, lat: f64) -> f32 {
        let lon = if lon < 0.0 { lon + 360.0 } else { lon };
        let x = lon * CELLS_PER_DEGREE;
        let y = (lat + 90.0) * CELLS_PER_DEGREE;

        // lower left corner of the cell
        let x0 = x.floor();
        let y0 = y.floor();
        let (i, j) = (x0 as i32, y0 as i32);

        // (s, t) within the cell, in [0, 1)
        let s = x - x0;
        let t = y - y0;

        let v00 = f64::from(self.get_idx(i, j));
        let v10 = f64::from(self.get_idx(i + 1, j));
        let v01 = f64::from(self.get_idx(i, j + 1));
        let v11 = f64::from(self.get_idx(i + 1, j + 1));

        // Lagrange polynomials: pij is 1 on corner ij and 0 on the others
        let p00 = (1.0 - s) * (1.0 - t);
        let p10 = s * (1.0 - t);
        let p01 = (1.0 - s) * t;
        let p11 = s * t;

        (v00 * p00 + v10 * p10 + v01 * p01 + v11 * p11) as f32
    }

    /// Raise cell `(i, j)` to at least `value`.
    #[inline]
    fn raise(&mut self, i: i32, j: i32, value: f32) {
        let cell = &mut self.values[grid::offset(i, j, GRID_WIDTH, GRID_HEIGHT)];
        if value > *cell {
            *cell = value;
        }
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: f32) {
        self.values[i * GRID_HEIGHT + j] = value;
    }
}

impl Default for DepthGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DepthGrid {
    fn clone(&self) -> Self {
        Self::with_values(self.values.clone())
    }
}

impl Drop for DepthGrid {
    fn drop(&mut self) {
        tracing::debug!(seqno = self.seqno, "DepthGrid destroyed");
    }
}

impl std::fmt::Debug for DepthGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepthGrid")
            .field("seqno", &self.seqno)
            .finish_non_exhaustive()
    }
}
