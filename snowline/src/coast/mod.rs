//! World coastline raster.
//!
//! The [`CoastMap`] classifies every 0.1° cell of the globe as water, land or
//! coast. Coast cells are water cells right off a shoreline; they carry the
//! 8-way [`Direction`] pointing towards land, which the coastal snow
//! extension follows to find inland snow.
//!
//! # Indexing
//!
//! The raster is indexed `[lon][lat]` in the depth grid's convention:
//! `i = lon × 10` with lon in `[0, 360)`, `j = (lat + 90) × 10`.
//! Longitude wraps, latitude clamps (see [`crate::grid`]).
//!
//! # Example
//!
//! ```
//! use snowline::coast::{CellState, CoastMap, Direction};
//!
//! // A map where a single cell is a coast facing north
//! let map = CoastMap::from_fn(|i, j| {
//!     if (i, j) == (100, 900) {
//!         CellState::Coast(Direction::N)
//!     } else {
//!         CellState::Water
//!     }
//! });
//!
//! assert_eq!(map.coast_direction(100, 900), Some(Direction::N));
//! assert_eq!(map.coast_direction(101, 900), None);
//! assert!(map.is_water(3700, 900)); // wraps to i = 100
//! ```

mod classify;

use std::path::PathBuf;

use thiserror::Error;

use crate::grid;

pub use classify::{classify, ALIGN_SHIFT, POLAR_BAND};

/// Longitude cells of the coastline raster.
pub const COAST_WIDTH: usize = grid::LON_CELLS;

/// Latitude cells of the coastline raster.
pub const COAST_HEIGHT: usize = 1800;

/// Errors raised while loading the coastline raster.
#[derive(Debug, Error)]
pub enum CoastMapError {
    #[error("coast raster not found at: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode coast raster: {0}")]
    Decode(#[from] image::ImageError),

    #[error(
        "invalid coast raster dimensions {width}x{height} (expected {}x{})",
        COAST_WIDTH,
        COAST_HEIGHT
    )]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid coast raster bit depth: {0} bits per channel (expected 8)")]
    InvalidBitDepth(u16),
}

/// 8-way compass direction in grid convention.
///
/// Index 0 is east and indices increase counter-clockwise, so `j` (latitude)
/// grows towards [`Direction::N`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    E = 0,
    NE = 1,
    N = 2,
    NW = 3,
    W = 4,
    SW = 5,
    S = 6,
    SE = 7,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 8] = [
        Direction::E,
        Direction::NE,
        Direction::N,
        Direction::NW,
        Direction::W,
        Direction::SW,
        Direction::S,
        Direction::SE,
    ];

    const DX: [i32; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
    const DY: [i32; 8] = [0, 1, 1, 1, 0, -1, -1, -1];

    /// Direction for a compass index, taken modulo 8.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 8]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid step `(di, dj)` of this direction.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        (Self::DX[self.index()], Self::DY[self.index()])
    }

    /// True for NE, NW, SW and SE.
    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.index() & 1 == 1
    }
}

/// Classification of a single raster cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Water,
    Land,
    /// Water cell at a shoreline; the direction points towards land.
    Coast(Direction),
}

/// Cell counts of a classified map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoastStats {
    pub water: usize,
    pub land: usize,
    pub coast: usize,
}

/// Immutable classified world raster.
#[derive(Clone)]
pub struct CoastMap {
    cells: Vec<CellState>,
}

impl CoastMap {
    /// Builds a map by evaluating `f` for every in-range cell `(i, j)`.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> CellState,
    {
        let mut cells = Vec::with_capacity(COAST_WIDTH * COAST_HEIGHT);
        for i in 0..COAST_WIDTH {
            for j in 0..COAST_HEIGHT {
                cells.push(f(i, j));
            }
        }
        Self { cells }
    }

    /// State of cell `(i, j)`; longitude wraps, latitude clamps.
    #[inline]
    pub fn state(&self, i: i32, j: i32) -> CellState {
        self.cells[grid::offset(i, j, COAST_WIDTH, COAST_HEIGHT)]
    }

    /// Direction towards land if `(i, j)` is a coast cell.
    #[inline]
    pub fn coast_direction(&self, i: i32, j: i32) -> Option<Direction> {
        match self.state(i, j) {
            CellState::Coast(dir) => Some(dir),
            _ => None,
        }
    }

    /// True for plain water; coast cells are not counted as water.
    #[inline]
    pub fn is_water(&self, i: i32, j: i32) -> bool {
        self.state(i, j) == CellState::Water
    }

    #[inline]
    pub fn is_land(&self, i: i32, j: i32) -> bool {
        self.state(i, j) == CellState::Land
    }

    pub fn stats(&self) -> CoastStats {
        let mut stats = CoastStats::default();
        for cell in &self.cells {
            match cell {
                CellState::Water => stats.water += 1,
                CellState::Land => stats.land += 1,
                CellState::Coast(_) => stats.coast += 1,
            }
        }
        stats
    }
}

impl std::fmt::Debug for CoastMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("CoastMap")
            .field("water", &stats.water)
            .field("land", &stats.land)
            .field("coast", &stats.coast)
            .finish()
    }
}
