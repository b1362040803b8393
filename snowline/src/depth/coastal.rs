//! Coastal snow extension.
//!
//! The weather model's cells blend land and sea, so snow on a coastline is
//! often reported close to zero although there is plenty a few cells
//! inland. For every coast cell with little snow we look up to [`MAX_STEP`]
//! cells inland along the cell's coast direction. If deeper snow is found
//! it is carried back to the coast, decaying by [`DECAY`] per step.
//!
//! This is a visual correction only; nothing is conserved.

use super::{DepthGrid, GRID_HEIGHT, GRID_WIDTH};
use crate::coast::CoastMap;

/// Coast cells above this depth are left alone; also the floor of extended values.
pub const MIN_SNOW_DEPTH: f32 = 0.02;

/// Cells to look inland for snow (~5 to 10 km per step).
pub const MAX_STEP: i32 = 3;

/// Depth decay per step from the inland source towards the coast.
pub const DECAY: f32 = 0.8;

impl DepthGrid {
    /// Return a new grid with inland snow extended onto coast cells.
    ///
    /// `self` is not modified. Every output cell is at least the input value.
    pub fn extend_coastal_snow(&self, coast: &CoastMap) -> DepthGrid {
        let mut extended = DepthGrid::new();
        let mut n_extend = 0usize;

        for i in 0..GRID_WIDTH as i32 {
            for j in 0..GRID_HEIGHT as i32 {
                let sd = self.get_idx(i, j);
                // may already hold an inland extension from an earlier cell
                extended.raise(i, j, sd);

                if sd > MIN_SNOW_DEPTH {
                    continue;
                }
                let Some(dir) = coast.coast_direction(i, j) else {
                    continue;
                };

                let (di, dj) = dir.offset();
                let Some((inland_dist, mut inland_sd)) = self.find_inland_snow(coast, i, j, di, dj, sd)
                else {
                    continue;
                };

                // exponential decay from the inland point back to the coast cell
                for k in (0..inland_dist).rev() {
                    inland_sd = (inland_sd * DECAY).max(MIN_SNOW_DEPTH);
                    extended.raise(i + k * di, j + k * dj, inland_sd);
                    n_extend += 1;
                }
            }
        }

        tracing::info!(
            source = self.seqno(),
            seqno = extended.seqno(),
            points = n_extend,
            "Extended coastal snow"
        );
        extended
    }

    /// First cell along `(di, dj)` with more snow than the coast cell.
    ///
    /// Water is skipped except on the last step, so a narrow strip of open
    /// water does not end the search.
    fn find_inland_snow(
        &self,
        coast: &CoastMap,
        i: i32,
        j: i32,
        di: i32,
        dj: i32,
        sd: f32,
    ) -> Option<(i32, f32)> {
        for k in 1..=MAX_STEP {
            let ii = i + k * di;
            let jj = j + k * dj;

            if k < MAX_STEP && coast.is_water(ii, jj) {
                continue;
            }

            let candidate = self.get_idx(ii, jj);
            if candidate > sd && candidate > MIN_SNOW_DEPTH {
                return Some((k, candidate));
            }
        }
        None
    }
}
