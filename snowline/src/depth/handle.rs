//! Versioned publication of the current depth grid.

use std::sync::Arc;

use parking_lot::RwLock;

use super::DepthGrid;

struct Published {
    version: u64,
    grid: Arc<DepthGrid>,
}

/// Owner of the grid readers currently sample from.
///
/// Publishing swaps in a new grid under a short write lock; readers get an
/// `Arc` to whatever grid was current when they asked and keep using it
/// even if a newer one is published meanwhile. Grids are never mutated in
/// place.
pub struct GridHandle {
    current: RwLock<Published>,
}

impl GridHandle {
    /// Create a handle holding an all-zero grid at version 0.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Published {
                version: 0,
                grid: Arc::new(DepthGrid::new()),
            }),
        }
    }

    /// Publish `grid` and return its version.
    pub fn publish(&self, grid: DepthGrid) -> u64 {
        let grid = Arc::new(grid);
        let mut current = self.current.write();
        current.version += 1;
        current.grid = grid;
        tracing::info!(
            version = current.version,
            seqno = current.grid.seqno(),
            "Published depth grid"
        );
        current.version
    }

    /// The currently published grid.
    pub fn current(&self) -> Arc<DepthGrid> {
        Arc::clone(&self.current.read().grid)
    }

    /// The currently published grid together with its version.
    pub fn snapshot(&self) -> (u64, Arc<DepthGrid>) {
        let current = self.current.read();
        (current.version, Arc::clone(&current.grid))
    }

    pub fn version(&self) -> u64 {
        self.current.read().version
    }
}

impl Default for GridHandle {
    fn default() -> Self {
        Self::new()
    }
}
