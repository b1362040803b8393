//! Coastline classification from a land/water raster.
//!
//! The input is an 8-bit image of exactly [`COAST_WIDTH`]×[`COAST_HEIGHT`]
//! pixels where `0` is water and anything else is land (e.g. the ESA CCI
//! ocean map downsampled to 0.1°). Its origin is top-left at 180°W, so the
//! rows are flipped and the columns rotated by half the width to land in the
//! depth grid's `[0°, 360°)` convention. An extra shift of [`ALIGN_SHIFT`]
//! cells in both axes lines the coastline up with the weather grid.

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageReader};

use super::{CellState, CoastMap, CoastMapError, Direction, COAST_HEIGHT, COAST_WIDTH};
use crate::grid;

/// Rows at either pole that never get coast detection.
pub const POLAR_BAND: usize = 10;

/// Alignment shift between raster and weather grid, in cells.
pub const ALIGN_SHIFT: usize = 3;

const DIAGONAL_WEIGHT: f64 = std::f64::consts::FRAC_1_SQRT_2;

impl CoastMap {
    /// Load and classify the coastline raster at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CoastMapError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoastMapError::NotFound(path.to_path_buf()));
        }

        let image = ImageReader::open(path)?.decode()?;
        tracing::info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "Decoded coast raster"
        );

        let raster = to_land_water(image)?;
        classify(&raster)
    }
}

/// Validates the decoded image and reduces it to one luma byte per pixel.
fn to_land_water(image: DynamicImage) -> Result<GrayImage, CoastMapError> {
    let color = image.color();
    let bits = color.bits_per_pixel() / u16::from(color.channel_count());
    if bits != 8 {
        return Err(CoastMapError::InvalidBitDepth(bits));
    }

    match image {
        DynamicImage::ImageLuma8(gray) => Ok(gray),
        other => Ok(other.to_luma8()),
    }
}

/// Classify a land/water raster into a [`CoastMap`].
///
/// For every water cell outside the polar bands each of the 8 directions is
/// tested: if the two cells behind are water and the cell ahead is land, the
/// direction's unit vector (diagonals weighted 1/√2) is added to a sum. A
/// non-empty sum makes the cell a coast whose direction is the sum's angle
/// snapped to the nearest 8-way direction.
pub fn classify(raster: &GrayImage) -> Result<CoastMap, CoastMapError> {
    let (width, height) = raster.dimensions();
    if width as usize != COAST_WIDTH || height as usize != COAST_HEIGHT {
        return Err(CoastMapError::InvalidDimensions { width, height });
    }

    let source = SourceRaster { raster };
    let map = CoastMap::from_fn(|i_cs, j_cs| {
        // raster cell that lands on (i_cs, j_cs) of the weather grid
        let i = ((i_cs + ALIGN_SHIFT + COAST_WIDTH / 2) % COAST_WIDTH) as i32;
        let j = (j_cs + ALIGN_SHIFT) as i32;
        source.classify_cell(i, j)
    });

    let stats = map.stats();
    tracing::info!(
        coast = stats.coast,
        water = stats.water,
        land = stats.land,
        "Classified coast raster"
    );

    Ok(map)
}

/// Read access to the raw raster in grid orientation (north up, `j` = row from south).
struct SourceRaster<'a> {
    raster: &'a GrayImage,
}

impl SourceRaster<'_> {
    fn is_water(&self, i: i32, j: i32) -> bool {
        let x = grid::wrap_lon(i, COAST_WIDTH);
        // image origin is top-left
        let y = grid::clamp_lat(COAST_HEIGHT as i32 - j, COAST_HEIGHT);
        self.raster.get_pixel(x as u32, y as u32).0[0] == 0
    }

    fn classify_cell(&self, i: i32, j: i32) -> CellState {
        if !self.is_water(i, j) {
            return CellState::Land;
        }

        let polar = (j as usize) < POLAR_BAND || j as usize >= COAST_HEIGHT - POLAR_BAND;
        if polar {
            return CellState::Water;
        }

        match self.land_direction(i, j) {
            Some(dir) => CellState::Coast(dir),
            None => CellState::Water,
        }
    }

    /// Averaged direction towards land, if any direction looks like a shoreline crossing.
    fn land_direction(&self, i: i32, j: i32) -> Option<Direction> {
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut found = false;

        for dir in Direction::ALL {
            let (di, dj) = dir.offset();
            if self.is_water(i - 2 * di, j - 2 * dj)
                && self.is_water(i - di, j - dj)
                && !self.is_water(i + di, j + dj)
            {
                let f = if dir.is_diagonal() { DIAGONAL_WEIGHT } else { 1.0 };
                sum_x += f * f64::from(di);
                sum_y += f * f64::from(dj);
                found = true;
            }
        }

        if !found {
            return None;
        }

        let mut angle = sum_y.atan2(sum_x).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        Some(Direction::from_index((angle / 45.0).round() as usize))
    }
}
