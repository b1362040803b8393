//! Index helpers shared by every 0.1° world raster.
//!
//! Both the coastline raster and the depth grid are indexed `[lon][lat]`
//! with longitude wrapping around the globe and latitude clamped at the
//! poles. All lookups go through these helpers so that the two rasters agree
//! on which cell a given index pair refers to.

/// Cells per degree.
pub const CELLS_PER_DEGREE: f64 = 10.0;

/// Number of longitude cells covering the globe.
pub const LON_CELLS: usize = 3600;

/// Wraps a longitude index into `[0, width)`.
#[inline]
pub fn wrap_lon(i: i32, width: usize) -> usize {
    i.rem_euclid(width as i32) as usize
}

/// Clamps a latitude index into `[0, height - 1]`.
#[inline]
pub fn clamp_lat(j: i32, height: usize) -> usize {
    j.clamp(0, height as i32 - 1) as usize
}

/// Canonical storage offset of `(i, j)` in a `[lon][lat]` raster.
#[inline]
pub fn offset(i: i32, j: i32, width: usize, height: usize) -> usize {
    wrap_lon(i, width) * height + clamp_lat(j, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_lon() {
        assert_eq!(wrap_lon(0, 3600), 0);
        assert_eq!(wrap_lon(3599, 3600), 3599);
        assert_eq!(wrap_lon(3600, 3600), 0);
        assert_eq!(wrap_lon(-1, 3600), 3599);
        assert_eq!(wrap_lon(-3601, 3600), 3599);
        assert_eq!(wrap_lon(7201, 3600), 1);
    }

    #[test]
    fn test_clamp_lat() {
        assert_eq!(clamp_lat(-5, 1801), 0);
        assert_eq!(clamp_lat(900, 1801), 900);
        assert_eq!(clamp_lat(1801, 1801), 1800);
        assert_eq!(clamp_lat(5000, 1800), 1799);
    }

    #[test]
    fn test_offset_is_column_major() {
        assert_eq!(offset(0, 0, 4, 3), 0);
        assert_eq!(offset(0, 2, 4, 3), 2);
        assert_eq!(offset(1, 0, 4, 3), 3);
        assert_eq!(offset(-1, 7, 4, 3), 3 * 3 + 2);
    }
}
