//! Coastline raster inspection.

use std::path::Path;

use snowline::coast::{CoastMap, CoastStats};

use crate::error::CliError;

/// Classify the raster at `raster` and print its cell counts.
pub fn run(raster: &Path) -> Result<(), CliError> {
    let map = CoastMap::load(raster)?;
    println!("Coast raster: {}", raster.display());
    print!("{}", format_stats(&map.stats()));
    Ok(())
}

/// Cell counts as printed by `snowline coast`.
pub fn format_stats(stats: &CoastStats) -> String {
    let total = stats.water + stats.land + stats.coast;
    let percent = |n: usize| {
        if total == 0 {
            0.0
        } else {
            100.0 * n as f64 / total as f64
        }
    };

    format!(
        "  Water: {:>9} ({:5.1}%)\n  Land:  {:>9} ({:5.1}%)\n  Coast: {:>9} ({:5.1}%)\n",
        stats.water,
        percent(stats.water),
        stats.land,
        percent(stats.land),
        stats.coast,
        percent(stats.coast),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stats() {
        let stats = CoastStats {
            water: 50,
            land: 40,
            coast: 10,
        };
        let out = format_stats(&stats);
        assert!(out.contains("Water:        50 ( 50.0%)"));
        assert!(out.contains("Land:         40 ( 40.0%)"));
        assert!(out.contains("Coast:        10 ( 10.0%)"));
    }

    #[test]
    fn test_format_empty_stats() {
        let out = format_stats(&CoastStats::default());
        assert!(out.contains("(  0.0%)"));
    }

    #[test]
    fn test_missing_raster() {
        let result = run(Path::new("/nonexistent/coast_map.png"));
        assert!(matches!(result, Err(CliError::CoastMap(_))));
    }
}
