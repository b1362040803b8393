//! Legacy airport listing.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use snowline::airport::{Airport, LegacyAirports};
use snowline::config::ConfigFile;
use snowline::xplane;

use crate::error::CliError;

/// Run `snowline airports`.
///
/// The X-Plane directory is taken from `--xplane-dir`, then from the
/// config, then from X-Plane's install reference.
pub fn run(xplane_dir: Option<PathBuf>, config: &ConfigFile) -> Result<(), CliError> {
    let dir = resolve_xplane_dir(xplane_dir, config)?;
    if !has_custom_scenery(&dir) {
        println!("Warning: {} has no Custom Scenery directory", dir.display());
    }
    let airports = LegacyAirports::from_xplane_dir(&dir)?;

    println!("X-Plane directory: {}", dir.display());
    println!("Legacy airports: {}", airports.len());
    for airport in airports.iter() {
        println!();
        print!("{}", format_airport(airport));
    }
    Ok(())
}

fn resolve_xplane_dir(cli_dir: Option<PathBuf>, config: &ConfigFile) -> Result<PathBuf, CliError> {
    if let Some(dir) = cli_dir.or_else(|| config.xplane.directory.clone()) {
        return Ok(dir);
    }
    xplane::detect_xplane_install().map_err(CliError::XPlaneNotFound)
}

/// One airport as printed by `snowline airports`.
pub fn format_airport(airport: &Airport) -> String {
    let mut out = format!(
        "{}\n  Circle: center {} radius {:.0} m\n",
        airport.name(),
        airport.mec_center(),
        airport.mec_radius()
    );
    for runway in airport.runways() {
        let _ = writeln!(out, "  Runway {:<4} {} - {}", runway.name, runway.end1, runway.end2);
    }
    out
}

/// Whether `dir` looks like an X-Plane installation.
pub fn has_custom_scenery(dir: &Path) -> bool {
    xplane::paths::custom_scenery_path(dir).is_dir()
}
