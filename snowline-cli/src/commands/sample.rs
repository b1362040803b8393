//! Depth grid sampling.
//!
//! Loads a depth CSV the same way the engine does, applies the coastal
//! extension if a coast raster is available and prints the raw and corrected
//! depth at one position together with the X-Plane dataref values.

use std::path::{Path, PathBuf};

use snowline::airport::LegacyAirports;
use snowline::coast::CoastMap;
use snowline::config::ConfigFile;
use snowline::coord::LLPos;
use snowline::depth::DepthGrid;
use snowline::engine::SnowEngine;
use snowline::xplane::XPlaneSnow;

use crate::error::CliError;

/// Arguments of `snowline sample`.
#[derive(Debug)]
pub struct SampleArgs {
    pub csv: PathBuf,
    pub lat: f64,
    pub lon: f64,
    /// Overrides `[snow] coast_map`.
    pub raster: Option<PathBuf>,
}

/// Depths at the sampled position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleReport {
    pub raw: f32,
    pub corrected: f32,
    pub snow: XPlaneSnow,
}

/// Run `snowline sample`.
pub fn run(args: SampleArgs, config: &ConfigFile) -> Result<(), CliError> {
    let pos = LLPos::checked(args.lon, args.lat).map_err(CliError::InvalidPosition)?;
    let raster = args.raster.as_deref().or(config.snow.coast_map.as_deref());
    let coast = raster.map(CoastMap::load).transpose()?;
    if coast.is_none() {
        println!("No coast raster configured, coastal extension skipped");
    }

    let report = sample(&args.csv, pos, coast, config)?;
    print!("{}", format_report(pos, &report));
    Ok(())
}

/// Load `csv`, build the corrected grid and sample both at `pos`.
pub fn sample(
    csv: &Path,
    pos: LLPos,
    coast: Option<CoastMap>,
    config: &ConfigFile,
) -> Result<SampleReport, CliError> {
    let (raw, stats) = DepthGrid::from_csv_file(csv)?;
    println!(
        "Loaded {} grid points from {} ({} skipped)",
        stats.loaded,
        csv.display(),
        stats.skipped
    );

    let engine = SnowEngine::new(coast, LegacyAirports::new(), config.snow.clone());
    engine.publish(engine.build_corrected_grid(&raw));

    let corrected = engine.sample(pos.lon, pos.lat);
    Ok(SampleReport {
        raw: raw.get(pos.lon, pos.lat),
        corrected,
        snow: XPlaneSnow::from_depth(corrected),
    })
}

/// Report as printed by `snowline sample`.
pub fn format_report(pos: LLPos, report: &SampleReport) -> String {
    format!(
        "Position {}\n  Raw depth:       {:.3} m\n  Corrected depth: {:.3} m\n  \
         snow_now:        {:.3}\n  snow_area_width: {:.3}\n  ice_now:         {:.3}\n",
        pos,
        report.raw,
        report.corrected,
        report.snow.snow_now,
        report.snow.snow_area_width,
        report.snow.ice_now,
    )
}
