//! Snowline CLI - Command-line interface
//!
//! This binary provides offline inspection of the inputs of the snowline
//! engine: coastline rasters, snow depth grids and legacy airports.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::sample::SampleArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "snowline")]
#[command(version = snowline::VERSION)]
#[command(about = "Inspect snow depth, coastlines and legacy airports for X-Plane", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.snowline/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a coastline raster and print water/land/coast counts
    Coast {
        /// 8-bit land/water PNG of 3600x1800 pixels
        #[arg(long)]
        raster: PathBuf,
    },

    /// Sample a snow depth CSV at a position
    Sample {
        /// CSV with lon,lat,value rows
        #[arg(long)]
        csv: PathBuf,

        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Coastline raster for the coastal extension (default: [snow] coast_map)
        #[arg(long)]
        raster: Option<PathBuf>,
    },

    /// List legacy airports of an X-Plane installation
    Airports {
        /// X-Plane directory (default: [xplane] directory, then auto-detect)
        #[arg(long)]
        xplane_dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = commands::common::load_config(cli.config.as_deref())?;
    let _logging_guard = commands::common::init_logging_from(&config)?;
    tracing::info!(version = snowline::VERSION, "snowline started");

    match cli.command {
        Commands::Coast { raster } => commands::coast::run(&raster),
        Commands::Sample {
            csv,
            lat,
            lon,
            raster,
        } => commands::sample::run(
            SampleArgs {
                csv,
                lat,
                lon,
                raster,
            },
            &config,
        ),
        Commands::Airports { xplane_dir } => commands::airports::run(xplane_dir, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sample_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "snowline", "sample", "--csv", "snod.csv", "--lat", "-33.9", "--lon", "-18.6",
        ])
        .unwrap();

        match cli.command {
            Commands::Sample { lat, lon, raster, .. } => {
                assert_eq!(lat, -33.9);
                assert_eq!(lon, -18.6);
                assert!(raster.is_none());
            }
            _ => panic!("expected sample"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "snowline", "coast", "--raster", "coast.png", "--config", "/tmp/config.ini",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.ini")));
        assert!(matches!(cli.command, Commands::Coast { .. }));
    }

    #[test]
    fn test_coast_requires_raster() {
        assert!(Cli::try_parse_from(["snowline", "coast"]).is_err());
    }
}
