//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use snowline::airport::AirportError;
use snowline::coast::CoastMapError;
use snowline::config::ConfigFileError;
use snowline::coord::CoordError;
use snowline::depth::DepthGridError;
use snowline::xplane::XPlanePathError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to load the coastline raster
    CoastMap(CoastMapError),
    /// Failed to load a depth CSV
    DepthGrid(DepthGridError),
    /// Failed to collect legacy airports
    Airports(AirportError),
    /// No X-Plane directory given and none detected
    XPlaneNotFound(XPlanePathError),
    /// Latitude or longitude out of range
    InvalidPosition(CoordError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::CoastMap(CoastMapError::InvalidDimensions { .. })
            | CliError::CoastMap(CoastMapError::InvalidBitDepth(_)) => {
                eprintln!();
                eprintln!("The coast raster must be an 8-bit grayscale PNG of 3600x1800 pixels");
                eprintln!("(0.1° per pixel, 0 = water, top-left corner at 180°W 90°N).");
            }
            CliError::XPlaneNotFound(_) => {
                eprintln!();
                eprintln!("Pass the X-Plane directory with --xplane-dir, or set it in config.ini:");
                eprintln!("  [xplane]");
                eprintln!("  directory = ~/X-Plane 12");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::CoastMap(e) => write!(f, "Failed to load coast map: {}", e),
            CliError::DepthGrid(e) => write!(f, "Failed to load snow depth: {}", e),
            CliError::Airports(e) => write!(f, "Failed to collect legacy airports: {}", e),
            CliError::XPlaneNotFound(e) => write!(f, "X-Plane installation not found: {}", e),
            CliError::InvalidPosition(e) => write!(f, "Invalid position: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::CoastMap(e) => Some(e),
            CliError::DepthGrid(e) => Some(e),
            CliError::Airports(e) => Some(e),
            CliError::XPlaneNotFound(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<CoastMapError> for CliError {
    fn from(e: CoastMapError) -> Self {
        CliError::CoastMap(e)
    }
}

impl From<DepthGridError> for CliError {
    fn from(e: DepthGridError) -> Self {
        CliError::DepthGrid(e)
    }
}

impl From<AirportError> for CliError {
    fn from(e: AirportError) -> Self {
        CliError::Airports(e)
    }
}
