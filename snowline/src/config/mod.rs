//! Configuration file for snowline.
//!
//! User settings live in `~/.snowline/config.ini`:
//!
//! ```ini
//! [xplane]
//! directory = ~/X-Plane 12
//!
//! [snow]
//! coast_map = ~/.snowline/coast_map.png
//! coastal_extension = true
//! legacy_airports = true
//! runway_ice = true
//!
//! [logging]
//! directory = ~/.snowline/logs
//! file = snowline.log
//! ```
//!
//! Settings structs live in [`settings`], constants in [`defaults`], parsing
//! in `parser` and serialization in `writer`.

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, LoggingSettings, SnowSettings, XPlaneSettings};
