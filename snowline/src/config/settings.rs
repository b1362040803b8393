//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    /// X-Plane settings
    pub xplane: XPlaneSettings,
    /// Snow correction settings
    pub snow: SnowSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// X-Plane configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XPlaneSettings {
    /// X-Plane installation root (None = detect)
    pub directory: Option<PathBuf>,
}

/// Snow correction configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SnowSettings {
    /// 3600x1800 land/water PNG (None = no coastal correction)
    pub coast_map: Option<PathBuf>,
    /// Carry inland snow onto coast cells
    pub coastal_extension: bool,
    /// Taper snow around legacy airports
    pub legacy_airports: bool,
    /// Let X-Plane draw ice and snow on runways
    pub runway_ice: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log directory
    pub directory: PathBuf,
    /// Log file name inside `directory`
    pub file: String,
}
