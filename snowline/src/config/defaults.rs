//! Default values for configuration settings.

use super::file::config_directory;
use super::settings::{LoggingSettings, SnowSettings};
use crate::logging::DEFAULT_LOG_FILE;

/// Default for `[snow] coastal_extension`.
pub const DEFAULT_COASTAL_EXTENSION: bool = true;

/// Default for `[snow] legacy_airports`.
pub const DEFAULT_LEGACY_AIRPORTS: bool = true;

/// Default for `[snow] runway_ice`.
pub const DEFAULT_RUNWAY_ICE: bool = true;

/// Default log directory name inside the config directory.
pub const DEFAULT_LOG_DIR_NAME: &str = "logs";

impl Default for SnowSettings {
    fn default() -> Self {
        Self {
            coast_map: None,
            coastal_extension: DEFAULT_COASTAL_EXTENSION,
            legacy_airports: DEFAULT_LEGACY_AIRPORTS,
            runway_ice: DEFAULT_RUNWAY_ICE,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: config_directory().join(DEFAULT_LOG_DIR_NAME),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}
