//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [xplane] section
    if let Some(section) = ini.section(Some("xplane")) {
        if let Some(v) = section.get("directory") {
            config.xplane.directory = optional_path(v);
        }
    }

    // [snow] section
    if let Some(section) = ini.section(Some("snow")) {
        if let Some(v) = section.get("coast_map") {
            config.snow.coast_map = optional_path(v);
        }
        if let Some(v) = section.get("coastal_extension") {
            config.snow.coastal_extension =
                parse_bool(v).ok_or_else(|| invalid_bool("snow", "coastal_extension", v))?;
        }
        if let Some(v) = section.get("legacy_airports") {
            config.snow.legacy_airports =
                parse_bool(v).ok_or_else(|| invalid_bool("snow", "legacy_airports", v))?;
        }
        if let Some(v) = section.get("runway_ice") {
            config.snow.runway_ice =
                parse_bool(v).ok_or_else(|| invalid_bool("snow", "runway_ice", v))?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            if let Some(dir) = optional_path(v) {
                config.logging.directory = dir;
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if v.contains(['/', '\\']) {
                return Err(ConfigFileError::InvalidValue {
                    section: "logging".to_string(),
                    key: "file".to_string(),
                    value: v.to_string(),
                    reason: "must be a file name; set the directory with 'directory'".to_string(),
                });
            }
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

/// Parse a boolean, `None` if the value is not one.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid_bool(section: &str, key: &str, value: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: "must be true or false".to_string(),
    }
}

/// Empty values mean "not set".
fn optional_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    (!value.is_empty()).then(|| expand_tilde(value))
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
