//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let xplane_dir = config
        .xplane
        .directory
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();
    let coast_map = config
        .snow
        .coast_map
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    format!(
        r#"[xplane]
; X-Plane 12 installation directory (empty = auto-detect)
directory = {}

[snow]
; 3600x1800 land/water PNG, 8 bit, black is water (empty = no coastal correction)
coast_map = {}
; Carry inland snow up to 3 cells onto coastlines
coastal_extension = {}
; Taper snow around airports with transparent legacy runways
legacy_airports = {}
; Let X-Plane draw ice and snow on runways (false = clear runways)
runway_ice = {}

[logging]
directory = {}
file = {}
"#,
        xplane_dir,
        coast_map,
        config.snow.coastal_extension,
        config.snow.legacy_airports,
        config.snow.runway_ice,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Convert path to string, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
