//! X-Plane path utilities.
//!
//! Helpers for constructing the X-Plane paths snowline reads from.

use std::path::{Path, PathBuf};

use super::detection::XPlanePathError;

/// Well-known X-Plane subdirectories and files.
pub mod subdirs {
    /// Custom Scenery directory name.
    pub const CUSTOM_SCENERY: &str = "Custom Scenery";
    /// Scenery pack list inside Custom Scenery.
    pub const SCENERY_PACKS_INI: &str = "scenery_packs.ini";
    /// Earth nav data directory of a scenery pack.
    pub const EARTH_NAV_DATA: &str = "Earth nav data";
    /// Airport database filename.
    pub const APT_DAT: &str = "apt.dat";
}

/// Get the path to the X-Plane install reference file.
///
/// The location varies by OS:
/// - Linux: `~/.x-plane/x-plane_install_12.txt`
/// - macOS: `~/.x-plane/x-plane_install_12.txt`
/// - Windows: `%LOCALAPPDATA%\x-plane\x-plane_install_12.txt`
pub fn install_reference_path() -> Result<PathBuf, XPlanePathError> {
    #[cfg(target_os = "windows")]
    {
        let local_app_data = dirs::data_local_dir().ok_or(XPlanePathError::NoHomeDirectory)?;
        Ok(local_app_data.join("x-plane").join("x-plane_install_12.txt"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().ok_or(XPlanePathError::NoHomeDirectory)?;
        Ok(home.join(".x-plane").join("x-plane_install_12.txt"))
    }
}

/// Construct the path to Custom Scenery from an X-Plane installation root.
pub fn custom_scenery_path(xplane_root: &Path) -> PathBuf {
    xplane_root.join(subdirs::CUSTOM_SCENERY)
}

/// Construct the path to `scenery_packs.ini` from an X-Plane installation root.
pub fn scenery_packs_ini_path(xplane_root: &Path) -> PathBuf {
    custom_scenery_path(xplane_root).join(subdirs::SCENERY_PACKS_INI)
}

/// Construct the path to a scenery pack's apt.dat.
pub fn pack_apt_dat_path(pack: &Path) -> PathBuf {
    pack.join(subdirs::EARTH_NAV_DATA).join(subdirs::APT_DAT)
}
