//! X-Plane 12 installation detection.
//!
//! X-Plane records its installation paths in a reference file, one per
//! line; see [`paths::install_reference_path`].

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::paths;

/// Errors that can occur when detecting X-Plane paths.
#[derive(Debug, Error)]
pub enum XPlanePathError {
    /// Home directory could not be determined.
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    /// X-Plane install reference file not found or listing no valid path.
    #[error("X-Plane 12 install reference not found at {0}")]
    InstallFileNotFound(PathBuf),

    /// Failed to read the install reference file.
    #[error("Failed to read X-Plane install reference: {0}")]
    ReadError(#[from] std::io::Error),
}

/// Detect the X-Plane 12 installation directory.
///
/// If multiple installations exist, returns the first valid one.
pub fn detect_xplane_install() -> Result<PathBuf, XPlanePathError> {
    let reference = paths::install_reference_path()?;
    read_install_reference(&reference)?
        .into_iter()
        .next()
        .ok_or(XPlanePathError::InstallFileNotFound(reference))
}

/// Existing installation paths listed in a reference file.
fn read_install_reference(reference: &Path) -> Result<Vec<PathBuf>, XPlanePathError> {
    if !reference.exists() {
        return Err(XPlanePathError::InstallFileNotFound(reference.to_path_buf()));
    }

    let contents = fs::read_to_string(reference)?;
    Ok(contents
        .lines()
        .map(|line| PathBuf::from(line.trim()))
        .filter(|path| !path.as_os_str().is_empty() && path.exists())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_install_reference_keeps_existing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let install = dir.path().join("X-Plane 12");
        fs::create_dir_all(&install).unwrap();

        let reference = dir.path().join("x-plane_install_12.txt");
        fs::write(
            &reference,
            format!("{}\n\n/nonexistent/X-Plane 12\n", install.display()),
        )
        .unwrap();

        let installs = read_install_reference(&reference).unwrap();
        assert_eq!(installs, vec![install]);
    }

    #[test]
    fn test_read_install_reference_missing_file() {
        let result = read_install_reference(Path::new("/nonexistent/x-plane_install_12.txt"));
        assert!(matches!(result, Err(XPlanePathError::InstallFileNotFound(_))));
    }

    #[test]
    fn test_detect_xplane_install_does_not_panic() {
        // depends on whether X-Plane is installed on this machine
        match detect_xplane_install() {
            Ok(path) => assert!(path.exists()),
            Err(e) => assert!(matches!(
                e,
                XPlanePathError::InstallFileNotFound(_) | XPlanePathError::NoHomeDirectory
            )),
        }
    }
}
