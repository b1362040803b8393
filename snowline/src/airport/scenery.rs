//! Reader for X-Plane's `scenery_packs.ini`.
//!
//! The file lists scenery packs in priority order, one per line:
//!
//! ```text
//! I
//! 1000 Version
//! SCENERY
//!
//! SCENERY_PACK Custom Scenery/ENGM Oslo/
//! SCENERY_PACK_DISABLED Custom Scenery/LOWI Innsbruck/
//! SCENERY_PACK *GLOBAL_AIRPORTS*
//! SCENERY_PACK /data/scenery/EDDM/
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::xplane::paths;

/// Prefix of enabled pack lines. `SCENERY_PACK_DISABLED` does not match.
const PACK_PREFIX: &str = "SCENERY_PACK ";

/// Marker line for X-Plane's own global airports.
const GLOBAL_AIRPORTS: &str = "*GLOBAL_AIRPORTS*";

/// AutoOrtho overlay packs never carry airports.
const AUTOORTHO_OVERLAY: &str = "/z_ao_";

/// Error type for reading scenery packs.
#[derive(Debug, thiserror::Error)]
pub enum SceneryPacksError {
    #[error("scenery_packs.ini not found at: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Enabled scenery pack directories in `scenery_packs.ini` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneryPacks {
    packs: Vec<PathBuf>,
}

impl SceneryPacks {
    /// Read `{xplane_dir}/Custom Scenery/scenery_packs.ini`.
    pub fn from_xplane_dir<P: AsRef<Path>>(xplane_dir: P) -> Result<Self, SceneryPacksError> {
        let xplane_dir = xplane_dir.as_ref();
        let ini_path = paths::scenery_packs_ini_path(xplane_dir);
        if !ini_path.exists() {
            return Err(SceneryPacksError::NotFound(ini_path));
        }

        let packs = Self::from_reader(BufReader::new(File::open(&ini_path)?), xplane_dir)?;
        tracing::info!(
            path = %ini_path.display(),
            count = packs.len(),
            "Read scenery packs"
        );
        Ok(packs)
    }

    /// Read pack lines from `reader`, resolving relative paths against
    /// `xplane_dir`.
    pub fn from_reader<R: BufRead>(reader: R, xplane_dir: &Path) -> Result<Self, SceneryPacksError> {
        let mut packs = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');

            let Some(pack) = line.strip_prefix(PACK_PREFIX) else {
                continue;
            };
            if pack.contains(GLOBAL_AIRPORTS) {
                continue;
            }

            let pack = pack.trim().replace('\\', "/");
            if pack.contains(AUTOORTHO_OVERLAY) {
                continue;
            }

            packs.push(resolve_pack_path(&pack, xplane_dir));
        }
        Ok(Self { packs })
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Pack directories in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.packs.iter().map(PathBuf::as_path)
    }

    /// `apt.dat` location of every pack, whether or not it exists.
    pub fn apt_dat_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.iter().map(paths::pack_apt_dat_path)
    }
}

/// Absolute packs start with `/` or carry a drive letter.
fn resolve_pack_path(pack: &str, xplane_dir: &Path) -> PathBuf {
    if pack.starts_with('/') || pack.contains(':') {
        PathBuf::from(pack)
    } else {
        xplane_dir.join(pack)
    }
}
