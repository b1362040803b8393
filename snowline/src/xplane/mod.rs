//! X-Plane 12 integration.
//!
//! Snow datarefs for the weather model plus the installation paths the
//! legacy airport collection reads from.
//!
//! # X-Plane Directory Structure
//!
//! ```text
//! X-Plane 12/
//! ├── Custom Scenery/
//! │   ├── scenery_packs.ini     # Enabled packs in priority order
//! │   └── <pack>/
//! │       └── Earth nav data/
//! │           └── apt.dat       # Airports of the pack
//! └── ...
//! ```
//!
//! # Example
//!
//! ```
//! use snowline::xplane::XPlaneSnow;
//!
//! let snow = XPlaneSnow::from_depth(0.10);
//! assert!((snow.snow_now - 0.15).abs() < 1e-6);
//! assert_eq!(XPlaneSnow::from_depth(0.0), XPlaneSnow::NONE);
//! ```

mod detection;
pub mod paths;
mod snow;

pub use detection::{detect_xplane_install, XPlanePathError};
pub use snow::XPlaneSnow;
