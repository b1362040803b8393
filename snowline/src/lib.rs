//! Snowline - ground snow coverage for X-Plane
//!
//! This library turns a global snow depth field into what X-Plane's weather
//! model should see under the aircraft: coastal cells are corrected with
//! inland snow, and snow is tapered around legacy airports whose runways
//! would otherwise be buried.
//!
//! # High-Level API
//!
//! For most use cases, the [`engine`] module provides a simplified facade:
//!
//! ```ignore
//! use snowline::config::ConfigFile;
//! use snowline::engine::SnowEngine;
//!
//! let config = ConfigFile::load()?;
//! let mut engine = SnowEngine::from_config(&config);
//!
//! // Load a new depth field in the background
//! engine.request_refresh("/tmp/snod.csv");
//! ```

pub mod aircraft;
pub mod airport;
pub mod coast;
pub mod config;
pub mod coord;
pub mod depth;
pub mod engine;
pub mod grid;
pub mod legacy;
pub mod logging;
pub mod xplane;

/// Version of the snowline library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_coord_module_exists() {
        use crate::coord::LLPos;
        let pos = LLPos::new(190.0, 45.0);
        assert!((pos.lon + 170.0).abs() < 1e-9);
    }
}
