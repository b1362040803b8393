//! Snow engine facade.
//!
//! [`SnowEngine`] ties the pieces together for a simulator plugin: it owns
//! the coastline raster, the legacy airports and the published depth grid,
//! and answers the per-tick question "how much snow at the aircraft, and
//! what should X-Plane be told".
//!
//! Grid refreshes run on a background worker, at most one at a time. The
//! caller starts one with [`SnowEngine::request_refresh`] and picks up the
//! result with [`SnowEngine::poll_refresh`], which never blocks.
//!
//! # Example
//!
//! ```ignore
//! use snowline::config::ConfigFile;
//! use snowline::engine::SnowEngine;
//!
//! let mut engine = SnowEngine::from_config(&ConfigFile::load()?);
//! engine.request_refresh("/tmp/snod.csv");
//!
//! // once per flight loop
//! if let Some(result) = engine.poll_refresh() {
//!     println!("refresh done: {result:?}");
//! }
//! let (depth, snow) = engine.snow_at_aircraft(&aircraft, &probe);
//! if let Some(snow) = snow {
//!     // write snow.snow_now, snow.snow_area_width and snow.ice_now
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use thiserror::Error;

use crate::aircraft::AircraftState;
use crate::airport::{AirportError, LegacyAirports};
use crate::coast::{CoastMap, CoastMapError};
use crate::config::{ConfigFile, SnowSettings};
use crate::depth::{DepthGrid, DepthGridError, GridHandle};
use crate::legacy::{LegacyBlend, TerrainProbe};
use crate::xplane::{self, XPlaneSnow};

/// Weight of the newest sample in the smoothed depth.
pub const SMOOTHING_ALPHA: f32 = 0.7;

/// Smoothed depths below this leave X-Plane's weather untouched.
pub const NO_SNOW_THRESHOLD: f32 = 0.001;

/// Errors raised by the snow engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to load snow depth: {0}")]
    Depth(#[from] DepthGridError),

    #[error("failed to load coast map: {0}")]
    Coast(#[from] CoastMapError),

    #[error("failed to collect legacy airports: {0}")]
    Airports(#[from] AirportError),

    #[error("refresh worker terminated without a result")]
    WorkerLost,
}

/// A refresh running on the worker thread.
struct Refresh {
    csv_path: PathBuf,
    result: Receiver<Result<DepthGrid, EngineError>>,
}

/// Snow depth service for one simulator session.
pub struct SnowEngine {
    coast: Option<Arc<CoastMap>>,
    airports: LegacyAirports,
    settings: SnowSettings,
    grid: GridHandle,
    refresh: Option<Refresh>,
    smoothed_depth: f32,
}

impl SnowEngine {
    /// Create an engine with an all-zero published grid.
    ///
    /// Without a coast map no coastal correction is applied.
    pub fn new(coast: Option<CoastMap>, airports: LegacyAirports, settings: SnowSettings) -> Self {
        tracing::info!(
            coast_map = coast.is_some(),
            airports = airports.len(),
            coastal_extension = settings.coastal_extension,
            legacy_airports = settings.legacy_airports,
            "Snow engine created"
        );
        Self {
            coast: coast.map(Arc::new),
            airports,
            settings,
            grid: GridHandle::new(),
            refresh: None,
            smoothed_depth: 0.0,
        }
    }

    /// Create an engine from the configuration file.
    ///
    /// A coast map that fails to load and a missing X-Plane installation are
    /// logged; the engine then runs without the respective correction.
    pub fn from_config(config: &ConfigFile) -> Self {
        let coast = config
            .snow
            .coast_map
            .as_deref()
            .and_then(|path| match CoastMap::load(path) {
                Ok(map) => Some(map),
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Coast map not loaded, coastal correction off");
                    None
                }
            });

        let airports = if config.snow.legacy_airports {
            collect_airports(config.xplane.directory.as_deref())
        } else {
            LegacyAirports::new()
        };

        Self::new(coast, airports, config.snow.clone())
    }

    pub fn coast(&self) -> Option<&CoastMap> {
        self.coast.as_deref()
    }

    pub fn airports(&self) -> &LegacyAirports {
        &self.airports
    }

    pub fn settings(&self) -> &SnowSettings {
        &self.settings
    }

    /// The currently published grid.
    pub fn current_grid(&self) -> Arc<DepthGrid> {
        self.grid.current()
    }

    /// Version of the currently published grid, 0 before the first publish.
    pub fn grid_version(&self) -> u64 {
        self.grid.version()
    }

    /// Snow depth in meters at a position, from the published grid.
    pub fn sample(&self, lon: f64, lat: f64) -> f32 {
        self.grid.current().get(lon, lat)
    }

    /// Taper `depth` if the aircraft is near a legacy airport.
    pub fn adjust_for_legacy_airports(
        &self,
        depth: f32,
        aircraft: &AircraftState,
        probe: &dyn TerrainProbe,
    ) -> f32 {
        if !self.settings.legacy_airports {
            return depth;
        }
        LegacyBlend::new(&self.airports, probe).adjust_for(depth, aircraft)
    }

    /// Build the grid readers should sample from out of a raw grid.
    pub fn build_corrected_grid(&self, raw: &DepthGrid) -> DepthGrid {
        correct_grid(raw, self.coast.as_deref(), self.settings.coastal_extension)
    }

    /// Publish `grid` for sampling and return its version.
    pub fn publish(&self, grid: DepthGrid) -> u64 {
        self.grid.publish(grid)
    }

    /// Smoothed snow depth of the last [`snow_at_aircraft`](Self::snow_at_aircraft) call.
    pub fn smoothed_depth(&self) -> f32 {
        self.smoothed_depth
    }

    /// Smoothed snow depth at the aircraft and the X-Plane dataref values.
    ///
    /// Call once per flight loop. Each call moves the smoothed depth by
    /// [`SMOOTHING_ALPHA`] towards the legacy-adjusted sample. Below
    /// [`NO_SNOW_THRESHOLD`] no dataref values are returned and X-Plane's
    /// own weather should be left alone.
    pub fn snow_at_aircraft(
        &mut self,
        aircraft: &AircraftState,
        probe: &dyn TerrainProbe,
    ) -> (f32, Option<XPlaneSnow>) {
        let sampled = self.sample(aircraft.longitude(), aircraft.latitude());
        let adjusted = self.adjust_for_legacy_airports(sampled, aircraft, probe);
        self.smoothed_depth =
            SMOOTHING_ALPHA * adjusted + (1.0 - SMOOTHING_ALPHA) * self.smoothed_depth;

        let depth = self.smoothed_depth;
        if depth < NO_SNOW_THRESHOLD {
            return (depth, None);
        }

        let snow = XPlaneSnow::from_depth(depth);
        if self.settings.runway_ice {
            (depth, Some(snow))
        } else {
            (depth, Some(snow.without_runway_ice()))
        }
    }

    /// True while a refresh is running or its result has not been polled.
    pub fn refresh_in_flight(&self) -> bool {
        self.refresh.is_some()
    }

    /// Start loading a CSV and building its corrected grid in the background.
    ///
    /// Returns false, dropping the request, if a refresh is already in flight
    /// or the worker could not be started.
    pub fn request_refresh<P: AsRef<Path>>(&mut self, csv_path: P) -> bool {
        let csv_path = csv_path.as_ref().to_path_buf();
        if let Some(running) = &self.refresh {
            tracing::debug!(
                requested = %csv_path.display(),
                running = %running.csv_path.display(),
                "Refresh already in flight, request dropped"
            );
            return false;
        }

        let (tx, rx) = mpsc::channel();
        let coast = self.coast.clone();
        let coastal_extension = self.settings.coastal_extension;
        let path = csv_path.clone();

        let spawned = std::thread::Builder::new()
            .name("snowline-refresh".to_string())
            .spawn(move || {
                let result = DepthGrid::from_csv_file(&path)
                    .map(|(raw, _stats)| correct_grid(&raw, coast.as_deref(), coastal_extension))
                    .map_err(EngineError::from);
                // the engine may be gone already
                let _ = tx.send(result);
            });

        match spawned {
            Ok(_) => {
                tracing::info!(path = %csv_path.display(), "Refresh started");
                self.refresh = Some(Refresh {
                    csv_path,
                    result: rx,
                });
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to start refresh worker");
                false
            }
        }
    }

    /// Collect the result of a finished refresh without blocking.
    ///
    /// Returns `None` while idle or while the worker is still running. A
    /// successful refresh is published and its version returned. Each result
    /// is returned exactly once.
    pub fn poll_refresh(&mut self) -> Option<Result<u64, EngineError>> {
        let refresh = self.refresh.as_ref()?;
        let result = match refresh.result.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(EngineError::WorkerLost),
        };

        let csv_path = self.refresh.take().map(|r| r.csv_path).unwrap_or_default();
        match result {
            Ok(grid) => Some(Ok(self.publish(grid))),
            Err(e) => {
                tracing::error!(path = %csv_path.display(), error = %e, "Refresh failed");
                Some(Err(e))
            }
        }
    }
}

/// Apply the coastal extension if enabled and a coast map is present.
fn correct_grid(raw: &DepthGrid, coast: Option<&CoastMap>, coastal_extension: bool) -> DepthGrid {
    match coast {
        Some(coast) if coastal_extension => raw.extend_coastal_snow(coast),
        _ => raw.clone(),
    }
}

/// Legacy airports of the configured or detected X-Plane installation.
fn collect_airports(configured: Option<&Path>) -> LegacyAirports {
    let dir = match configured {
        Some(dir) => dir.to_path_buf(),
        None => match xplane::detect_xplane_install() {
            Ok(dir) => dir,
            Err(e) => {
                tracing::warn!(error = %e, "X-Plane not found, no legacy airports");
                return LegacyAirports::new();
            }
        },
    };

    LegacyAirports::from_xplane_dir(&dir).unwrap_or_else(|e| {
        tracing::error!(dir = %dir.display(), error = %e, "Failed to collect legacy airports");
        LegacyAirports::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::{Airport, Runway};
    use crate::coast::{CellState, Direction};
    use crate::coord::LLPos;
    use crate::legacy::{TerrainSample, FLOOR};
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn no_terrain(_pos: LLPos) -> TerrainSample {
        TerrainSample::hit(0.0)
    }

    /// Coast at (100, 900) facing east onto land.
    fn coast_map() -> CoastMap {
        CoastMap::from_fn(|i, j| match (i, j) {
            (100, 900) => CellState::Coast(Direction::E),
            (i, _) if i > 100 => CellState::Land,
            _ => CellState::Water,
        })
    }

    fn raw_grid() -> DepthGrid {
        let mut raw = DepthGrid::new();
        raw.load_csv("10.1,0.0,0.5\n".as_bytes()).unwrap();
        raw
    }

    fn wait_for_refresh(engine: &mut SnowEngine) -> Result<u64, EngineError> {
        let deadline = Instant::now() + Duration::from_secs(30);
        loop {
            if let Some(result) = engine.poll_refresh() {
                return result;
            }
            assert!(Instant::now() < deadline, "refresh did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_new_engine_samples_zero() {
        let engine = SnowEngine::new(None, LegacyAirports::new(), SnowSettings::default());
        assert_eq!(engine.grid_version(), 0);
        assert_eq!(engine.sample(10.0, 60.0), 0.0);
        assert!(!engine.refresh_in_flight());
    }

    #[test]
    fn test_build_corrected_grid_extends_coast() {
        let engine = SnowEngine::new(Some(coast_map()), LegacyAirports::new(), SnowSettings::default());
        let corrected = engine.build_corrected_grid(&raw_grid());
        assert!((corrected.get_idx(100, 900) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_build_corrected_grid_without_extension_is_copy() {
        let settings = SnowSettings {
            coastal_extension: false,
            ..SnowSettings::default()
        };
        let engine = SnowEngine::new(Some(coast_map()), LegacyAirports::new(), settings);
        let raw = raw_grid();
        let corrected = engine.build_corrected_grid(&raw);

        assert_eq!(corrected.get_idx(100, 900), 0.0);
        assert_eq!(corrected.get_idx(101, 900), 0.5);
        assert_ne!(corrected.seqno(), raw.seqno());
    }

    #[test]
    fn test_publish_then_sample() {
        let engine = SnowEngine::new(None, LegacyAirports::new(), SnowSettings::default());
        let version = engine.publish(raw_grid());

        assert_eq!(version, 1);
        assert!((engine.sample(10.1, 0.0) - 0.5).abs() < 1e-6);
    }

    fn engine_with_airport(settings: SnowSettings) -> SnowEngine {
        let at = LLPos::new(10.1, 0.0);
        let airport = Airport::new("TEST", vec![Runway::new("09", at, at)]).unwrap();
        let engine = SnowEngine::new(None, LegacyAirports::from_airports(vec![airport]), settings);
        engine.publish(raw_grid());
        engine
    }

    /// Run enough flight loops for the smoothed depth to converge.
    fn settle(
        engine: &mut SnowEngine,
        aircraft: &AircraftState,
    ) -> (f32, Option<XPlaneSnow>) {
        let mut last = engine.snow_at_aircraft(aircraft, &no_terrain);
        for _ in 0..40 {
            last = engine.snow_at_aircraft(aircraft, &no_terrain);
        }
        last
    }

    #[test]
    fn test_snow_at_aircraft_tapers_on_legacy_runway() {
        let mut engine = engine_with_airport(SnowSettings::default());
        let aircraft = AircraftState::from_telemetry(0.0, 10.1, 0.0, 0.0);

        let (depth, snow) = settle(&mut engine, &aircraft);
        assert!((depth - FLOOR).abs() < 1e-6);
        let snow = snow.unwrap();
        let expected = XPlaneSnow::from_depth(FLOOR);
        assert!((snow.snow_now - expected.snow_now).abs() < 1e-4);
        assert!((snow.ice_now - expected.ice_now).abs() < 1e-4);
    }

    #[test]
    fn test_legacy_airports_disabled_returns_sample() {
        let settings = SnowSettings {
            legacy_airports: false,
            ..SnowSettings::default()
        };
        let mut engine = engine_with_airport(settings);
        let aircraft = AircraftState::from_telemetry(0.0, 10.1, 0.0, 0.0);

        let (depth, _) = settle(&mut engine, &aircraft);
        assert!((depth - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_depth_is_smoothed_across_calls() {
        let settings = SnowSettings {
            legacy_airports: false,
            ..SnowSettings::default()
        };
        let mut engine = engine_with_airport(settings);
        let aircraft = AircraftState::from_telemetry(0.0, 10.1, 0.0, 0.0);

        let (first, _) = engine.snow_at_aircraft(&aircraft, &no_terrain);
        assert!((first - 0.35).abs() < 1e-6);
        let (second, _) = engine.snow_at_aircraft(&aircraft, &no_terrain);
        assert!((second - 0.455).abs() < 1e-6);
        assert_eq!(engine.smoothed_depth(), second);

        // decays back once the aircraft leaves the snow
        let elsewhere = AircraftState::from_telemetry(0.0, 120.0, -40.0, 0.0);
        let (third, _) = engine.snow_at_aircraft(&elsewhere, &no_terrain);
        assert!((third - 0.3 * 0.455).abs() < 1e-6);
    }

    #[test]
    fn test_no_snow_leaves_weather_untouched() {
        let mut engine = SnowEngine::new(None, LegacyAirports::new(), SnowSettings::default());
        let aircraft = AircraftState::from_telemetry(0.0, 10.0, 60.0, 0.0);

        let (depth, snow) = engine.snow_at_aircraft(&aircraft, &no_terrain);
        assert_eq!(depth, 0.0);
        assert!(snow.is_none());
    }

    #[test]
    fn test_smoothed_depth_decays_below_threshold() {
        let settings = SnowSettings {
            legacy_airports: false,
            ..SnowSettings::default()
        };
        let mut engine = engine_with_airport(settings);
        let on_snow = AircraftState::from_telemetry(0.0, 10.1, 0.0, 0.0);
        let elsewhere = AircraftState::from_telemetry(0.0, 120.0, -40.0, 0.0);

        assert!(settle(&mut engine, &on_snow).1.is_some());
        let (depth, snow) = settle(&mut engine, &elsewhere);
        assert!(depth < NO_SNOW_THRESHOLD);
        assert!(snow.is_none());
    }

    #[test]
    fn test_runway_ice_off_clears_runways() {
        let settings = SnowSettings {
            legacy_airports: false,
            runway_ice: false,
            ..SnowSettings::default()
        };
        let mut engine = engine_with_airport(settings);
        let aircraft = AircraftState::from_telemetry(0.0, 10.1, 0.0, 0.0);

        let snow = settle(&mut engine, &aircraft).1.unwrap();
        assert_eq!(snow.ice_now, 2.0);
        assert_eq!(snow.snow_area_width, 0.0);
        // deep snow is still drawn off the runways
        assert!(snow.snow_now < 0.1);
    }

    #[test]
    fn test_refresh_publishes_corrected_grid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lon,lat,value").unwrap();
        writeln!(file, "10.1,0.0,0.5").unwrap();
        file.flush().unwrap();

        let mut engine = SnowEngine::new(Some(coast_map()), LegacyAirports::new(), SnowSettings::default());
        assert!(engine.request_refresh(file.path()));
        assert!(engine.refresh_in_flight());
        // dropped, not queued
        assert!(!engine.request_refresh(file.path()));

        let version = wait_for_refresh(&mut engine).unwrap();
        assert_eq!(version, 1);
        assert!(!engine.refresh_in_flight());
        assert!(engine.poll_refresh().is_none());

        assert!((engine.sample(10.1, 0.0) - 0.5).abs() < 1e-6);
        assert!((engine.current_grid().get_idx(100, 900) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_refresh_of_missing_csv_fails_once() {
        let mut engine = SnowEngine::new(None, LegacyAirports::new(), SnowSettings::default());
        assert!(engine.request_refresh("/nonexistent/snod.csv"));

        let result = wait_for_refresh(&mut engine);
        assert!(matches!(result, Err(EngineError::Depth(DepthGridError::NotFound(_)))));
        assert_eq!(engine.grid_version(), 0);
        assert!(engine.poll_refresh().is_none());

        // the slot is free again
        assert!(engine.request_refresh("/nonexistent/snod.csv"));
    }

    #[test]
    fn test_poll_when_idle() {
        let mut engine = SnowEngine::new(None, LegacyAirports::new(), SnowSettings::default());
        assert!(engine.poll_refresh().is_none());
    }

    #[test]
    fn test_from_config_degrades_without_coast_map_or_xplane() {
        let xplane_dir = tempfile::tempdir().unwrap();
        let mut config = ConfigFile::default();
        config.snow.coast_map = Some(PathBuf::from("/nonexistent/coast_map.png"));
        config.xplane.directory = Some(xplane_dir.path().to_path_buf());

        let engine = SnowEngine::from_config(&config);
        assert!(engine.coast().is_none());
        assert!(engine.airports().is_empty());
        assert!(engine.settings().legacy_airports);
    }
}
