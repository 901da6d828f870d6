//! Simulation settings
//!
//! Loaded from a JSON file at startup. Any field may be omitted; missing
//! fields take their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{SimParams, TiltCalibration};

/// Startup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Render surface size (the 1:1 simulation rectangle)
    pub surface_width: f32,
    pub surface_height: f32,

    /// Soft cap on live discs
    pub max_discs: usize,
    /// Discs spawned at startup and on reset
    pub initial_discs: usize,
    /// RNG seed for disc spawning
    pub seed: u64,

    /// Tilt sensor mounting
    pub calibration: TiltCalibration,
    /// Initial simulation parameters
    pub params: SimParams,

    // === Demo loop ===
    /// Pause at the end of each frame
    pub frame_delay_ms: u64,
    /// Stop after this many frames (runs forever when unset)
    pub frames: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,
            max_discs: MAX_DISCS,
            initial_discs: INITIAL_DISCS,
            seed: 0,
            calibration: TiltCalibration::default(),
            params: SimParams::default(),
            frame_delay_ms: FRAME_DELAY_MS,
            frames: None,
        }
    }
}

impl Settings {
    pub fn surface(&self) -> Vec2 {
        Vec2::new(self.surface_width, self.surface_height)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {}, using default settings", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Replace values that would break the simulation with defaults
    fn sanitized(mut self) -> Self {
        if !(self.surface_width > 0.0 && self.surface_height > 0.0) {
            log::warn!(
                "Surface {}x{} is not usable, using {}x{}",
                self.surface_width,
                self.surface_height,
                SURFACE_WIDTH,
                SURFACE_HEIGHT
            );
            self.surface_width = SURFACE_WIDTH;
            self.surface_height = SURFACE_HEIGHT;
        }
        if self.initial_discs > self.max_discs {
            self.initial_discs = self.max_discs;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Mode;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 9, "params": { "mode": "Force" } }"#).unwrap();
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.params.mode, Mode::Force);
        assert_eq!(settings.params.force_power, DEFAULT_FORCE_POWER);
        assert_eq!(settings.max_discs, MAX_DISCS);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            frames: Some(100),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_surface_is_replaced() {
        let settings = Settings::from_json(r#"{ "surface_width": 0 }"#).unwrap();
        assert_eq!(settings.surface(), Vec2::new(SURFACE_WIDTH, SURFACE_HEIGHT));
    }

    #[test]
    fn test_initial_discs_clamped_to_cap() {
        let settings = Settings::from_json(r#"{ "max_discs": 4, "initial_discs": 10 }"#).unwrap();
        assert_eq!(settings.initial_discs, 4);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/disc-sim.json"));
        assert_eq!(settings, Settings::default());
    }
}
