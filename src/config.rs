// SPDX-License-Identifier: GPL-3.0-only

//! Persisted user settings
//!
//! Stored as JSON in `<config dir>/shutter/config.json`. A missing or
//! unreadable file is not an error: defaults are used.

use crate::arbiter::CaptureToggles;
use crate::backends::camera::{CameraPosition, FlashMode};
use crate::constants::{capture, zoom};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Current config schema version
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema version of the stored file
    pub version: u32,
    /// Prefer 60 fps when nothing blocks it
    pub prefer_60fps: bool,
    /// HDR toggle
    pub hdr_enabled: bool,
    /// Night mode toggle
    pub night_mode_enabled: bool,
    /// Flash for photos and recordings
    pub flash: FlashMode,
    /// Camera used when the screen opens
    pub camera_position: CameraPosition,
    /// Press duration that turns a tap into a recording
    pub hold_threshold_ms: u64,
    /// Upper zoom limit applied on top of device limits
    pub max_zoom_cap: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            prefer_60fps: true,
            hdr_enabled: false,
            night_mode_enabled: false,
            flash: FlashMode::Off,
            camera_position: CameraPosition::Back,
            hold_threshold_ms: capture::HOLD_THRESHOLD_MS,
            max_zoom_cap: zoom::MAX_ZOOM_CAP,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shutter").join("config.json"))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => {
                warn!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to defaults on any problem
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Load and validate the file at `path`
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&text)?;

        if config.version > CONFIG_VERSION {
            return Err(AppError::Config(format!(
                "config version {} is newer than supported {}",
                config.version, CONFIG_VERSION
            )));
        }
        config.version = CONFIG_VERSION;
        config.validate()?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.hold_threshold_ms == 0 {
            return Err(AppError::Config("hold_threshold_ms must be positive".into()));
        }
        if self.max_zoom_cap.is_nan() || self.max_zoom_cap < 1.0 {
            return Err(AppError::Config(format!(
                "max_zoom_cap must be at least 1, got {}",
                self.max_zoom_cap
            )));
        }
        Ok(())
    }

    pub fn hold_threshold(&self) -> Duration {
        Duration::from_millis(self.hold_threshold_ms)
    }

    /// Toggles the camera screen starts with
    pub fn toggles(&self) -> CaptureToggles {
        CaptureToggles {
            prefer_60fps: self.prefer_60fps,
            hdr_enabled: self.hdr_enabled,
            night_mode_enabled: self.night_mode_enabled,
            flash: self.flash,
            position: self.camera_position,
        }
    }

    /// Copy the screen's current toggles back for saving
    pub fn apply_toggles(&mut self, toggles: &CaptureToggles) {
        self.prefer_60fps = toggles.prefer_60fps;
        self.hdr_enabled = toggles.hdr_enabled;
        self.night_mode_enabled = toggles.night_mode_enabled;
        self.flash = toggles.flash;
        self.camera_position = toggles.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("shutter-config-{}-{}", name, std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_save_and_load() {
        let path = scratch("roundtrip");
        let mut config = Config::default();
        config.hdr_enabled = true;
        config.camera_position = CameraPosition::Front;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = scratch("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "flash": "on" }"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.flash, FlashMode::On);
        assert_eq!(loaded.hold_threshold_ms, 200);
        assert!(loaded.prefer_60fps);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let path = scratch("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "hold_threshold_ms": 0 }"#).unwrap();

        assert!(Config::load_from(&path).is_err());
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_newer_version_rejected() {
        let path = scratch("version");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "version": 99 }"#).unwrap();
        assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
    }
}
