//! Pattern and viewer settings
//!
//! Persisted to LocalStorage in the browser. Every field has a default, so a
//! partial JSON document is valid.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::PatternConfig;

/// Orbit camera parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Starting distance from the origin
    pub distance: f32,
    /// Vertical field of view (degrees)
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of queued rotation applied per frame (0 disables easing)
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians of rotation per pixel dragged
    pub rotate_speed: f32,
    /// Distance scale per wheel notch
    pub zoom_step: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            distance: CAMERA_DISTANCE,
            fov_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            damping: CAMERA_DAMPING,
            min_distance: 50.0,
            max_distance: 3000.0,
            rotate_speed: 0.005,
            zoom_step: 0.95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pattern: PatternConfig,
    /// Upper bound on pattern updates per second (0 = display rate)
    pub max_fps: f64,
    pub camera: CameraSettings,
    /// Log the tick count every this many ticks (0 = never)
    pub log_every_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pattern: PatternConfig::default(),
            max_fps: MAX_FPS,
            camera: CameraSettings::default(),
            log_every_ticks: 300,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "radial_arcs_settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::info!("Using default settings");
            return Self::default();
        };

        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    settings
                }
                Err(e) => {
                    // Left in place so a hand edit can be repaired
                    log::warn!("Ignoring stored settings: {}", e);
                    Self::default()
                }
            },
            _ => {
                // First run: persist the defaults so they can be edited in storage
                log::info!("Using default settings");
                let settings = Self::default();
                settings.save();
                settings
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "max_fps": 60, "pattern": { "arc_count": 5 } }"#)
            .unwrap();
        assert_eq!(settings.max_fps, 60.0);
        assert_eq!(settings.pattern.arc_count, 5);
        assert_eq!(settings.pattern.orbit_markers_per_arc, ORBIT_MARKERS_PER_ARC);
        assert_eq!(settings.camera, CameraSettings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.camera.damping = 0.2;
        settings.pattern.hue.min = 10.0;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert!(Settings::from_json(r#"{ "max_fps": "fast" }"#).is_err());
    }

    #[test]
    fn test_native_load_is_default() {
        let settings = Settings::load();
        assert_eq!(settings, Settings::default());
        settings.save();
    }
}
