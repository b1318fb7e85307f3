//! Radial Arcs - a generative pattern of orbiting markers
//!
//! Core modules:
//! - `sim`: Pure pattern generation and per-tick phase updates
//! - `scene`: Adapter that maps pattern state onto a rendering backend
//! - `camera`: Damped orbit camera (the viewpoint the renderer draws from)
//! - `renderer`: WebGPU marker pipeline
//! - `platform`: Frame-rate limiting against the display clock
//! - `settings`: Persisted configuration

pub mod camera;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use camera::OrbitCamera;
pub use settings::Settings;

use glam::Vec3;

/// Pattern configuration constants
pub mod consts {
    /// Arcs generated at startup
    pub const ARC_COUNT: usize = 30;
    /// Orbit markers per arc
    pub const ORBIT_MARKERS_PER_ARC: usize = 50;

    /// Arc radius range (world units, half-open)
    pub const RADIUS_MIN: f64 = 10.0;
    pub const RADIUS_MAX: f64 = 200.0;

    /// Angular speed range (radians per tick, half-open)
    pub const SPEED_MIN: f64 = 0.002;
    pub const SPEED_MAX: f64 = 0.01;

    /// Hue range (degrees, half-open) - blues through magentas
    pub const HUE_MIN: f32 = 200.0;
    pub const HUE_MAX: f32 = 360.0;
    /// Fixed saturation and lightness shared by every arc
    pub const SATURATION: f32 = 0.5;
    pub const LIGHTNESS: f32 = 0.3;

    /// Height of the lead marker above the orbital plane at generation time
    pub const LEAD_MARKER_ELEVATION: f32 = 100.0;
    /// Marker sizes (world units)
    pub const LEAD_MARKER_RADIUS: f32 = 1.0;
    pub const ORBIT_MARKER_RADIUS: f32 = 20.0;

    /// Upper bound on pattern updates per second
    pub const MAX_FPS: f64 = 30.0;

    /// Camera defaults
    pub const CAMERA_DISTANCE: f32 = 600.0;
    pub const CAMERA_FOV_DEG: f32 = 35.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 4000.0;
    pub const CAMERA_DAMPING: f32 = 0.05;
}

/// Convert polar (r, theta) in the orbital plane plus a height into a 3D point.
///
/// The angle stays in `f64` until here so large accumulated phases keep their precision.
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64, z: f32) -> Vec3 {
    Vec3::new((r * theta.cos()) as f32, (r * theta.sin()) as f32, z)
}
