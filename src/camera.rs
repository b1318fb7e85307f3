//! Damped orbit camera
//!
//! Looks at the origin from a point on a sphere. Drag and wheel input only
//! queue motion; `update` applies a fraction of the queued rotation each
//! accepted frame, so the view eases to a stop after the input ends.

use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

use crate::settings::CameraSettings;

/// Keeps the view matrix defined (up vector never parallel to the view direction)
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians
    pub yaw: f32,
    /// Vertical rotation angle in radians
    pub pitch: f32,
    /// Distance from the target point
    pub distance: f32,
    /// Point the camera orbits around
    pub target: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of queued rotation applied per update, in (0, 1]
    damping: f32,
    min_distance: f32,
    max_distance: f32,
    // Queued input
    yaw_delta: f32,
    pitch_delta: f32,
    zoom_scale: f32,
}

impl OrbitCamera {
    pub fn new(settings: &CameraSettings) -> Self {
        let min_distance = settings.min_distance.max(f32::EPSILON);
        let max_distance = settings.max_distance.max(min_distance);
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: settings.distance.clamp(min_distance, max_distance),
            target: Vec3::ZERO,
            fov_y: settings.fov_deg.to_radians(),
            near: settings.near,
            far: settings.far,
            damping: if settings.damping > 0.0 {
                settings.damping.min(1.0)
            } else {
                1.0
            },
            min_distance,
            max_distance,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            zoom_scale: 1.0,
        }
    }

    /// Queue a rotation (radians)
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.yaw_delta += yaw;
        self.pitch_delta += pitch;
    }

    /// Queue a zoom. `scale > 1` moves away from the target.
    pub fn zoom(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.zoom_scale *= scale;
        }
    }

    /// Apply queued input. Call once per accepted frame.
    pub fn update(&mut self) {
        self.yaw += self.yaw_delta * self.damping;
        self.pitch = (self.pitch + self.pitch_delta * self.damping)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.yaw_delta *= 1.0 - self.damping;
        self.pitch_delta *= 1.0 - self.damping;

        self.distance =
            (self.distance * self.zoom_scale).clamp(self.min_distance, self.max_distance);
        self.zoom_scale = 1.0;
    }

    /// Whether queued rotation is still being applied
    pub fn is_moving(&self) -> bool {
        self.yaw_delta.abs() > 1e-6 || self.pitch_delta.abs() > 1e-6
    }

    /// Camera world position. Yaw and pitch of zero sit on +Z looking down -Z.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(f32::EPSILON), self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// World-space right and up vectors of the view (for camera-facing quads)
    pub fn basis(&self) -> (Vec3, Vec3) {
        let inverse = self.view_matrix().inverse();
        (inverse.x_axis.truncate(), inverse.y_axis.truncate())
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&CameraSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CAMERA_DISTANCE;

    #[test]
    fn test_default_looks_down_z() {
        let camera = OrbitCamera::default();
        let pos = camera.position();
        assert!(pos.x.abs() < 1e-4);
        assert!(pos.y.abs() < 1e-4);
        assert!((pos.z - CAMERA_DISTANCE).abs() < 1e-3);

        let (right, up) = camera.basis();
        assert!((right - Vec3::X).length() < 1e-4);
        assert!((up - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn test_damped_rotation_converges() {
        let mut camera = OrbitCamera::default();
        camera.rotate(1.0, 0.0);

        camera.update();
        assert!((camera.yaw - 0.05).abs() < 1e-6);
        assert!(camera.is_moving());

        for _ in 0..500 {
            camera.update();
        }
        assert!((camera.yaw - 1.0).abs() < 1e-3);
        assert!(!camera.is_moving());
    }

    #[test]
    fn test_no_damping_applies_immediately() {
        let mut camera = OrbitCamera::new(&CameraSettings {
            damping: 0.0,
            ..Default::default()
        });
        camera.rotate(0.3, 0.2);
        camera.update();
        assert!((camera.yaw - 0.3).abs() < 1e-6);
        assert!((camera.pitch - 0.2).abs() < 1e-6);
        assert!(!camera.is_moving());
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = OrbitCamera::new(&CameraSettings {
            damping: 1.0,
            ..Default::default()
        });
        camera.rotate(0.0, 10.0);
        camera.update();
        assert!(camera.pitch < FRAC_PI_2);
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn test_zoom_is_clamped() {
        let settings = CameraSettings::default();
        let mut camera = OrbitCamera::new(&settings);
        camera.zoom(0.5);
        camera.update();
        assert!((camera.distance - CAMERA_DISTANCE * 0.5).abs() < 1e-3);

        camera.zoom(1000.0);
        camera.update();
        assert_eq!(camera.distance, settings.max_distance);

        camera.zoom(-1.0);
        camera.update();
        assert_eq!(camera.distance, settings.max_distance);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = OrbitCamera::default();
        let clip = camera.view_projection(16.0 / 9.0) * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
