//! Orbit camera with the transform set the renderers consume.
//!
//! Yaw/pitch/distance around a target point. Exposes the three matrices the
//! draw layer needs: `modelview` (world to camera), `persp` (camera to
//! clip), and their product `fullview`.

use glam::{Mat4, Vec2, Vec3};

const DRAG_SENSITIVITY: f32 = 0.005;
const WHEEL_SENSITIVITY: f32 = 0.3;

pub struct Camera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
    aspect: f32,
}

impl Camera {
    /// Create a camera orbiting the origin. Angles are radians.
    pub fn new(yaw: f32, pitch: f32, distance: f32) -> Self {
        Self {
            yaw,
            pitch,
            distance,
            target: Vec3::ZERO,
            aspect: 1.0,
        }
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// World-to-camera transform.
    pub fn modelview(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Camera-to-clip transform (45 degree vertical fov).
    pub fn persp(&self) -> Mat4 {
        Mat4::perspective_rh(45.0_f32.to_radians(), self.aspect, 0.1, 100.0)
    }

    /// World-to-clip transform.
    pub fn fullview(&self) -> Mat4 {
        self.persp() * self.modelview()
    }

    /// Rotate (or, with `pan`, translate the target) from a cursor drag.
    ///
    /// `delta` is in window pixels, y down.
    pub fn mouse_drag(&mut self, delta: Vec2, pan: bool) {
        if pan {
            let mv = self.modelview();
            let right = mv.row(0).truncate();
            let up = mv.row(1).truncate();
            let scale = 0.002 * self.distance;
            self.target -= right * delta.x * scale;
            self.target += up * delta.y * scale;
        } else {
            self.yaw -= delta.x * DRAG_SENSITIVITY;
            self.pitch += delta.y * DRAG_SENSITIVITY;
            self.pitch = self.pitch.clamp(-1.5, 1.5);
        }
    }

    /// Dolly toward or away from the target.
    pub fn mouse_wheel(&mut self, scroll: f32) {
        self.distance -= scroll * WHEEL_SENSITIVITY;
        self.distance = self.distance.clamp(0.5, 20.0);
    }

    /// Track the window aspect ratio after a resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_projects_to_screen_center() {
        let camera = Camera::new(0.0, 0.0, 5.0);
        let ndc = camera.fullview().project_point3(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
    }

    #[test]
    fn eye_sits_at_the_orbit_distance() {
        let camera = Camera::new(1.2, 0.4, 5.0);
        assert!((camera.position().length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn wheel_clamps_distance() {
        let mut camera = Camera::new(0.0, 0.0, 1.0);
        camera.mouse_wheel(100.0);
        assert_eq!(camera.distance, 0.5);
        camera.mouse_wheel(-1000.0);
        assert_eq!(camera.distance, 20.0);
    }

    #[test]
    fn drag_clamps_pitch() {
        let mut camera = Camera::new(0.0, 0.0, 5.0);
        camera.mouse_drag(Vec2::new(0.0, 10_000.0), false);
        assert_eq!(camera.pitch, 1.5);
    }
}
