//! Interaction widgets: pick targets, a point mover, and a mesh framer.
//!
//! The currently picked target is a tagged enum matched explicitly at
//! update/draw time; there is no identity-based dispatch on addresses.
//!
//! Screen coordinates throughout this module are window pixels with y
//! growing upward (see `Input::mouse_position_y_up`).

use glam::{Mat4, Vec2, Vec3};

/// Pick proximity threshold in pixels.
const PICK_RADIUS: f32 = 12.0;

/// What the cursor currently controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Picked {
    #[default]
    None,
    Camera,
    Framer,
    Mover,
}

/// Whether `screen` falls within pick range of `world` projected through
/// `fullview` onto a `viewport`-sized window.
pub fn mouse_over(screen: Vec2, world: Vec3, fullview: Mat4, viewport: Vec2) -> bool {
    let ndc = fullview.project_point3(world);
    let projected = Vec2::new(
        (ndc.x * 0.5 + 0.5) * viewport.x,
        (ndc.y * 0.5 + 0.5) * viewport.y,
    );
    (screen - projected).length() < PICK_RADIUS
}

/// Unproject a screen point onto the camera-space plane `z == depth`.
fn unproject_at_depth(screen: Vec2, depth: f32, persp: Mat4, viewport: Vec2) -> Vec3 {
    let ndc = Vec2::new(
        screen.x / viewport.x * 2.0 - 1.0,
        screen.y / viewport.y * 2.0 - 1.0,
    );
    let inv = persp.inverse();
    // two points on the view ray through the cursor
    let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.2));
    let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.8));
    let dir = far - near;
    let t = (depth - near.z) / dir.z;
    near + t * dir
}

/// Drags a 3D point within its camera-depth plane.
///
/// On mouse-down the point's camera-space depth is captured; subsequent
/// drags unproject the cursor at that depth so the point follows the mouse
/// without sliding toward or away from the camera.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mover {
    depth: f32,
}

impl Mover {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the depth of `point` at the start of a drag.
    pub fn down(&mut self, point: Vec3, modelview: Mat4) {
        self.depth = modelview.transform_point3(point).z;
    }

    /// New world position for the dragged point under the cursor.
    pub fn drag(&self, screen: Vec2, modelview: Mat4, persp: Mat4, viewport: Vec2) -> Vec3 {
        let cam = unproject_at_depth(screen, self.depth, persp, viewport);
        modelview.inverse().transform_point3(cam)
    }
}

/// Positions and orients a mesh: drag moves its base, wheel spins it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Framer {
    mover: Mover,
    /// Rotation about the world y axis, radians.
    pub angle: f32,
}

impl Framer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the base depth at the start of a drag.
    pub fn down(&mut self, base: Vec3, modelview: Mat4) {
        self.mover.down(base, modelview);
    }

    /// New base position under the cursor.
    pub fn drag(&self, screen: Vec2, modelview: Mat4, persp: Mat4, viewport: Vec2) -> Vec3 {
        self.mover.drag(screen, modelview, persp, viewport)
    }

    /// Spin the mesh about y in 5 degree steps.
    pub fn wheel(&mut self, up: bool) {
        let step = 5.0_f32.to_radians();
        self.angle += if up { step } else { -step };
    }

    /// Object-to-world transform for a mesh based at `base`.
    pub fn transform(&self, base: Vec3) -> Mat4 {
        Mat4::from_translation(base) * Mat4::from_rotation_y(self.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;

    fn camera() -> Camera {
        let mut c = Camera::new(0.4, 0.3, 5.0);
        c.resize(800, 800);
        c
    }

    fn project_to_screen(world: Vec3, fullview: Mat4, viewport: Vec2) -> Vec2 {
        let ndc = fullview.project_point3(world);
        Vec2::new(
            (ndc.x * 0.5 + 0.5) * viewport.x,
            (ndc.y * 0.5 + 0.5) * viewport.y,
        )
    }

    #[test]
    fn mouse_over_hits_at_the_projected_point_only() {
        let camera = camera();
        let viewport = Vec2::new(800.0, 800.0);
        let world = Vec3::new(0.3, 0.5, -0.2);
        let screen = project_to_screen(world, camera.fullview(), viewport);
        assert!(mouse_over(screen, world, camera.fullview(), viewport));
        assert!(!mouse_over(
            screen + Vec2::new(30.0, 0.0),
            world,
            camera.fullview(),
            viewport
        ));
    }

    #[test]
    fn mover_drag_round_trips_through_the_cursor() {
        let camera = camera();
        let viewport = Vec2::new(800.0, 800.0);
        let point = Vec3::new(0.3, 0.5, -0.2);
        let screen = project_to_screen(point, camera.fullview(), viewport);

        let mut mover = Mover::new();
        mover.down(point, camera.modelview());
        let dragged = mover.drag(screen, camera.modelview(), camera.persp(), viewport);
        assert!((dragged - point).length() < 1e-3);
    }

    #[test]
    fn mover_keeps_depth_while_dragging() {
        let camera = camera();
        let viewport = Vec2::new(800.0, 800.0);
        let point = Vec3::new(0.3, 0.5, -0.2);
        let depth = camera.modelview().transform_point3(point).z;

        let mut mover = Mover::new();
        mover.down(point, camera.modelview());
        let moved = mover.drag(
            Vec2::new(250.0, 610.0),
            camera.modelview(),
            camera.persp(),
            viewport,
        );
        let moved_depth = camera.modelview().transform_point3(moved).z;
        assert!((moved_depth - depth).abs() < 1e-3);
    }

    #[test]
    fn framer_transform_composes_translation_then_spin() {
        let mut framer = Framer::new();
        for _ in 0..18 {
            framer.wheel(true); // 90 degrees total
        }
        let base = Vec3::new(1.0, 2.0, 3.0);
        let m = framer.transform(base);
        // the base itself is unaffected by the spin
        assert!((m.transform_point3(Vec3::ZERO) - base).length() < 1e-5);
        // +x rotates toward -z under a quarter turn about y
        let p = m.transform_point3(Vec3::X) - base;
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }
}
