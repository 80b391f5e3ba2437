//! Static cylinder collision volumes.
//!
//! Cylinders sit on the ground plane and act as obstacles for falling
//! particles. They are built once at scene setup and never move.

use glam::Vec3;

/// An upright cylinder resting on the ground plane.
///
/// The containment test treats the cylinder as extending from the ground up
/// to `ground + height`, with a boundary-exclusive radius: a point exactly
/// on the curved wall is outside.
#[derive(Clone, Copy, Debug)]
pub struct Cylinder {
    /// Vertical extent above the ground plane.
    pub height: f32,
    /// Radius in the xz plane.
    pub radius: f32,
    /// Surface color (RGB, 0.0-1.0).
    pub color: Vec3,
    /// Center of the base, on the ground plane.
    pub location: Vec3,
}

impl Cylinder {
    /// Create a cylinder. `height` and `radius` must be positive.
    pub fn new(height: f32, radius: f32, color: Vec3, location: Vec3) -> Self {
        debug_assert!(height > 0.0 && radius > 0.0);
        Self {
            height,
            radius,
            color,
            location,
        }
    }

    /// Whether `p` is inside the cylinder volume.
    ///
    /// True iff `p.y <= ground + height` and the horizontal distance from
    /// the cylinder axis is strictly less than `radius`.
    pub fn inside(&self, p: Vec3, ground: f32) -> bool {
        if p.y > ground + self.height {
            return false;
        }
        let dx = p.x - self.location.x;
        let dz = p.z - self.location.z;
        dx * dx + dz * dz < self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cyl() -> Cylinder {
        Cylinder::new(0.5, 0.25, Vec3::ONE, Vec3::new(1.0, 0.0, -1.0))
    }

    #[test]
    fn contains_point_on_axis_below_top() {
        assert!(cyl().inside(Vec3::new(1.0, 0.3, -1.0), 0.0));
    }

    #[test]
    fn rejects_point_above_top() {
        assert!(!cyl().inside(Vec3::new(1.0, 0.51, -1.0), 0.0));
        // exactly at the top is still inside
        assert!(cyl().inside(Vec3::new(1.0, 0.5, -1.0), 0.0));
    }

    #[test]
    fn radial_boundary_is_exclusive() {
        let c = cyl();
        assert!(!c.inside(Vec3::new(1.25, 0.1, -1.0), 0.0));
        assert!(c.inside(Vec3::new(1.2499, 0.1, -1.0), 0.0));
    }

    #[test]
    fn ground_offset_shifts_top() {
        let c = cyl();
        // raising the ground raises the contained volume with it
        assert!(c.inside(Vec3::new(1.0, 0.9, -1.0), 0.5));
        assert!(!c.inside(Vec3::new(1.0, 1.01, -1.0), 0.5));
    }

    #[test]
    fn y_below_ground_still_counts_as_inside() {
        // the test is an upper bound on y only; the ground plane handles
        // the floor separately
        assert!(cyl().inside(Vec3::new(1.0, -2.0, -1.0), 0.0));
    }
}
