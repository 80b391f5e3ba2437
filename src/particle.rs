//! A single ballistic particle and the environment it falls through.
//!
//! Particles use a directional-speed model: `velocity` is renormalized to
//! unit length every step, so displacement magnitude comes from `speed`,
//! not from the velocity magnitude.

use glam::Vec3;

use crate::cylinder::Cylinder;

/// Shared physical constants for a scene.
///
/// Replaces process-wide globals: every update receives the environment
/// explicitly, so two scenes with different gravity can coexist.
#[derive(Clone, Copy, Debug)]
pub struct Environment {
    /// Downward acceleration applied to the vertical velocity component.
    pub gravity: f32,
    /// Height of the ground plane.
    pub ground: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            ground: 0.0,
        }
    }
}

/// One simulated particle.
///
/// All timestamps (`birth`, `prev_emit`) are seconds on the caller's clock;
/// the particle never reads wall time itself.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    /// Generation counter; root emissions are level 0.
    pub level: u32,
    /// True once the particle has struck the ground plane.
    pub grounded: bool,
    /// When the particle was created.
    pub birth: f32,
    /// Seconds the particle stays alive after `birth`.
    pub lifetime: f32,
    /// Displacement per second while airborne.
    pub speed: f32,
    /// Rendered disk radius in pixels.
    pub size: f32,
    /// Child spawn frequency (particles/second), used only while grounded.
    pub emit_rate: f32,
    /// When the last child was spawned (meaningful only when grounded).
    pub prev_emit: f32,
    pub position: Vec3,
    /// Direction of travel, kept unit length by `integrate`.
    pub velocity: Vec3,
    pub color: Vec3,
}

impl Particle {
    /// Create a particle with fresh lifecycle state.
    ///
    /// Position, velocity, and color start zeroed; the emitter fills them in.
    pub fn new(level: u32, lifetime: f32, speed: f32, size: f32, emit_rate: f32, now: f32) -> Self {
        Self {
            level,
            grounded: false,
            birth: now,
            lifetime,
            speed,
            size,
            emit_rate,
            prev_emit: now,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            color: Vec3::ZERO,
        }
    }

    /// Whether the particle's lifetime has elapsed.
    #[inline]
    pub fn expired(&self, now: f32) -> bool {
        now - self.birth > self.lifetime
    }

    /// One ballistic step: gravity, renormalize, displace, bounce.
    ///
    /// Only the first cylinder (in iteration order) containing the post-step
    /// position applies; the bounce clamps to the cylinder top and damps the
    /// vertical velocity to half its magnitude.
    pub fn integrate(&mut self, dt: f32, env: &Environment, cylinders: &[Cylinder]) {
        self.velocity.y -= dt * env.gravity;
        self.velocity = self.velocity.normalize_or_zero();
        self.position += self.speed * dt * self.velocity;
        for cyl in cylinders {
            if cyl.inside(self.position, env.ground) && self.velocity.y < 0.0 {
                self.position.y = env.ground + cyl.height;
                self.velocity.y = -0.5 * self.velocity.y;
                break;
            }
        }
    }

    /// Advance one frame: airborne particles integrate and may ground.
    ///
    /// Grounding happens exactly once: position.y is clamped to the ground
    /// plane and the emission clock starts. A grounded particle no longer
    /// moves on its own; only the emitter's spawn pass consults it.
    pub fn update(&mut self, dt: f32, now: f32, env: &Environment, cylinders: &[Cylinder]) {
        if self.grounded {
            return;
        }
        self.integrate(dt, env, cylinders);
        if self.position.y <= env.ground {
            self.position.y = env.ground;
            self.grounded = true;
            self.prev_emit = now;
        }
    }
}
