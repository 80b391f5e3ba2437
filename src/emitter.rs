//! Particle pool: spawning, recycling, and per-frame simulation.
//!
//! The emitter owns a bounded collection of active particles. Removal uses
//! swap-with-last, so the relative order of live particles is NOT stable
//! across frames; consumers must rebuild any per-particle data each frame
//! and never key on index.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::cylinder::Cylinder;
use crate::particle::{Environment, Particle};

/// Generations past this level are refused outright.
///
/// The blend kernel already drives level-10+ children toward zero-valued
/// parameters; the cap turns that taper into a hard bound so no
/// infinite-generation chain can accumulate.
pub const MAX_LEVEL: u32 = 10;

/// Default particle pool capacity.
pub const DEFAULT_CAPACITY: usize = 5000;

/// Generation falloff kernel.
///
/// Even sextic with `blend(0) == 1`, `blend(x) == 0` for `|x| >= 1`, and
/// zero first derivative at both ends.
pub fn blend(x: f32) -> f32 {
    let x = x.abs();
    if x >= 1.0 {
        return 0.0;
    }
    let x2 = x * x;
    let x4 = x2 * x2;
    (-4.0 / 9.0) * x2 * x4 + (17.0 / 9.0) * x4 + (-22.0 / 9.0) * x2 + 1.0
}

fn lerp(a: f32, b: f32, alpha: f32) -> f32 {
    a + alpha * (b - a)
}

/// Owns the active particle collection and drives it each frame.
///
/// Time is injected: `update` and `spawn` take `now` in seconds on a clock
/// the caller controls, which keeps the simulation deterministic under a
/// fake clock in tests. Randomness is seeded the same way.
pub struct Emitter {
    particles: Vec<Particle>,
    capacity: usize,
    /// Lower bounds for randomized spawn parameters.
    min_template: Particle,
    /// Upper bounds for randomized spawn parameters.
    max_template: Particle,
    prev_time: f32,
    next_emit_time: f32,
    rng: SmallRng,
}

impl Emitter {
    /// Create an emitter with the stock templates.
    ///
    /// `now` becomes the baseline for the first frame's delta, so the first
    /// `update` integrates a near-zero step.
    pub fn new(now: f32) -> Self {
        let mut min_template = Particle::new(0, 0.15, 0.1, 5.0, 15.0, now);
        let mut max_template = Particle::new(0, 7.0, 0.4, 9.0, 50.0, now);
        min_template.position = Vec3::new(0.0, 1.0, 0.0);
        max_template.position = Vec3::new(0.0, 1.0, 0.0);
        min_template.color = Vec3::ZERO;
        max_template.color = Vec3::ONE;
        Self {
            particles: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
            min_template,
            max_template,
            prev_time: now,
            next_emit_time: now,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Override the pool capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self.particles = Vec::with_capacity(capacity);
        self
    }

    /// Seed the random generator for deterministic spawning.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Replace the parameter templates.
    ///
    /// Spawn parameters are drawn between the corresponding fields of the
    /// two templates; pinning `min == max` makes spawns exact.
    pub fn with_templates(mut self, min: Particle, max: Particle) -> Self {
        self.min_template = min;
        self.max_template = max;
        self
    }

    /// Live particles, for the render pass. Read-only; order is unstable.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn rand01(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    fn rand_between(&mut self, a: f32, b: f32) -> f32 {
        let alpha = self.rand01();
        lerp(a, b, alpha)
    }

    /// Spawn one particle with parameters drawn between the templates.
    ///
    /// Each scalar attribute gets an independent random draw, scaled by the
    /// generation blend factor so deep generations come out anemic. `pos`
    /// and `color` override the template draws when given (children inherit
    /// their parent's). The initial velocity is a uniform direction over the
    /// upper hemisphere; particles never launch downward.
    ///
    /// A full pool or a level past [`MAX_LEVEL`] silently drops the request;
    /// backpressure here is a no-op by design, not an error.
    pub fn spawn(&mut self, level: u32, pos: Option<Vec3>, color: Option<Vec3>, now: f32) {
        if self.particles.len() >= self.capacity || level > MAX_LEVEL {
            return;
        }
        let b = blend(level as f32 / 10.0);
        let (min, max) = (self.min_template, self.max_template);
        let lifetime = lerp(min.lifetime, max.lifetime, b * self.rand01());
        let speed = lerp(min.speed, max.speed, b * self.rand01());
        let size = lerp(min.size, max.size, b * self.rand01());
        let emit_rate = lerp(min.emit_rate, max.emit_rate, b * self.rand01());
        let mut p = Particle::new(level, lifetime, speed, size, emit_rate, now);
        p.position = match pos {
            Some(pos) => pos,
            None => Vec3::new(
                self.rand_between(min.position.x, max.position.x),
                self.rand_between(min.position.y, max.position.y),
                self.rand_between(min.position.z, max.position.z),
            ),
        };
        p.color = match color {
            Some(color) => color,
            None => Vec3::new(
                self.rand_between(min.color.x, max.color.x),
                self.rand_between(min.color.y, max.color.y),
                self.rand_between(min.color.z, max.color.z),
            ),
        };
        let azimuth = self.rand_between(0.0, TAU);
        let elevation = self.rand_between(0.0, FRAC_PI_2);
        p.velocity = Vec3::new(
            elevation.cos() * azimuth.cos(),
            elevation.sin(),
            elevation.cos() * azimuth.sin(),
        );
        self.particles.push(p);
    }

    /// Advance the whole pool one frame.
    ///
    /// In order: expired particles are swap-removed; grounded survivors past
    /// their emission interval spawn one child each at their own position and
    /// color; airborne survivors integrate. Children spawned this frame join
    /// the pass and take a full step. Finally the autonomous root-emission
    /// clock may add one level-0 particle and reschedule itself.
    pub fn update(&mut self, now: f32, env: &Environment, cylinders: &[Cylinder]) {
        let dt = now - self.prev_time;
        self.prev_time = now;

        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].expired(now) {
                self.particles.swap_remove(i);
            } else {
                i += 1;
            }
        }

        let mut k = 0;
        while k < self.particles.len() {
            let p = self.particles[k];
            if p.grounded {
                if now - p.prev_emit > 1.0 / p.emit_rate {
                    self.spawn(p.level + 1, Some(p.position), Some(p.color), now);
                    self.particles[k].prev_emit = now;
                }
            } else {
                self.particles[k].update(dt, now, env, cylinders);
            }
            k += 1;
        }

        if now >= self.next_emit_time {
            self.spawn(0, None, None, now);
            let rate = self.rand_between(self.min_template.emit_rate, self.max_template.emit_rate);
            self.next_emit_time = now + 1.0 / rate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Emitter {
        Emitter::new(0.0).with_seed(7)
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(0.0), 1.0);
        assert_eq!(blend(1.0), 0.0);
        assert_eq!(blend(-1.0), 0.0);
        assert_eq!(blend(2.5), 0.0);
    }

    #[test]
    fn blend_is_symmetric() {
        for x in [0.1, 0.3, 0.5, 0.7, 0.99] {
            assert_eq!(blend(x), blend(-x));
        }
    }

    #[test]
    fn blend_is_continuous_at_the_ends() {
        assert!(blend(0.9999) < 1e-3);
        assert!((blend(1e-4) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn blend_falls_off_monotonically() {
        let mut prev = blend(0.0);
        for i in 1..=100 {
            let next = blend(i as f32 / 100.0);
            assert!(next <= prev);
            prev = next;
        }
    }

    #[test]
    fn spawned_attributes_stay_within_template_bounds() {
        let mut e = seeded();
        for _ in 0..200 {
            e.spawn(0, None, None, 0.0);
        }
        for p in e.particles() {
            assert!(p.lifetime >= 0.15 && p.lifetime <= 7.0);
            assert!(p.speed >= 0.1 && p.speed <= 0.4);
            assert!(p.size >= 5.0 && p.size <= 9.0);
            assert!(p.emit_rate >= 15.0 && p.emit_rate <= 50.0);
            assert!(p.color.min_element() >= 0.0 && p.color.max_element() <= 1.0);
        }
    }

    #[test]
    fn initial_velocity_is_a_unit_upper_hemisphere_direction() {
        let mut e = seeded();
        for _ in 0..200 {
            e.spawn(0, None, None, 0.0);
        }
        for p in e.particles() {
            assert!(p.velocity.y >= 0.0);
            assert!((p.velocity.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn deep_generations_get_anemic_parameters() {
        let mut e = seeded();
        e.spawn(9, None, None, 0.0);
        let p = e.particles()[0];
        // blend(0.9) is tiny, so every attribute hugs its template minimum
        let b = blend(0.9);
        assert!(p.lifetime <= 0.15 + b * (7.0 - 0.15));
        assert!(p.speed <= 0.1 + b * (0.4 - 0.1));
    }

    #[test]
    fn spawning_past_the_level_cap_is_refused() {
        let mut e = seeded();
        e.spawn(MAX_LEVEL, None, None, 0.0);
        assert_eq!(e.len(), 1);
        e.spawn(MAX_LEVEL + 1, None, None, 0.0);
        assert_eq!(e.len(), 1);
    }

    #[test]
    fn inherited_position_and_color_take_precedence() {
        let mut e = seeded();
        let pos = Vec3::new(0.4, 0.0, -0.2);
        let col = Vec3::new(2.0, 3.0, 4.0);
        e.spawn(3, Some(pos), Some(col), 0.0);
        let p = e.particles()[0];
        assert_eq!(p.position, pos);
        assert_eq!(p.color, col);
        assert_eq!(p.level, 3);
    }

    #[test]
    fn seeded_emitters_spawn_identically() {
        let mut a = Emitter::new(0.0).with_seed(42);
        let mut b = Emitter::new(0.0).with_seed(42);
        a.spawn(0, None, None, 0.0);
        b.spawn(0, None, None, 0.0);
        assert_eq!(a.particles()[0].position, b.particles()[0].position);
        assert_eq!(a.particles()[0].velocity, b.particles()[0].velocity);
        assert_eq!(a.particles()[0].lifetime, b.particles()[0].lifetime);
    }
}
