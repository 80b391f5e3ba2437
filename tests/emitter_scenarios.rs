//! Cross-module emitter scenarios driven by a fake clock.
//!
//! Every `update` here receives an explicit `now`, so the scenarios step
//! simulated time exactly and never sleep.

use plume::{Cylinder, Emitter, Environment, Particle, Vec3, MAX_LEVEL};

/// Templates with every randomized parameter pinned (`min == max`), so
/// spawned particles come out with exact, predictable values.
fn pinned_templates(lifetime: f32, speed: f32, emit_rate: f32, position: Vec3) -> (Particle, Particle) {
    let mut t = Particle::new(0, lifetime, speed, 5.0, emit_rate, 0.0);
    t.position = position;
    t.color = Vec3::ZERO;
    (t, t)
}

const CALM: Environment = Environment {
    gravity: 0.001,
    ground: 0.0,
};

#[test]
fn capacity_one_drops_the_second_spawn() {
    let mut e = Emitter::new(0.0).with_seed(1).with_capacity(1);
    e.spawn(0, None, None, 0.0);
    e.spawn(0, None, None, 0.0);
    assert_eq!(e.len(), 1);
}

#[test]
fn pool_count_pins_at_capacity_without_corruption() {
    let mut e = Emitter::new(0.0).with_seed(2).with_capacity(8);
    for _ in 0..40 {
        e.spawn(0, None, None, 0.0);
    }
    assert_eq!(e.len(), 8);
    for p in e.particles() {
        assert!(p.lifetime > 0.0 && p.speed > 0.0 && p.size > 0.0);
    }
}

#[test]
fn grounded_parent_emits_children_on_its_cadence() {
    // roots spawn far overhead so only our hand-placed parent can ground
    // within the test window
    let (min, max) = pinned_templates(100.0, 1.0, 20.0, Vec3::new(0.0, 50.0, 0.0));
    let mut e = Emitter::new(0.0)
        .with_seed(3)
        .with_capacity(1000)
        .with_templates(min, max);
    let env = Environment {
        gravity: 200.0,
        ground: 0.0,
    };
    let parent_pos = Vec3::new(0.2, 0.3, 0.1);
    let parent_color = Vec3::new(5.0, 5.0, 5.0);
    e.spawn(5, Some(parent_pos), Some(parent_color), 0.0);

    let mut now = 0.0;
    while !e.particles().iter().any(|p| p.level == 5 && p.grounded) {
        now += 0.03;
        e.update(now, &env, &[]);
        assert!(now < 5.0, "parent never grounded");
    }

    let grounded_at = now;
    while now < grounded_at + 1.0 {
        now += 0.03;
        e.update(now, &env, &[]);
    }

    let children: Vec<&plume::Particle> = e
        .particles()
        .iter()
        .filter(|p| p.level == 6)
        .collect();
    assert!(children.len() >= 10, "expected a stream of children, got {}", children.len());

    // children inherit the parent's color and appear at (or one step from)
    // the parent's grounded position
    let ground_pos = e
        .particles()
        .iter()
        .find(|p| p.level == 5)
        .map(|p| p.position)
        .unwrap();
    for child in &children {
        assert_eq!(child.color, parent_color);
        let age = now - child.birth;
        let max_travel = child.speed * (age + 0.03);
        assert!((child.position - ground_pos).length() <= max_travel + 1e-4);
    }

    // consecutive spawns are separated by more than 1/emit_rate
    let mut births: Vec<f32> = children.iter().map(|p| p.birth).collect();
    births.sort_by(f32::total_cmp);
    for pair in births.windows(2) {
        assert!(pair[1] - pair[0] > 1.0 / 20.0 - 1e-5);
    }
}

#[test]
fn removal_keeps_survivor_identities_but_not_their_order() {
    let (min, max) = pinned_templates(2.0, 0.01, 20.0, Vec3::new(0.0, 50.0, 0.0));
    let mut e = Emitter::new(0.0)
        .with_seed(4)
        .with_capacity(100)
        .with_templates(min, max);
    let a = Vec3::new(2.0, 0.0, 0.0);
    let b = Vec3::new(3.0, 0.0, 0.0);
    let c = Vec3::new(4.0, 0.0, 0.0);
    e.spawn(0, None, Some(a), 0.0);
    e.spawn(0, None, Some(b), 1.0);
    e.spawn(0, None, Some(c), 1.0);

    // at 2.5 the first particle is past its 2 second lifetime
    e.update(2.5, &CALM, &[]);

    let colors: Vec<Vec3> = e.particles().iter().map(|p| p.color).collect();
    assert!(!colors.contains(&a));
    assert!(colors.contains(&b));
    assert!(colors.contains(&c));
    // swap-remove moved the last survivor into the vacated front slot
    assert_eq!(colors[0], c);
    assert_eq!(colors[1], b);
}

#[test]
fn root_emission_reschedules_within_the_template_rate_band() {
    let mut e = Emitter::new(0.0).with_seed(5);
    let env = Environment::default();

    // the very first update owes a root particle
    e.update(0.0, &env, &[]);
    assert_eq!(e.len(), 1);

    // stock rates are 15..50, so the next root is due between 1/50 and
    // 1/15 seconds from now
    e.update(0.01, &env, &[]);
    assert_eq!(e.len(), 1, "root arrived before 1/max_rate");
    e.update(0.1, &env, &[]);
    assert_eq!(e.len(), 2, "root missing after 1/min_rate");
}

#[test]
fn first_update_integrates_a_near_zero_step() {
    let mut e = Emitter::new(5.0).with_seed(6);
    e.spawn(0, None, None, 5.0);
    let before = e.particles()[0].position;

    // construction time is the delta baseline, so updating at the same
    // instant moves nothing
    e.update(5.0, &CALM, &[]);
    assert_eq!(e.particles()[0].position, before);
}

#[test]
fn grounded_parent_at_the_level_cap_emits_nothing() {
    let (min, max) = pinned_templates(100.0, 1.0, 20.0, Vec3::new(0.0, 50.0, 0.0));
    let mut e = Emitter::new(0.0)
        .with_seed(7)
        .with_capacity(1000)
        .with_templates(min, max);
    let env = Environment {
        gravity: 200.0,
        ground: 0.0,
    };
    e.spawn(MAX_LEVEL, Some(Vec3::new(0.0, 0.2, 0.0)), Some(Vec3::ONE), 0.0);

    let mut now = 0.0;
    while now < 2.0 {
        now += 0.03;
        e.update(now, &env, &[]);
    }
    assert!(e.particles().iter().any(|p| p.level == MAX_LEVEL && p.grounded));
    assert!(!e.particles().iter().any(|p| p.level > MAX_LEVEL));
}

#[test]
fn particles_bounce_off_scene_cylinders_during_update() {
    let (min, max) = pinned_templates(100.0, 1.0, 20.0, Vec3::new(0.0, 50.0, 0.0));
    let mut e = Emitter::new(0.0)
        .with_seed(8)
        .with_capacity(10)
        .with_templates(min, max);
    let env = Environment {
        gravity: 500.0,
        ground: 0.0,
    };
    let cyl = Cylinder::new(0.5, 10.0, Vec3::ONE, Vec3::ZERO);

    // dropped from just above the (very wide) cylinder, the particle lands
    // on its top instead of the ground
    e.spawn(0, Some(Vec3::new(0.0, 0.8, 0.0)), Some(Vec3::ONE), 0.0);
    let mut now = 0.0;
    while now < 3.0 {
        now += 0.03;
        e.update(now, &env, &[cyl]);
        let p = e.particles().iter().find(|p| p.color == Vec3::ONE).unwrap();
        assert!(!p.grounded, "particle fell through the cylinder");
    }
    let p = e.particles().iter().find(|p| p.color == Vec3::ONE).unwrap();
    assert!(p.position.y >= 0.5 - 1e-4);
}
