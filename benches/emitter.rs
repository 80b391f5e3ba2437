//! Benchmarks for the CPU particle update loop.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;

use plume::{Cylinder, Emitter, Environment, Particle};

fn scene_cylinders() -> Vec<Cylinder> {
    vec![
        Cylinder::new(0.5, 0.25, Vec3::new(1.0, 0.7, 0.0), Vec3::new(-0.3, 0.0, 0.6)),
        Cylinder::new(0.35, 0.5, Vec3::new(0.0, 0.0, 0.7), Vec3::new(0.3, 0.0, -0.2)),
        Cylinder::new(0.25, 0.35, Vec3::new(0.0, 0.7, 0.0), Vec3::new(0.2, 0.0, -0.7)),
    ]
}

/// An emitter pre-filled with `population` long-lived airborne particles.
fn populated_emitter(population: usize) -> Emitter {
    let mut min = Particle::new(0, 1000.0, 0.1, 5.0, 15.0, 0.0);
    let mut max = Particle::new(0, 1000.0, 0.4, 9.0, 50.0, 0.0);
    min.position = Vec3::new(-1.0, 5.0, -1.0);
    max.position = Vec3::new(1.0, 10.0, 1.0);
    min.color = Vec3::ZERO;
    max.color = Vec3::ONE;
    let mut emitter = Emitter::new(0.0)
        .with_seed(1)
        .with_capacity(population)
        .with_templates(min, max);
    for _ in 0..population {
        emitter.spawn(0, None, None, 0.0);
    }
    emitter
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("emitter_update");
    let env = Environment::default();
    let cylinders = scene_cylinders();

    for population in [100, 1000, 5000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            &population,
            |b, &population| {
                let mut emitter = populated_emitter(population);
                let mut now = 0.0_f32;
                b.iter(|| {
                    now += 1.0 / 60.0;
                    emitter.update(now, &env, &cylinders);
                    black_box(emitter.len())
                });
            },
        );
    }
    group.finish();
}

fn bench_spawn(c: &mut Criterion) {
    c.bench_function("emitter_spawn_to_capacity", |b| {
        b.iter(|| {
            let mut emitter = Emitter::new(0.0).with_seed(2).with_capacity(5000);
            for _ in 0..5000 {
                emitter.spawn(0, None, None, 0.0);
            }
            black_box(emitter.len())
        });
    });
}

criterion_group!(benches, bench_update, bench_spawn);
criterion_main!(benches);
