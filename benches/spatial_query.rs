//! Benchmarks for containment queries and modifier application.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use dotfield::prelude::*;
use dotfield::spatial::{particles_inside, BucketGrid};

fn pointer_at(x: f32, y: f32, radius: f32) -> Pointer {
    let mut pointer = Pointer::new(radius, RadiusBounds::new(10.0, 500.0));
    pointer.position = Vec2::new(x, y);
    pointer
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("particles_inside");

    for pitch in [10.0f32, 5.0, 2.5] {
        let config = GridConfig::new(600.0, 600.0).with_step(pitch, pitch);
        let grid = ParticleGrid::build(&config, None);
        let pointer = pointer_at(300.0, 300.0, 100.0);
        let index = BucketGrid::new(50.0, grid.particles());

        group.bench_with_input(BenchmarkId::new("scan", grid.len()), &grid, |b, grid| {
            b.iter(|| black_box(particles_inside(&pointer, grid.particles())))
        });

        group.bench_with_input(BenchmarkId::new("bucketed", grid.len()), &grid, |b, grid| {
            b.iter(|| black_box(index.query(&pointer, grid.particles())))
        });
    }

    group.finish();
}

fn bench_modifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("modifier_apply");
    let grid = ParticleGrid::build(&GridConfig::default(), None);
    let pointer = pointer_at(300.0, 300.0, 100.0);
    let inside = particles_inside(&pointer, grid.particles());
    let mut rng = SmallRng::seed_from_u64(0);

    for modifier in ModifierRegistry::with_color_shift().iter() {
        group.bench_function(modifier.name(), |b| {
            let mut particles = grid.particles().to_vec();
            b.iter(|| {
                modifier.apply(&pointer, &mut particles, &inside, 1.0, &mut rng);
                black_box(&particles);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_query, bench_modifiers);
criterion_main!(benches);
