use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orbit_particles::scene::{Particle, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn build_scene(count: usize) -> Scene {
    let mut rng = StdRng::seed_from_u64(0);
    let mut scene = Scene::new();
    for _ in 0..count {
        scene.add(Particle::random(&mut rng).into_node(1.0, 10));
    }
    scene
}

fn bench_particle_step(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let mut particle = Particle::random(&mut rng);

    c.bench_function("particle_step", |b| {
        b.iter(|| {
            particle.step(black_box(1.0 / 60.0));
            black_box(particle.position)
        })
    });
}

fn bench_scene_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_update");

    for count in [50usize, 500, 5000] {
        let mut scene = build_scene(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(scene.update(black_box(1.0 / 60.0))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_particle_step, bench_scene_update);
criterion_main!(benches);
