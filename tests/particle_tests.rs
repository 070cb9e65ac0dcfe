use glam::Vec3;
use orbit_particles::scene::{Behavior, Particle, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn trajectory(mut particle: Particle, steps: &[f32]) -> Vec<(Vec3, Vec3, Vec3)> {
    steps
        .iter()
        .map(|&dt| {
            particle.step(dt);
            (particle.position, particle.velocity, particle.rotation)
        })
        .collect()
}

#[test]
fn displaced_particle_swings_through_origin() {
    let mut particle = Particle::at_rest(Vec3::new(10.0, 0.0, 0.0));
    particle.step(1.0);

    assert!((particle.velocity - Vec3::new(-10.0, 0.0, 0.0)).length() < 1e-5);
    assert!(particle.position.length() < 1e-5);
}

#[test]
fn steps_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(99);
    let particle = Particle::random(&mut rng);
    let steps = [0.0, 0.016, 0.033, 0.5, 0.016, 2.0];

    assert_eq!(
        trajectory(particle.clone(), &steps),
        trajectory(particle, &steps)
    );
}

#[test]
fn axes_oscillate_independently() {
    let mut coupled = Particle::at_rest(Vec3::new(3.0, -4.0, 0.0));
    let mut x_only = Particle::at_rest(Vec3::new(3.0, 0.0, 0.0));

    for _ in 0..100 {
        coupled.step(0.05);
        x_only.step(0.05);
    }

    assert_eq!(coupled.position.x, x_only.position.x);
    assert_eq!(coupled.velocity.x, x_only.velocity.x);
    assert_eq!(coupled.position.z, 0.0);
}

#[test]
fn small_steps_stay_bounded() {
    // Symplectic Euler keeps a small-step oscillator near its starting amplitude
    let mut particle = Particle::at_rest(Vec3::new(10.0, 0.0, 0.0));
    for _ in 0..10_000 {
        particle.step(0.01);
        assert!(particle.position.length() < 10.1);
    }
}

#[test]
fn large_steps_are_accepted_without_clamping() {
    let mut particle = Particle::at_rest(Vec3::new(1.0, 0.0, 0.0));
    for _ in 0..20 {
        particle.step(3.0);
    }

    // dt > 2 is unstable for this integrator: the amplitude grows
    assert!(particle.position.length() > 1.0);
    assert!(particle.position.is_finite());
}

#[test]
fn scene_of_particles_steps_every_child() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut scene = Scene::new();
    for _ in 0..50 {
        scene.add(Particle::random(&mut rng).into_node(1.0, 10));
    }

    assert_eq!(scene.update(0.016), 50);
    for node in scene.children() {
        let Behavior::Particle(particle) = node.behavior() else {
            panic!("expected particle node");
        };
        assert_eq!(node.transform.position, particle.position);
    }
}
