use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

use super::graph::{Behavior, Node, Steppable};
use super::mesh::{Mesh, SphereMesh};

/// Side of the cube particles spawn in, centred on the origin
pub const SPAWN_SCALE: f32 = 50.0;
/// Initial speed as a fraction of the spawn scale
pub const VELOCITY_SCALE: f32 = 0.01;

/// Oscillating particle state
///
/// Each axis is an independent undamped harmonic oscillator with unit mass and
/// unit spring constant: the acceleration is always the negated position.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Euler angles (XYZ order), radians
    pub rotation: Vec3,
    /// Constant angular velocity, radians per second
    pub angular_velocity: Vec3,
    pub color: [f32; 4],
}

impl Particle {
    /// Random particle inside the spawn cube with a random tint in [0.5, 1.0]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut centred = |scale: f32| (rng.gen::<f32>() - 0.5) * scale;

        let position = Vec3::new(
            centred(SPAWN_SCALE),
            centred(SPAWN_SCALE),
            centred(SPAWN_SCALE),
        );
        let rotation = Vec3::new(centred(2.0 * PI), centred(2.0 * PI), centred(2.0 * PI));
        let angular_velocity = Vec3::new(centred(2.0 * PI), centred(2.0 * PI), centred(2.0 * PI));
        let speed = SPAWN_SCALE * VELOCITY_SCALE;
        let velocity = Vec3::new(centred(speed), centred(speed), centred(speed));

        let mut tint = || rng.gen::<f32>() * 0.5 + 0.5;
        let color = [tint(), tint(), tint(), 1.0];

        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            rotation,
            angular_velocity,
            color,
        }
    }

    /// Motionless white particle at `position`
    pub fn at_rest(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            rotation: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            color: [1.0; 4],
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: Vec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Semi-implicit Euler step: velocity is updated first and the new
    /// velocity moves the position.
    pub fn step(&mut self, dt: f32) {
        self.acceleration = -self.position;
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;
    }

    /// Wrap into a scene node drawing a shaded sphere
    pub fn into_node(self, radius: f32, segments: u32) -> Node {
        let mesh = Mesh::Sphere(SphereMesh {
            radius,
            width_segments: segments,
            height_segments: segments,
            color: self.color,
        });

        let mut node = Node::new().with_mesh(mesh);
        node.transform.position = self.position;
        node.transform.rotation = self.rotation;
        node.with_behavior(Behavior::Particle(self))
    }
}

impl Steppable for Particle {
    fn update(&mut self, dt: f32) {
        self.step(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-5;

    #[test]
    fn random_particles_stay_in_spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let p = Particle::random(&mut rng);
            for axis in p.position.to_array() {
                assert!((-25.0..=25.0).contains(&axis));
            }
            for axis in p.rotation.to_array() {
                assert!((-PI..=PI).contains(&axis));
            }
            for axis in p.velocity.to_array() {
                assert!(axis.abs() <= 0.25 + 1e-6);
            }
            for channel in &p.color[..3] {
                assert!((0.5..=1.0).contains(channel));
            }
            assert_eq!(p.color[3], 1.0);
            assert_eq!(p.acceleration, Vec3::ZERO);
        }
    }

    #[test]
    fn single_step_from_displacement() {
        let mut p = Particle::at_rest(Vec3::new(10.0, 0.0, 0.0));
        p.step(1.0);

        assert!((p.velocity - Vec3::new(-10.0, 0.0, 0.0)).length() < EPS);
        assert!(p.position.length() < EPS);
        assert_eq!(p.acceleration, Vec3::new(-10.0, 0.0, 0.0));
    }

    #[test]
    fn zero_step_only_refreshes_acceleration() {
        let mut p = Particle::at_rest(Vec3::new(1.0, -2.0, 3.0)).with_velocity(Vec3::new(0.5, 0.5, 0.5));
        p.step(0.0);

        assert_eq!(p.position, Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(p.velocity, Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(p.acceleration, Vec3::new(-1.0, 2.0, -3.0));
    }

    #[test]
    fn rotation_advances_by_angular_velocity() {
        let mut p = Particle::at_rest(Vec3::ZERO).with_angular_velocity(Vec3::new(1.0, -2.0, 0.5));
        p.step(0.5);

        assert!((p.rotation - Vec3::new(0.5, -1.0, 0.25)).length() < EPS);
    }

    #[test]
    fn node_mirrors_particle_transform() {
        let mut rng = StdRng::seed_from_u64(1);
        let particle = Particle::random(&mut rng);
        let (position, rotation) = (particle.position, particle.rotation);

        let node = particle.into_node(1.0, 10);
        assert_eq!(node.transform.position, position);
        assert_eq!(node.transform.rotation, rotation);
        assert!(node.is_steppable());
    }
}
