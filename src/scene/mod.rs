pub mod geometry;
mod graph;
mod mesh;
mod particle;

pub use graph::{Behavior, Node, Scene, Steppable, Transform};
pub use mesh::{Mesh, SphereMesh};
pub use particle::{Particle, SPAWN_SCALE, VELOCITY_SCALE};
