use glam::{EulerRot, Mat4, Quat, Vec3};

use super::mesh::Mesh;
use super::particle::Particle;

/// Per-frame behavior for nodes that animate themselves
pub trait Steppable {
    /// Advance by `dt` seconds
    fn update(&mut self, dt: f32);
}

/// Local transform of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles (XYZ order), radians
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// What a node does when the frame loop steps the scene
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    Static,
    Particle(Particle),
}

/// Scene graph node: transform, optional mesh and children
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub transform: Transform,
    pub mesh: Option<Mesh>,
    pub children: Vec<Node>,
    behavior: Behavior,
}

impl Node {
    /// Empty static node
    pub fn new() -> Self {
        Self {
            transform: Transform::default(),
            mesh: None,
            children: Vec::new(),
            behavior: Behavior::Static,
        }
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn particle(&self) -> Option<&Particle> {
        match &self.behavior {
            Behavior::Particle(particle) => Some(particle),
            Behavior::Static => None,
        }
    }

    pub fn is_steppable(&self) -> bool {
        !matches!(self.behavior, Behavior::Static)
    }

    /// Step the node's behavior, if any
    /// Returns whether anything was stepped
    pub fn update(&mut self, dt: f32) -> bool {
        match &mut self.behavior {
            Behavior::Particle(particle) => {
                particle.update(dt);
                self.transform.position = particle.position;
                self.transform.rotation = particle.rotation;
                true
            }
            Behavior::Static => false,
        }
    }

    /// Visit every mesh in this subtree with its world matrix
    pub fn visit_meshes<F>(&self, parent: &Mat4, f: &mut F)
    where
        F: FnMut(&Mat4, &Mesh),
    {
        let world = *parent * self.transform.matrix();
        if let Some(mesh) = &self.mesh {
            f(&world, mesh);
        }
        for child in &self.children {
            child.visit_meshes(&world, f);
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

/// Root container of a scene graph
#[derive(Debug, Clone, Default)]
pub struct Scene {
    children: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self { children: Vec::new() }
    }

    pub fn add(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Step every top-level child that has a behavior
    /// Returns the number of children stepped
    pub fn update(&mut self, dt: f32) -> usize {
        self.children
            .iter_mut()
            .map(|node| node.update(dt))
            .filter(|stepped| *stepped)
            .count()
    }

    /// Particle states of the top-level children
    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.children.iter().filter_map(Node::particle)
    }

    /// Visit every mesh in the scene with its world matrix
    pub fn visit_meshes<F>(&self, mut f: F)
    where
        F: FnMut(&Mat4, &Mesh),
    {
        for node in &self.children {
            node.visit_meshes(&Mat4::IDENTITY, &mut f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::mesh::SphereMesh;

    fn sphere() -> Mesh {
        Mesh::Sphere(SphereMesh {
            radius: 1.0,
            width_segments: 10,
            height_segments: 10,
            color: [1.0; 4],
        })
    }

    #[test]
    fn static_nodes_are_not_stepped() {
        let mut scene = Scene::new();
        scene.add(Node::new().with_mesh(sphere()));
        scene.add(Particle::at_rest(Vec3::X).into_node(1.0, 10));

        assert_eq!(scene.update(0.1), 1);
        assert_eq!(scene.children()[0].transform, Transform::default());
    }

    #[test]
    fn stepping_syncs_transform() {
        let mut node = Particle::at_rest(Vec3::new(2.0, 0.0, 0.0))
            .with_angular_velocity(Vec3::Y)
            .into_node(1.0, 10);

        assert!(node.update(0.5));
        let particle = node.particle().cloned().unwrap();
        assert_eq!(node.transform.position, particle.position);
        assert_eq!(node.transform.rotation, particle.rotation);
    }

    #[test]
    fn world_matrices_compose_parent_first() {
        let mut child = Node::new().with_mesh(sphere());
        child.transform.position = Vec3::new(0.0, 1.0, 0.0);
        let mut parent = Node::new().with_child(child);
        parent.transform.position = Vec3::new(5.0, 0.0, 0.0);

        let mut scene = Scene::new();
        scene.add(parent);

        let mut origins = Vec::new();
        scene.visit_meshes(|world, _| origins.push(world.transform_point3(Vec3::ZERO)));

        assert_eq!(origins.len(), 1);
        assert!((origins[0] - Vec3::new(5.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn transform_matrix_applies_scale_then_rotation_then_translation() {
        let transform = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            scale: Vec3::splat(2.0),
        };

        let p = transform.matrix().transform_point3(Vec3::Z);
        assert!((p - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }
}
