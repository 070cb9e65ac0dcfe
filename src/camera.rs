use glam::{Mat4, Vec3};

pub const DEFAULT_FOV_DEGREES: f32 = 45.0;
pub const DEFAULT_NEAR: f32 = 1.0;
pub const DEFAULT_FAR: f32 = 1000.0;

/// Anything that can project the scene for a render pass
pub trait Camera {
    /// Combined projection * view matrix
    fn view_projection(&self) -> Mat4;
}

/// Camera that leaves clip-space positions untouched
/// Used by the fullscreen quad pass, whose vertices are already in clip space
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCamera;

impl Camera for IdentityCamera {
    fn view_projection(&self) -> Mat4 {
        Mat4::IDENTITY
    }
}

/// Right-handed perspective camera looking at a target point
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub up: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            up: Vec3::Y,
            fov_degrees,
            aspect,
            near,
            far,
            target: Vec3::NEG_Z,
        }
    }

    /// Aim the camera at a world-space point
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Transform the position by `matrix` (position is treated as a point)
    pub fn apply_matrix(&mut self, matrix: &Mat4) {
        self.position = matrix.transform_point3(self.position);
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV_DEGREES, 1.0, DEFAULT_NEAR, DEFAULT_FAR)
    }
}

impl Camera for PerspectiveCamera {
    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
