use crate::core::TargetId;

/// Sphere drawn with a flat uniform color
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// RGBA; the shader writes rgb with alpha forced to 1.0
    pub color: [f32; 4],
}

/// Renderable payload attached to a scene node
#[derive(Debug, Clone, PartialEq)]
pub enum Mesh {
    Sphere(SphereMesh),
    /// 2x2 clip-space plane sampling an offscreen target unmodified
    ScreenQuad { source: TargetId },
}

impl Mesh {
    pub fn screen_quad(source: TargetId) -> Self {
        Mesh::ScreenQuad { source }
    }
}
