use std::f32::consts::PI;

use crate::types::{MeshVertex, QuadVertex};

/// Indexed triangle list
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

/// UV sphere around the origin
///
/// Builds a (width_segments + 1) x (height_segments + 1) vertex grid; the pole
/// rows emit a single triangle per segment.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry<MeshVertex> {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let mut vertices = Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let (sin_theta, cos_theta) = (v * PI).sin_cos();
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let (sin_phi, cos_phi) = (u * 2.0 * PI).sin_cos();

            let normal = [-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta];
            vertices.push(MeshVertex {
                position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
            });
        }
    }

    let row = width_segments + 1;
    let mut indices = Vec::new();
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Geometry { vertices, indices }
}

/// 2x2 plane covering clip space, uv origin at the top-left
pub fn screen_quad() -> Geometry<QuadVertex> {
    let corner = |x: f32, y: f32| QuadVertex {
        position: [x, y, 0.0],
        uv: [(x + 1.0) * 0.5, (1.0 - y) * 0.5],
    };

    Geometry {
        vertices: vec![
            corner(-1.0, 1.0),
            corner(1.0, 1.0),
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
        ],
        indices: vec![0, 2, 1, 2, 3, 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_counts() {
        let geometry = sphere(1.0, 10, 10);
        assert_eq!(geometry.vertices.len(), 11 * 11);
        // Two triangles per cell, one for each cell touching a pole
        assert_eq!(geometry.indices.len(), 6 * 10 * 9);
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let geometry = sphere(2.5, 8, 6);
        for vertex in &geometry.vertices {
            let p = glam::Vec3::from_array(vertex.position);
            assert!((p.length() - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_indices_in_bounds() {
        let geometry = sphere(1.0, 10, 10);
        let count = geometry.vertices.len();
        assert!(geometry.indices.iter().all(|&i| (i as usize) < count));
    }

    #[test]
    fn dense_sphere_indices_reach_last_vertex() {
        // 301 x 301 vertices, well past the 16-bit index range
        let geometry = sphere(1.0, 300, 300);
        let max = geometry.indices.iter().copied().max().unwrap() as usize;
        assert_eq!(geometry.vertices.len(), 301 * 301);
        assert_eq!(max, geometry.vertices.len() - 1);
    }

    #[test]
    fn degenerate_segments_are_clamped() {
        let geometry = sphere(1.0, 1, 1);
        assert_eq!(geometry.vertices.len(), 4 * 3);
    }

    #[test]
    fn quad_covers_clip_space() {
        let quad = screen_quad();
        assert_eq!(quad.indices.len(), 6);
        for vertex in &quad.vertices {
            assert_eq!(vertex.position[0].abs(), 1.0);
            assert_eq!(vertex.position[1].abs(), 1.0);
            assert!((0.0..=1.0).contains(&vertex.uv[0]));
            assert!((0.0..=1.0).contains(&vertex.uv[1]));
        }
    }
}
