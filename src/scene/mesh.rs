use std::collections::BTreeSet;
use std::f32::consts::PI;

use glam::{EulerRot, Mat4, Vec3};

use crate::foundation::core::Rgb8;

/// Segment counts above this are clamped, keeping vertex indices well inside `u32`.
pub const MAX_SPHERE_SEGMENTS: u32 = 512;

/// UV sphere: `(width_segments + 1) * (height_segments + 1)` vertices, two triangles per
/// quad.
#[derive(Clone, Debug)]
pub struct SphereGeometry {
    pub radius: f32,
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl SphereGeometry {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.clamp(3, MAX_SPHERE_SEGMENTS);
        let hs = height_segments.clamp(2, MAX_SPHERE_SEGMENTS);

        let mut positions = Vec::with_capacity((ws as usize + 1) * (hs as usize + 1));
        for y in 0..=hs {
            let theta = y as f32 / hs as f32 * PI;
            let ring = radius * theta.sin();
            let py = radius * theta.cos();
            for x in 0..=ws {
                let phi = x as f32 / ws as f32 * 2.0 * PI;
                positions.push(Vec3::new(-ring * phi.cos(), py, ring * phi.sin()));
            }
        }

        let stride = ws + 1;
        let mut indices = Vec::with_capacity(ws as usize * hs as usize * 6);
        for y in 0..hs {
            for x in 0..ws {
                let a = y * stride + x;
                let b = a + stride;
                let c = b + 1;
                let d = a + 1;
                // Pole rows collapse to points; their degenerate triangles are skipped.
                if y != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if y != hs - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            radius,
            positions,
            indices,
        }
    }

    /// Unique triangle edges, as drawn by a wireframe material.
    pub fn wireframe_edges(&self) -> Vec<[u32; 2]> {
        let mut edges = BTreeSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (i, j) in [(0, 1), (1, 2), (2, 0)] {
                let (a, b) = (tri[i], tri[j]);
                edges.insert([a.min(b), a.max(b)]);
            }
        }
        edges.into_iter().collect()
    }
}

/// Mesh drawn as colored edges, with its own Euler rotation in radians.
#[derive(Clone, Debug)]
pub struct WireframeMesh {
    pub geometry: SphereGeometry,
    pub color: Rgb8,
    pub rotation: Vec3,
    edges: Vec<[u32; 2]>,
}

impl WireframeMesh {
    pub fn new(geometry: SphereGeometry, color: Rgb8) -> Self {
        let edges = geometry.wireframe_edges();
        Self {
            geometry,
            color,
            rotation: Vec3::ZERO,
            edges,
        }
    }

    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

/// Scene graph root. Holds the single globe mesh.
#[derive(Clone, Debug)]
pub struct Scene {
    pub globe: WireframeMesh,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mesh.rs"]
mod tests;
