//! Latitude/longitude sphere mesh shared by the globe and its atmosphere.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Sphere geometry with equirectangular UVs.
pub struct SphereMesh {
    /// Vertex positions on a sphere of the requested radius.
    pub positions: Vec<Vec3>,
    /// Unit outward normals.
    pub normals: Vec<Vec3>,
    /// Texture coordinates; `v = 0` at the north pole, matching image row order.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices, counter-clockwise seen from outside.
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generate a UV sphere.
///
/// Produces `(width_segments + 1) * (height_segments + 1)` vertices; the seam
/// column and pole rows are duplicated so UVs stay continuous. Pole triangles
/// that would be degenerate are skipped. Segment counts below the minimum
/// (3 around, 2 from pole to pole) are raised to it.
pub fn generate_uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> SphereMesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let row_len = width_segments + 1;
    let vertex_count = (row_len * (height_segments + 1)) as usize;

    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * TAU;

            let position = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            positions.push(position);
            normals.push(position.normalize_or(Vec3::Y));
            uvs.push([u, v]);
        }
    }

    let mut indices = Vec::with_capacity((width_segments * (height_segments - 1) * 6) as usize);
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row_len + ix + 1;
            let b = iy * row_len + ix;
            let c = (iy + 1) * row_len + ix;
            let d = (iy + 1) * row_len + ix + 1;

            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    log::debug!(
        "Generated UV sphere r={radius} ({width_segments}x{height_segments}): {} vertices, {} triangles",
        positions.len(),
        indices.len() / 3
    );

    SphereMesh {
        positions,
        normals,
        uvs,
        indices,
    }
}
