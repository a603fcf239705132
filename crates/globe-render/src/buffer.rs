//! Vertex and index buffer management for GPU rendering.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use globe_scene::SphereMesh;

/// A complete mesh buffer containing vertex and index data ready for GPU rendering.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

impl MeshBuffer {
    /// Bind vertex and index buffers to a render pass.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), self.index_format);
    }

    /// Draw the entire mesh using indexed rendering.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Per-instance buffer drawn as one four-vertex strip per instance.
pub struct InstanceBuffer {
    pub instance_buffer: wgpu::Buffer,
    pub instance_count: u32,
}

impl InstanceBuffer {
    /// Corners per instance; the vertex shader derives them from the vertex index.
    pub const QUAD_VERTICES: u32 = 4;

    /// Bind and draw every instance.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        render_pass.draw(0..Self::QUAD_VERTICES, 0..self.instance_count);
    }
}

/// Index data that can be either u16 or u32 format.
pub enum IndexData<'a> {
    U16(&'a [u16]),
    U32(&'a [u32]),
}

impl IndexData<'_> {
    /// Get the appropriate wgpu index format for this data.
    pub fn format(&self) -> wgpu::IndexFormat {
        match self {
            IndexData::U16(_) => wgpu::IndexFormat::Uint16,
            IndexData::U32(_) => wgpu::IndexFormat::Uint32,
        }
    }

    /// Get the number of indices.
    pub fn count(&self) -> u32 {
        match self {
            IndexData::U16(data) => data.len() as u32,
            IndexData::U32(data) => data.len() as u32,
        }
    }

    /// Get the raw byte slice for buffer creation.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexData::U16(data) => bytemuck::cast_slice(data),
            IndexData::U32(data) => bytemuck::cast_slice(data),
        }
    }
}

/// GPU buffer allocator for creating vertex and index buffers.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    /// Create a new buffer allocator with the given device.
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Create a complete mesh buffer from vertex and index data.
    pub fn create_mesh(&self, label: &str, vertices: &[u8], indices: IndexData) -> MeshBuffer {
        let vertex_buffer = self.create_vertex_buffer(&format!("{label}-vertices"), vertices);
        let index_buffer = self.create_index_buffer(&format!("{label}-indices"), &indices);

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: indices.count(),
            index_format: indices.format(),
        }
    }

    /// Create an instance buffer of star positions.
    pub fn create_instances(&self, label: &str, instances: &[StarInstance]) -> InstanceBuffer {
        InstanceBuffer {
            instance_buffer: self
                .create_vertex_buffer(&format!("{label}-instances"), bytemuck::cast_slice(instances)),
            instance_count: instances.len() as u32,
        }
    }

    /// Create a vertex buffer from raw byte data.
    pub fn create_vertex_buffer(&self, label: &str, data: &[u8]) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;

        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: data,
                usage: wgpu::BufferUsages::VERTEX,
            })
    }

    /// Create an index buffer in the data's own format.
    pub fn create_index_buffer(&self, label: &str, indices: &IndexData) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;

        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: indices.as_bytes(),
                usage: wgpu::BufferUsages::INDEX,
            })
    }
}

/// One star: its position, advanced once per instance.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct StarInstance {
    pub position: [f32; 3],
}

impl StarInstance {
    /// Instance-rate buffer layout.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StarInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Standard vertex format with position, normal, and UV coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPositionNormalUv {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl VertexPositionNormalUv {
    /// Get the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        use wgpu::{VertexAttribute, VertexFormat};

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexPositionNormalUv>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: (std::mem::size_of::<[f32; 3]>() * 2) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Interleave a sphere mesh into GPU vertices.
pub fn sphere_vertices(mesh: &SphereMesh) -> Vec<VertexPositionNormalUv> {
    mesh.positions
        .iter()
        .zip(&mesh.normals)
        .zip(&mesh.uvs)
        .map(|((position, normal), uv)| VertexPositionNormalUv {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: *uv,
        })
        .collect()
}

/// Convert star positions into GPU instances.
pub fn star_instances(positions: &[Vec3]) -> Vec<StarInstance> {
    positions
        .iter()
        .map(|p| StarInstance {
            position: p.to_array(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use globe_scene::generate_uv_sphere;

    #[test]
    fn test_index_data_u16_format() {
        let data = [0u16, 1, 2];
        let indices = IndexData::U16(&data);
        assert_eq!(indices.format(), wgpu::IndexFormat::Uint16);
        assert_eq!(indices.count(), 3);
        assert_eq!(indices.as_bytes().len(), 6);
    }

    #[test]
    fn test_index_data_u32_format() {
        let data = [0u32, 1, 2, 3];
        let indices = IndexData::U32(&data);
        assert_eq!(indices.format(), wgpu::IndexFormat::Uint32);
        assert_eq!(indices.count(), 4);
        assert_eq!(indices.as_bytes().len(), 16);
    }

    #[test]
    fn test_vertex_position_normal_uv_layout() {
        let layout = VertexPositionNormalUv::layout();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[2].offset, 24);
        assert_eq!(layout.attributes[2].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn test_star_instance_layout_steps_per_instance() {
        let layout = StarInstance::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(layout.attributes.len(), 1);
    }

    #[test]
    fn test_sphere_vertices_interleave_mesh() {
        let mesh = generate_uv_sphere(5.0, 8, 6);
        let vertices = sphere_vertices(&mesh);
        assert_eq!(vertices.len(), mesh.vertex_count());
        for (i, v) in vertices.iter().enumerate() {
            assert_eq!(v.position, mesh.positions[i].to_array());
            assert_eq!(v.normal, mesh.normals[i].to_array());
            assert_eq!(v.uv, mesh.uvs[i]);
        }
    }

    #[test]
    fn test_star_instances() {
        let stars = [Vec3::new(1.0, 2.0, -3.0), Vec3::new(-4.0, 5.0, -6.0)];
        let instances = star_instances(&stars);
        assert_eq!(
            instances,
            vec![
                StarInstance {
                    position: [1.0, 2.0, -3.0]
                },
                StarInstance {
                    position: [-4.0, 5.0, -6.0]
                },
            ]
        );
    }
}
