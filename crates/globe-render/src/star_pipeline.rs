//! GPU pipeline for the star field.
//!
//! Each star is an instance expanded into a camera-facing square whose
//! on-screen size falls off with view depth: a star of size `s` spans
//! `s * buffer_height / 2 / depth` pixels, clamped to at least one pixel.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::buffer::StarInstance;
use crate::depth::DepthBuffer;
use crate::pipeline::uniform_entry;

/// WGSL source for the star shader.
pub const STAR_SHADER_SOURCE: &str = include_str!("shaders/stars.wgsl");

/// Smallest on-screen star, in drawing-buffer pixels.
pub const MIN_STAR_PIXELS: f32 = 1.0;

/// Star model matrix plus the size terms the vertex shader expands with.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct StarUniform {
    pub model: [[f32; 4]; 4],
    pub half_size: f32,
    pub half_pixel: f32,
    pub _padding: [f32; 2],
}

impl StarUniform {
    /// Size terms for stars of `point_size` seen through a vertical field of
    /// view `fov_y` (radians) on a drawing buffer `buffer_height` pixels tall.
    pub fn new(model: Mat4, point_size: f32, fov_y: f32, buffer_height: u32) -> Self {
        let tan_half_fov = (0.5 * fov_y).tan();
        Self {
            model: model.to_cols_array_2d(),
            half_size: 0.5 * point_size * tan_half_fov,
            half_pixel: MIN_STAR_PIXELS * tan_half_fov / buffer_height.max(1) as f32,
            _padding: [0.0; 2],
        }
    }

    /// View-space half extent the shader uses for a star at `view_depth`.
    pub fn half_extent_at(&self, view_depth: f32) -> f32 {
        self.half_size.max(view_depth * self.half_pixel)
    }
}

/// On-screen size in pixels of a star at `view_depth`, before the
/// one-pixel floor.
pub fn attenuated_point_size(point_size: f32, buffer_height: f32, view_depth: f32) -> f32 {
    point_size * buffer_height * 0.5 / view_depth
}

/// Depth-tested white squares, one instance per star.
pub struct StarPipeline {
    pub pipeline: wgpu::RenderPipeline,
    /// Group 1 layout: [`StarUniform`].
    pub star_bind_group_layout: wgpu::BindGroupLayout,
}

impl StarPipeline {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        sample_count: u32,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("star-shader"),
            source: wgpu::ShaderSource::Wgsl(STAR_SHADER_SOURCE.into()),
        });

        let star_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("star-bgl"),
                entries: &[uniform_entry::<StarUniform>(0, wgpu::ShaderStages::VERTEX)],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("star-pipeline-layout"),
            bind_group_layouts: &[camera_bind_group_layout, &star_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("star-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_stars"),
                buffers: &[StarInstance::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(DepthBuffer::stencil_state(true)),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                ..Default::default()
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_stars"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            star_bind_group_layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, CameraParams};
    use glam::Vec4;

    /// Pixels spanned vertically by a view-space extent of `2 * half` at `depth`.
    fn projected_pixels(camera: &Camera, half: f32, depth: f32, buffer_height: f32) -> f32 {
        let proj = camera.projection_matrix();
        let top = proj * Vec4::new(0.0, half, -depth, 1.0);
        let bottom = proj * Vec4::new(0.0, -half, -depth, 1.0);
        (top.y / top.w - bottom.y / bottom.w) * 0.5 * buffer_height
    }

    #[test]
    fn test_uniform_size() {
        assert_eq!(std::mem::size_of::<StarUniform>(), 80);
        assert_eq!(std::mem::size_of::<StarUniform>() % 16, 0);
    }

    #[test]
    fn test_attenuated_point_size() {
        assert!((attenuated_point_size(1.0, 600.0, 15.0) - 20.0).abs() < 1e-5);
        assert!((attenuated_point_size(1.0, 600.0, 100.0) - 3.0).abs() < 1e-5);
        assert!((attenuated_point_size(2.0, 1200.0, 100.0) - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_quad_projects_to_attenuated_size() {
        let camera = Camera::new(&CameraParams::default(), 800.0 / 600.0);
        let uniform = StarUniform::new(Mat4::IDENTITY, 1.0, camera.fov_y, 600);
        for depth in [15.0_f32, 50.0, 100.0, 250.0] {
            let pixels = projected_pixels(&camera, uniform.half_extent_at(depth), depth, 600.0);
            let expected = attenuated_point_size(1.0, 600.0, depth).max(MIN_STAR_PIXELS);
            assert!(
                (pixels - expected).abs() < 1e-3 * expected.max(1.0),
                "depth {depth}: {pixels} px, expected {expected}"
            );
        }
    }

    #[test]
    fn test_distant_star_clamped_to_one_pixel() {
        let camera = Camera::new(&CameraParams::default(), 800.0 / 600.0);
        let uniform = StarUniform::new(Mat4::IDENTITY, 1.0, camera.fov_y, 600);
        // 0.6 px unclamped.
        let pixels = projected_pixels(&camera, uniform.half_extent_at(500.0), 500.0, 600.0);
        assert!((pixels - MIN_STAR_PIXELS).abs() < 1e-3);
    }

    #[test]
    fn test_size_scales_with_buffer_height() {
        let camera = Camera::new(&CameraParams::default(), 1.0);
        let low = StarUniform::new(Mat4::IDENTITY, 1.0, camera.fov_y, 600);
        let high = StarUniform::new(Mat4::IDENTITY, 1.0, camera.fov_y, 1200);
        let at_low = projected_pixels(&camera, low.half_extent_at(30.0), 30.0, 600.0);
        let at_high = projected_pixels(&camera, high.half_extent_at(30.0), 30.0, 1200.0);
        assert!((at_high - 2.0 * at_low).abs() < 1e-3);
    }

    #[test]
    fn test_shader_expands_instances() {
        assert!(STAR_SHADER_SOURCE.contains("fn vs_stars"));
        assert!(STAR_SHADER_SOURCE.contains("fn fs_stars"));
        assert!(STAR_SHADER_SOURCE.contains("@builtin(vertex_index)"));
        assert!(STAR_SHADER_SOURCE.contains("max(stars.half_size, depth * stars.half_pixel)"));
    }

    #[test]
    fn test_stars_are_white() {
        assert!(STAR_SHADER_SOURCE.contains("vec4<f32>(1.0, 1.0, 1.0, 1.0)"));
    }
}
