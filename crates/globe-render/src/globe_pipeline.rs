//! GPU pipeline for the textured globe sphere.

use crate::buffer::VertexPositionNormalUv;
use crate::depth::DepthBuffer;
use crate::pipeline::{ModelUniform, uniform_entry};
use crate::texture::GlobeTexture;

/// WGSL source for the globe shader.
pub const GLOBE_SHADER_SOURCE: &str = include_str!("shaders/globe.wgsl");

/// Opaque, back-face culled, depth-writing sphere pipeline.
pub struct GlobePipeline {
    /// The wgpu render pipeline.
    pub pipeline: wgpu::RenderPipeline,
    /// Group 1 layout: model uniform + surface texture + sampler.
    pub globe_bind_group_layout: wgpu::BindGroupLayout,
}

impl GlobePipeline {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        sample_count: u32,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe-shader"),
            source: wgpu::ShaderSource::Wgsl(GLOBE_SHADER_SOURCE.into()),
        });

        let globe_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("globe-bgl"),
                entries: &[
                    uniform_entry::<ModelUniform>(0, wgpu::ShaderStages::VERTEX),
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("globe-pipeline-layout"),
            bind_group_layouts: &[camera_bind_group_layout, &globe_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("globe-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_globe"),
                buffers: &[VertexPositionNormalUv::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(DepthBuffer::stencil_state(true)),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                ..Default::default()
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_globe"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: None, // opaque
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            globe_bind_group_layout,
        }
    }

    /// Bind group for the globe's model uniform and surface texture.
    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        model_buffer: &wgpu::Buffer,
        texture: &GlobeTexture,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globe-bg"),
            layout: &self.globe_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: model_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_declares_entry_points() {
        assert!(GLOBE_SHADER_SOURCE.contains("fn vs_globe"));
        assert!(GLOBE_SHADER_SOURCE.contains("fn fs_globe"));
    }

    #[test]
    fn test_shader_rim_terms() {
        assert!(GLOBE_SHADER_SOURCE.contains("1.05 - dot(n, vec3<f32>(0.0, 0.0, 1.0))"));
        assert!(GLOBE_SHADER_SOURCE.contains("pow(intensity, 1.5)"));
        assert!(GLOBE_SHADER_SOURCE.contains("vec3<f32>(0.3, 0.6, 1.0)"));
    }

    #[test]
    fn test_bindings_match_layout() {
        assert!(GLOBE_SHADER_SOURCE.contains("@group(1) @binding(0) var<uniform> model_uniform"));
        assert!(GLOBE_SHADER_SOURCE.contains("@group(1) @binding(1) var globe_texture"));
        assert!(GLOBE_SHADER_SOURCE.contains("@group(1) @binding(2) var globe_sampler"));
    }
}
