//! The renderer binding: draws a [`GlobeScene`] through wgpu.
//!
//! The animation loop talks to the renderer only through [`RenderBackend`],
//! so the loop can run against a recording backend in tests.

use bytemuck::Pod;
use globe_scene::GlobeScene;

use crate::atmosphere_pipeline::AtmospherePipeline;
use crate::buffer::{
    BufferAllocator, IndexData, InstanceBuffer, MeshBuffer, sphere_vertices, star_instances,
};
use crate::camera::Camera;
use crate::depth::DepthBuffer;
use crate::frame_target::{BlitPipeline, FrameTarget, scene_format_for};
use crate::globe_pipeline::GlobePipeline;
use crate::gpu::{RenderContext, SurfaceError};
use crate::pass::{FrameEncoder, RenderPassBuilder, SPACE_BLACK};
use crate::pipeline::{
    CameraUniform, ModelUniform, camera_bind_group_layout, create_uniform_buffer,
    single_buffer_bind_group,
};
use crate::star_pipeline::{StarPipeline, StarUniform};
use crate::texture::{TextureError, TextureImage, TextureUploader};
use crate::viewport::scaled_dimension;

/// What the animation loop needs from a renderer.
pub trait RenderBackend {
    /// Set the logical drawing size.
    fn set_size(&mut self, width: f64, height: f64);

    /// Set device pixels per logical pixel for the drawing buffer.
    fn set_pixel_scale(&mut self, ratio: f64);

    /// Draw one frame of `scene` as seen by `camera`.
    fn render(&mut self, scene: &GlobeScene, camera: &Camera) -> Result<(), SurfaceError>;
}

/// Construction options for [`GlobeRenderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererOptions {
    /// 4 for antialiasing, 1 for none.
    pub sample_count: u32,
    pub clear_color: wgpu::Color,
    /// Initial logical size.
    pub width: f64,
    pub height: f64,
    /// Initial pixel scale.
    pub pixel_scale: f64,
    /// Star size in world units; on screen it shrinks with distance.
    pub star_size: f32,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            sample_count: 4,
            clear_color: SPACE_BLACK,
            width: 1280.0,
            height: 720.0,
            pixel_scale: 1.0,
            star_size: 1.0,
        }
    }
}

/// Uniform buffer and bind group for one scene node.
struct NodeBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// wgpu implementation of [`RenderBackend`].
pub struct GlobeRenderer {
    context: RenderContext,
    clear_color: wgpu::Color,

    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    globe_pipeline: GlobePipeline,
    atmosphere_pipeline: AtmospherePipeline,
    star_pipeline: StarPipeline,
    globe: NodeBinding,
    atmosphere: NodeBinding,
    stars: NodeBinding,
    sphere_mesh: MeshBuffer,
    star_instances: InstanceBuffer,

    frame_target: FrameTarget,
    blit: BlitPipeline,
    blit_bind_group: wgpu::BindGroup,

    width: f64,
    height: f64,
    pixel_scale: f64,
    star_size: f32,
    target_dirty: bool,
}

impl GlobeRenderer {
    /// Build all GPU resources for `scene`, uploading `texture` onto the globe.
    ///
    /// A texture larger than the device can sample is downscaled to fit.
    pub fn new(
        context: RenderContext,
        scene: &GlobeScene,
        texture: TextureImage,
        options: RendererOptions,
    ) -> Result<Self, TextureError> {
        let device = &context.device;
        let color_format = scene_format_for(context.surface_format);
        let sample_count = options.sample_count.max(1);

        let camera_layout = camera_bind_group_layout(device);
        let camera_buffer = create_uniform_buffer(
            device,
            "camera-uniform",
            &CameraUniform {
                view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
                view: glam::Mat4::IDENTITY.to_cols_array_2d(),
            },
        );
        let camera_bind_group =
            single_buffer_bind_group(device, "camera-bg", &camera_layout, &camera_buffer);

        let globe_pipeline = GlobePipeline::new(device, color_format, sample_count, &camera_layout);
        let atmosphere_pipeline =
            AtmospherePipeline::new(device, color_format, sample_count, &camera_layout);
        let star_pipeline = StarPipeline::new(device, color_format, sample_count, &camera_layout);

        let uploader = TextureUploader::new(device);
        let texture = texture.fit_within(device.limits().max_texture_dimension_2d)?;
        let globe_texture = uploader.upload(device, &context.queue, "globe-texture", &texture)?;

        let globe_buffer =
            create_uniform_buffer(device, "globe-model", &ModelUniform::new(scene.globe_world()));
        let globe = NodeBinding {
            bind_group: globe_pipeline.bind_group(device, &globe_buffer, &globe_texture),
            buffer: globe_buffer,
        };
        let atmosphere = node_binding(
            device,
            "atmosphere",
            &atmosphere_pipeline.model_bind_group_layout,
            ModelUniform::new(scene.atmosphere_world()),
        );
        let stars = node_binding(
            device,
            "stars",
            &star_pipeline.star_bind_group_layout,
            StarUniform::new(
                scene.stars_world(),
                options.star_size,
                Camera::default().fov_y,
                scaled_dimension(options.height, options.pixel_scale),
            ),
        );

        let allocator = BufferAllocator::new(device);
        let sphere = scene.sphere();
        let sphere_mesh = allocator.create_mesh(
            "sphere",
            bytemuck::cast_slice(&sphere_vertices(sphere)),
            IndexData::U32(&sphere.indices),
        );
        let star_instances =
            allocator.create_instances("stars", &star_instances(scene.star_positions()));

        let frame_target = FrameTarget::new(
            device,
            scaled_dimension(options.width, options.pixel_scale),
            scaled_dimension(options.height, options.pixel_scale),
            color_format,
            sample_count,
        );
        let blit = BlitPipeline::new(device, context.surface_format);
        let blit_bind_group = blit.bind_group(device, &frame_target);

        log::info!(
            "Globe renderer ready: {} sphere indices, {} stars, {}x MSAA, scene {:?}",
            sphere_mesh.index_count,
            star_instances.instance_count,
            sample_count,
            frame_target.size()
        );

        Ok(Self {
            context,
            clear_color: options.clear_color,
            camera_buffer,
            camera_bind_group,
            globe_pipeline,
            atmosphere_pipeline,
            star_pipeline,
            globe,
            atmosphere,
            stars,
            sphere_mesh,
            star_instances,
            frame_target,
            blit,
            blit_bind_group,
            width: options.width,
            height: options.height,
            pixel_scale: options.pixel_scale,
            star_size: options.star_size,
            target_dirty: false,
        })
    }

    /// Reconfigure the window surface to its physical size.
    pub fn configure_surface(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Drawing buffer size the next frame renders at.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        (
            scaled_dimension(self.width, self.pixel_scale),
            scaled_dimension(self.height, self.pixel_scale),
        )
    }

    fn sync_frame_target(&mut self) {
        if !self.target_dirty {
            return;
        }
        self.target_dirty = false;
        let (width, height) = self.drawing_buffer_size();
        if self.frame_target.resize(&self.context.device, width, height) {
            self.blit_bind_group = self.blit.bind_group(&self.context.device, &self.frame_target);
            log::debug!("Scene target resized to {width}x{height}");
        }
    }

    fn upload_uniforms(&self, scene: &GlobeScene, camera: &Camera) {
        let queue = &self.context.queue;
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&camera.to_uniform()));
        for (binding, world) in [
            (&self.globe, scene.globe_world()),
            (&self.atmosphere, scene.atmosphere_world()),
        ] {
            queue.write_buffer(&binding.buffer, 0, bytemuck::bytes_of(&ModelUniform::new(world)));
        }
        let stars = StarUniform::new(
            scene.stars_world(),
            self.star_size,
            camera.fov_y,
            self.drawing_buffer_size().1,
        );
        queue.write_buffer(&self.stars.buffer, 0, bytemuck::bytes_of(&stars));
    }
}

impl RenderBackend for GlobeRenderer {
    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.target_dirty = true;
    }

    fn set_pixel_scale(&mut self, ratio: f64) {
        self.pixel_scale = ratio;
        self.target_dirty = true;
    }

    fn render(&mut self, scene: &GlobeScene, camera: &Camera) -> Result<(), SurfaceError> {
        self.sync_frame_target();
        self.upload_uniforms(scene, camera);

        let surface_texture = self.context.get_current_texture()?;
        let mut frame = FrameEncoder::new(&self.context.device, surface_texture);

        {
            let (color_view, resolve_view) = self.frame_target.color_attachment();
            let builder = RenderPassBuilder::new()
                .clear_color(self.clear_color)
                .depth(&self.frame_target.depth.view, DepthBuffer::CLEAR_VALUE)
                .msaa_resolve(resolve_view)
                .label("scene-pass");
            let mut pass = builder.begin(frame.encoder(), color_view);

            pass.set_bind_group(0, &self.camera_bind_group, &[]);

            pass.set_pipeline(&self.globe_pipeline.pipeline);
            pass.set_bind_group(1, &self.globe.bind_group, &[]);
            self.sphere_mesh.bind(&mut pass);
            self.sphere_mesh.draw(&mut pass);

            pass.set_pipeline(&self.star_pipeline.pipeline);
            pass.set_bind_group(1, &self.stars.bind_group, &[]);
            self.star_instances.draw(&mut pass);

            // Additive and depth-read-only, so it goes last.
            pass.set_pipeline(&self.atmosphere_pipeline.pipeline);
            pass.set_bind_group(1, &self.atmosphere.bind_group, &[]);
            self.sphere_mesh.bind(&mut pass);
            self.sphere_mesh.draw(&mut pass);
        }

        {
            let (encoder, surface_view) = frame.surface_pass_parts();
            let mut pass = RenderPassBuilder::new()
                .label("blit-pass")
                .begin(encoder, surface_view);
            self.blit.draw(&mut pass, &self.blit_bind_group);
        }

        frame.submit(&self.context.queue);
        Ok(())
    }
}

fn node_binding<T: Pod>(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    initial: T,
) -> NodeBinding {
    let buffer = create_uniform_buffer(device, &format!("{label}-model"), &initial);
    NodeBinding {
        bind_group: single_buffer_bind_group(device, &format!("{label}-bg"), layout, &buffer),
        buffer,
    }
}

/// Convert a config RGBA quadruple into a wgpu clear color.
pub fn clear_color_from(rgba: [f64; 4]) -> wgpu::Color {
    wgpu::Color {
        r: rgba[0],
        g: rgba[1],
        b: rgba[2],
        a: rgba[3],
    }
}
