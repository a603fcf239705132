//! wgpu rendering for the globe viewer: device and surface management, the
//! offscreen scene target, the globe/atmosphere/star pipelines, and the
//! [`RenderBackend`] seam the animation loop draws through.

pub mod atmosphere_pipeline;
pub mod buffer;
pub mod camera;
pub mod depth;
pub mod frame_target;
pub mod globe_pipeline;
pub mod gpu;
pub mod pass;
pub mod pipeline;
pub mod renderer;
pub mod star_pipeline;
pub mod texture;
pub mod viewport;

pub use atmosphere_pipeline::AtmospherePipeline;
pub use buffer::{
    BufferAllocator, IndexData, InstanceBuffer, MeshBuffer, StarInstance, VertexPositionNormalUv,
    sphere_vertices, star_instances,
};
pub use camera::{Camera, CameraParams};
pub use depth::DepthBuffer;
pub use frame_target::{BlitPipeline, FrameTarget};
pub use globe_pipeline::GlobePipeline;
pub use gpu::{
    RenderContext, RenderContextError, SurfaceError, init_render_context_blocking,
    select_surface_format,
};
pub use pass::{FrameEncoder, RenderPassBuilder, SPACE_BLACK};
pub use pipeline::{CameraUniform, ModelUniform};
pub use renderer::{GlobeRenderer, RenderBackend, RendererOptions, clear_color_from};
pub use star_pipeline::{MIN_STAR_PIXELS, StarPipeline, StarUniform, attenuated_point_size};
pub use texture::{
    GlobeTexture, TextureError, TextureImage, TextureUploader, check_dimensions,
    fitted_dimensions, mip_level_count,
};
pub use viewport::{DrawingBufferSize, ViewportState};
