//! Top-level application error.

use globe_config::ConfigError;
use globe_render::{RenderContextError, TextureError};

use crate::platform::PlatformError;

/// Anything that stops the viewer from starting or keeps it from running.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load globe texture: {0}")]
    Texture(#[from] TextureError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Gpu(#[from] RenderContextError),

    #[error("GPU out of memory")]
    OutOfMemory,
}
