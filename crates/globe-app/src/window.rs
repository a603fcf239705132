//! Window creation and event handling via winit.
//!
//! [`GlobeApp`] implements winit's [`ApplicationHandler`]: it creates the
//! window and renderer on resume, translates window events into
//! [`InputEvent`]s, and ticks the [`GlobeContext`] on every redraw.

use std::sync::Arc;

use globe_config::Config;
use globe_render::{
    GlobeRenderer, RendererOptions, SurfaceError, TextureImage, clear_color_from,
    init_render_context_blocking,
};
use tracing::{error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::context::{GlobeContext, InputEvent};
use crate::error::AppError;
use crate::frame_clock::FrameClock;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ))
}

/// Application state: the window, renderer, viewer state and frame clock.
pub struct GlobeApp {
    config: Config,
    window: Option<Arc<Window>>,
    renderer: Option<GlobeRenderer>,
    context: Option<GlobeContext>,
    clock: FrameClock,
    error: Option<AppError>,
}

impl GlobeApp {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            window: None,
            renderer: None,
            context: None,
            clock: FrameClock::new(),
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }

    /// Load the texture, then create the window, GPU context and renderer.
    ///
    /// The texture is read first so a missing file fails before any window
    /// appears.
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let texture = TextureImage::load(&self.config.globe.texture_path)?;
        info!(
            "Loaded globe texture {} ({}x{})",
            self.config.globe.texture_path.display(),
            texture.width(),
            texture.height()
        );

        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);
        let scale_factor = window.scale_factor();
        let context = GlobeContext::new(&self.config, scale_factor);

        let gpu = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let viewport = context.viewport();
        let renderer = GlobeRenderer::new(
            gpu,
            context.scene(),
            texture,
            RendererOptions {
                sample_count: self.config.render.sample_count(),
                clear_color: clear_color_from(self.config.render.clear_color),
                width: viewport.width(),
                height: viewport.height(),
                pixel_scale: viewport.pixel_scale(),
                star_size: self.config.stars.point_size,
            },
        )?;

        self.clock = FrameClock::new();
        window.request_redraw();

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.context = Some(context);
        Ok(())
    }

    /// Reconfigure the surface and feed the new logical size to the context.
    fn apply_resize(&mut self, physical: PhysicalSize<u32>, scale_factor: f64) {
        let (Some(renderer), Some(context)) = (&mut self.renderer, &mut self.context) else {
            return;
        };
        renderer.configure_surface(physical.width, physical.height);

        let logical = physical.to_logical::<f64>(scale_factor);
        context.handle_event(
            InputEvent::Resized {
                width: logical.width,
                height: logical.height,
                scale_factor,
            },
            renderer,
        );
        info!(
            "Window resized to {}x{} (scale: {:.2})",
            physical.width, physical.height, scale_factor
        );
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(renderer), Some(context)) =
            (&self.window, &mut self.renderer, &mut self.context)
        else {
            return;
        };

        let time = self.clock.tick();
        match context.tick(time, renderer) {
            Ok(()) => {}
            Err(SurfaceError::Lost) => {
                let size = window.inner_size();
                renderer.configure_surface(size.width, size.height);
            }
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                self.error = Some(AppError::OutOfMemory);
                event_loop.exit();
                return;
            }
            Err(SurfaceError::Timeout) => {
                warn!("Surface timeout, skipping frame");
            }
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for GlobeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            error!("Startup failed: {e}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let scale_factor = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                self.apply_resize(new_size, scale_factor);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    let new_inner = window.inner_size();
                    self.apply_resize(new_inner, scale_factor);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (Some(window), Some(renderer), Some(context)) =
                    (&self.window, &mut self.renderer, &mut self.context)
                else {
                    return;
                };
                let logical = position.to_logical::<f64>(window.scale_factor());
                context.handle_event(
                    InputEvent::PointerMoved {
                        x: logical.x,
                        y: logical.y,
                    },
                    renderer,
                );
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Create an event loop and run the viewer until the window closes.
///
/// Returns the error that stopped the loop, if any.
#[instrument(skip(config))]
pub fn run(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = GlobeApp::new(config);
    event_loop.run_app(&mut app)?;
    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
