//! Mutable viewer state and the handlers that drive it.
//!
//! [`GlobeContext`] owns the viewport, pointer, camera, scene and animator.
//! Host events arrive as [`InputEvent`]s, frames as [`GlobeContext::tick`];
//! both reach the renderer only through [`RenderBackend`].

use globe_config::Config;
use globe_input::PointerState;
use globe_render::{Camera, CameraParams, RenderBackend, SurfaceError, ViewportState};
use globe_scene::{Animator, FrameTime, GlobeScene, MotionParams, SceneParams, StarFieldParams};
use tracing::debug;

/// Host events the viewer reacts to, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The window's inner size or scale factor changed.
    Resized {
        width: f64,
        height: f64,
        scale_factor: f64,
    },
    /// The cursor moved over the window.
    PointerMoved { x: f64, y: f64 },
}

/// All state read or written by the animation loop.
pub struct GlobeContext {
    viewport: ViewportState,
    pointer: PointerState,
    camera: Camera,
    scene: GlobeScene,
    animator: Animator,
}

impl GlobeContext {
    /// Build the viewer state from configuration.
    ///
    /// The initial viewport is the configured window size, not the size the
    /// window manager eventually grants; the first resize event corrects it.
    pub fn new(config: &Config, scale_factor: f64) -> Self {
        let viewport = ViewportState::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
            scale_factor,
            config.render.max_pixel_ratio,
        );
        let mut camera = Camera::new(
            &camera_params(config),
            viewport.aspect_ratio() as f32,
        );
        camera.update_projection_matrix();

        let scene = GlobeScene::build(&scene_params(config));
        debug!(
            vertices = scene.sphere().vertex_count(),
            stars = scene.star_positions().len(),
            "Scene built"
        );

        Self {
            viewport,
            pointer: PointerState::new(),
            camera,
            scene,
            animator: Animator::new(motion_params(config)),
        }
    }

    /// Apply one host event.
    pub fn handle_event(&mut self, event: InputEvent, backend: &mut impl RenderBackend) {
        match event {
            InputEvent::Resized {
                width,
                height,
                scale_factor,
            } => {
                self.viewport.handle_resize(width, height, scale_factor);
                self.camera.set_aspect_ratio(
                    self.viewport.width() as f32,
                    self.viewport.height() as f32,
                );
                self.camera.update_projection_matrix();
                backend.set_size(self.viewport.width(), self.viewport.height());
                backend.set_pixel_scale(self.viewport.pixel_scale());
            }
            InputEvent::PointerMoved { x, y } => {
                self.pointer.on_pointer_moved(
                    x,
                    y,
                    self.viewport.width(),
                    self.viewport.height(),
                );
            }
        }
    }

    /// Advance the animation to `time` and submit one frame.
    pub fn tick(
        &mut self,
        time: FrameTime,
        backend: &mut impl RenderBackend,
    ) -> Result<(), SurfaceError> {
        self.animator
            .update(&mut self.scene, time, self.pointer.engaged_target());
        backend.render(&self.scene, &self.camera)
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &GlobeScene {
        &self.scene
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }
}

fn camera_params(config: &Config) -> CameraParams {
    CameraParams {
        fov_y_degrees: config.camera.fov_degrees,
        near: config.camera.near,
        far: config.camera.far,
        distance: config.camera.distance,
    }
}

fn scene_params(config: &Config) -> SceneParams {
    SceneParams {
        radius: config.globe.radius,
        width_segments: config.globe.width_segments,
        height_segments: config.globe.height_segments,
        atmosphere_scale: config.globe.atmosphere_scale,
        stars: StarFieldParams {
            count: config.stars.count,
            half_extent: config.stars.half_extent,
            depth: config.stars.depth,
            seed: config.stars.seed,
        },
    }
}

fn motion_params(config: &Config) -> MotionParams {
    MotionParams {
        spin_rate: config.motion.spin_rate,
        yaw_gain: config.motion.yaw_gain,
        pitch_gain: config.motion.pitch_gain,
        ease_duration: config.motion.ease_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct NullBackend {
        size: Option<(f64, f64)>,
        pixel_scale: Option<f64>,
        frames: usize,
    }

    impl RenderBackend for NullBackend {
        fn set_size(&mut self, width: f64, height: f64) {
            self.size = Some((width, height));
        }

        fn set_pixel_scale(&mut self, ratio: f64) {
            self.pixel_scale = Some(ratio);
        }

        fn render(&mut self, _scene: &GlobeScene, _camera: &Camera) -> Result<(), SurfaceError> {
            self.frames += 1;
            Ok(())
        }
    }

    fn small_config() -> Config {
        let mut config = Config::default();
        config.window.width = 800;
        config.window.height = 600;
        config.globe.width_segments = 8;
        config.globe.height_segments = 6;
        config.stars.count = 16;
        config
    }

    #[test]
    fn test_initial_viewport_from_configured_size() {
        let context = GlobeContext::new(&small_config(), 3.0);
        assert_eq!(context.viewport().width(), 800.0);
        assert_eq!(context.viewport().height(), 600.0);
        assert_eq!(context.viewport().pixel_scale(), 2.0);
        assert!((context.camera().aspect_ratio - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_scene_follows_config() {
        let context = GlobeContext::new(&small_config(), 1.0);
        assert_eq!(context.scene().star_positions().len(), 16);
        assert_eq!(context.scene().sphere().vertex_count(), 9 * 7);
    }

    #[test]
    fn test_pointer_normalized_against_viewport() {
        let mut context = GlobeContext::new(&small_config(), 1.0);
        let mut backend = NullBackend::default();
        context.handle_event(InputEvent::PointerMoved { x: 600.0, y: 150.0 }, &mut backend);
        assert_eq!(context.pointer().x(), Some(0.5));
        assert_eq!(context.pointer().y(), Some(0.5));
        assert!(backend.size.is_none());
    }

    #[test]
    fn test_resize_reaches_camera_and_backend() {
        let mut context = GlobeContext::new(&small_config(), 1.0);
        let mut backend = NullBackend::default();
        context.handle_event(
            InputEvent::Resized {
                width: 1000.0,
                height: 500.0,
                scale_factor: 1.25,
            },
            &mut backend,
        );
        assert_eq!(backend.size, Some((1000.0, 500.0)));
        assert_eq!(backend.pixel_scale, Some(1.25));
        assert!((context.camera().aspect_ratio - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_tick_renders_once() {
        let mut context = GlobeContext::new(&small_config(), 1.0);
        let mut backend = NullBackend::default();
        context
            .tick(
                FrameTime {
                    elapsed: 1.0,
                    delta: 1.0 / 60.0,
                },
                &mut backend,
            )
            .unwrap();
        assert_eq!(backend.frames, 1);
        assert!((context.scene().globe_spin() - 0.1).abs() < 1e-6);
    }
}
