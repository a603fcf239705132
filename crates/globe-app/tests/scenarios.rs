//! End-to-end behavior of the animation loop against a recording backend.

use globe_app::{FrameClock, GlobeContext, InputEvent};
use globe_config::Config;
use globe_render::{Camera, RenderBackend, SurfaceError};
use globe_scene::{FrameTime, GlobeScene};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SetSize(f64, f64),
    SetPixelScale(f64),
    Render { spin: f32, group: glam::Vec3, stars: glam::Vec3, aspect: f32 },
}

#[derive(Default)]
struct RecordingBackend {
    calls: Vec<Call>,
    time_out: bool,
}

impl RecordingBackend {
    fn renders(&self) -> impl Iterator<Item = &Call> {
        self.calls.iter().filter(|c| matches!(c, Call::Render { .. }))
    }
}

impl RenderBackend for RecordingBackend {
    fn set_size(&mut self, width: f64, height: f64) {
        self.calls.push(Call::SetSize(width, height));
    }

    fn set_pixel_scale(&mut self, ratio: f64) {
        self.calls.push(Call::SetPixelScale(ratio));
    }

    fn render(&mut self, scene: &GlobeScene, camera: &Camera) -> Result<(), SurfaceError> {
        if self.time_out {
            return Err(SurfaceError::Timeout);
        }
        self.calls.push(Call::Render {
            spin: scene.globe_spin(),
            group: scene.group_rotation(),
            stars: scene.star_offset(),
            aspect: camera.aspect_ratio,
        });
        Ok(())
    }
}

fn config_800x600() -> Config {
    let mut config = Config::default();
    config.window.width = 800;
    config.window.height = 600;
    config.stars.count = 64;
    config
}

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn test_scenario_ten_seconds_without_pointer() {
    let mut context = GlobeContext::new(&config_800x600(), 1.0);
    let mut backend = RecordingBackend::default();
    let mut clock = FrameClock::new();

    clock.advance_to(10.0 - 1.0 / 60.0);
    context.tick(clock.advance_to(10.0), &mut backend).unwrap();

    let scene = context.scene();
    assert!(approx(scene.globe_spin(), 1.0, 1e-5));
    assert_eq!(scene.group_rotation(), glam::Vec3::ZERO);
    let stars = scene.star_offset();
    for axis in stars.to_array() {
        assert!(approx(axis, -0.839, 1e-3), "star axis {axis}");
    }

    // The frame was rendered from the updated transforms.
    let Some(Call::Render { spin, stars: rendered, .. }) = backend.calls.last() else {
        panic!("no frame rendered");
    };
    assert_eq!(*spin, scene.globe_spin());
    assert_eq!(*rendered, stars);
}

#[test]
fn test_scenario_pointer_converges_at_60hz() {
    let mut context = GlobeContext::new(&config_800x600(), 1.0);
    let mut backend = RecordingBackend::default();
    let mut clock = FrameClock::new();

    // (600, 450) in an 800x600 viewport is normalized (0.5, -0.5).
    context.handle_event(InputEvent::PointerMoved { x: 600.0, y: 450.0 }, &mut backend);

    let frames = (2.5 * 60.0) as usize;
    for i in 1..=frames {
        context
            .tick(clock.advance_to(i as f64 / 60.0), &mut backend)
            .unwrap();
    }

    let group = context.scene().group_rotation();
    assert!(approx(group.y, 0.2, 2e-3), "yaw {}", group.y);
    assert!(approx(group.x, -0.1, 2e-3), "pitch {}", group.x);
    assert_eq!(group.z, 0.0);
    assert_eq!(backend.renders().count(), frames);
}

#[test]
fn test_rotation_never_overshoots() {
    let mut context = GlobeContext::new(&config_800x600(), 1.0);
    let mut backend = RecordingBackend::default();
    let mut clock = FrameClock::new();

    context.handle_event(InputEvent::PointerMoved { x: 800.0, y: 0.0 }, &mut backend);
    for i in 1..=600 {
        context
            .tick(clock.advance_to(i as f64 / 60.0), &mut backend)
            .unwrap();
    }

    let mut last_yaw = 0.0;
    for call in backend.renders() {
        if let Call::Render { group, .. } = call {
            assert!(group.y <= 0.4 + 1e-6);
            assert!(group.x <= 0.2 + 1e-6);
            assert!(group.y >= last_yaw);
            last_yaw = group.y;
        }
    }
}

#[test]
fn test_group_still_before_pointer_moves() {
    let mut context = GlobeContext::new(&config_800x600(), 1.0);
    let mut backend = RecordingBackend::default();
    let mut clock = FrameClock::new();

    for i in 1..=120 {
        context
            .tick(clock.advance_to(i as f64 / 60.0), &mut backend)
            .unwrap();
    }
    assert!(
        backend
            .renders()
            .all(|c| matches!(c, Call::Render { group, .. } if *group == glam::Vec3::ZERO))
    );
}

#[test]
fn test_pointer_at_center_counts_as_unset() {
    let mut context = GlobeContext::new(&config_800x600(), 1.0);
    let mut backend = RecordingBackend::default();

    context.handle_event(InputEvent::PointerMoved { x: 400.0, y: 300.0 }, &mut backend);
    assert!(context.pointer().has_sample());
    assert!(context.pointer().engaged_target().is_none());
}

#[test]
fn test_spin_and_stars_follow_elapsed_time() {
    let mut context = GlobeContext::new(&config_800x600(), 1.0);
    let mut backend = RecordingBackend::default();
    let mut clock = FrameClock::new();

    for t in [0.5_f64, 1.0, 2.0, 3.14159, 7.25] {
        context.tick(clock.advance_to(t), &mut backend).unwrap();
        let scene = context.scene();
        assert!(approx(scene.globe_spin(), (0.1 * t) as f32, 1e-5));
        assert!(approx(scene.star_offset().x, t.cos() as f32, 1e-5));
        assert_eq!(scene.star_offset().x, scene.star_offset().z);
    }
}

#[test]
fn test_resize_updates_camera_and_renderer() {
    let cases = [
        (1024.0, 768.0, 1.0, 1.0),
        (1920.0, 1080.0, 1.5, 1.5),
        (2560.0, 1440.0, 3.0, 2.0),
        (500.0, 1000.0, 2.0, 2.0),
    ];
    for (width, height, scale, expected_scale) in cases {
        let mut context = GlobeContext::new(&config_800x600(), 1.0);
        let mut backend = RecordingBackend::default();
        context.handle_event(
            InputEvent::Resized {
                width,
                height,
                scale_factor: scale,
            },
            &mut backend,
        );
        assert_eq!(
            backend.calls,
            vec![
                Call::SetSize(width, height),
                Call::SetPixelScale(expected_scale)
            ]
        );

        context
            .tick(FrameTime { elapsed: 0.0, delta: 0.0 }, &mut backend)
            .unwrap();
        let Some(Call::Render { aspect, .. }) = backend.calls.last() else {
            panic!("no frame rendered");
        };
        assert!(approx(*aspect, (width / height) as f32, 1e-5));
    }
}

#[test]
fn test_pointer_after_resize_uses_new_size() {
    let mut context = GlobeContext::new(&config_800x600(), 1.0);
    let mut backend = RecordingBackend::default();
    context.handle_event(
        InputEvent::Resized {
            width: 1600.0,
            height: 1200.0,
            scale_factor: 1.0,
        },
        &mut backend,
    );
    context.handle_event(InputEvent::PointerMoved { x: 1200.0, y: 900.0 }, &mut backend);
    assert_eq!(context.pointer().x(), Some(0.5));
    assert_eq!(context.pointer().y(), Some(-0.5));
}

#[test]
fn test_surface_error_propagates_from_tick() {
    let mut context = GlobeContext::new(&config_800x600(), 1.0);
    let mut backend = RecordingBackend {
        time_out: true,
        ..RecordingBackend::default()
    };
    let result = context.tick(FrameTime { elapsed: 1.0, delta: 0.016 }, &mut backend);
    assert!(matches!(result, Err(SurfaceError::Timeout)));
    // The animation still advanced.
    assert!(approx(context.scene().globe_spin(), 0.1, 1e-6));
}

#[test]
fn test_context_from_persisted_config() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = config_800x600();
    config.stars.count = 10;
    config.motion.spin_rate = 0.5;
    config.save(tmp.path()).unwrap();

    let loaded = Config::load_or_create(tmp.path()).unwrap();
    let mut context = GlobeContext::new(&loaded, 1.0);
    let mut backend = RecordingBackend::default();
    context
        .tick(FrameTime { elapsed: 2.0, delta: 0.016 }, &mut backend)
        .unwrap();

    assert_eq!(context.scene().star_positions().len(), 10);
    assert!(approx(context.scene().globe_spin(), 1.0, 1e-6));
}
