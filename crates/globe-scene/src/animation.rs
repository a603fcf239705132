//! Per-frame transform update policy.

use glam::{Vec2, Vec3};

use crate::graph::GlobeScene;
use crate::smoothing::ExpSmoother;

/// Clock reading handed to [`Animator::update`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the loop started.
    pub elapsed: f64,
    /// Seconds since the previous tick.
    pub delta: f64,
}

/// Rates and gains of the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Globe spin, radians per second.
    pub spin_rate: f32,
    /// Group yaw per unit of horizontal pointer offset.
    pub yaw_gain: f32,
    /// Group pitch per unit of vertical pointer offset.
    pub pitch_gain: f32,
    /// Seconds for a rotation change to settle.
    pub ease_duration: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            spin_rate: 0.1,
            yaw_gain: 0.4,
            pitch_gain: 0.2,
            ease_duration: 2.0,
        }
    }
}

/// Owns the eased group rotation and writes all animated transforms.
#[derive(Debug, Clone)]
pub struct Animator {
    params: MotionParams,
    yaw: ExpSmoother,
    pitch: ExpSmoother,
}

impl Animator {
    pub fn new(params: MotionParams) -> Self {
        Self {
            params,
            yaw: ExpSmoother::new(0.0, params.ease_duration),
            pitch: ExpSmoother::new(0.0, params.ease_duration),
        }
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    /// Group rotation the easing is heading for, as (pitch, yaw).
    pub fn rotation_target(&self) -> Vec2 {
        Vec2::new(self.pitch.target(), self.yaw.target())
    }

    /// Advance one frame.
    ///
    /// `pointer` is the engaged pointer sample in normalized coordinates, or
    /// `None` before the first usable sample. Without a sample the group keeps
    /// easing toward its last target.
    pub fn update(&mut self, scene: &mut GlobeScene, time: FrameTime, pointer: Option<Vec2>) {
        let spin = (time.elapsed * f64::from(self.params.spin_rate)) as f32;
        scene.set_globe_spin(spin);

        if let Some(p) = pointer {
            self.yaw.retarget(p.x * self.params.yaw_gain);
            self.pitch.retarget(p.y * self.params.pitch_gain);
        }
        let dt = time.delta as f32;
        let yaw = self.yaw.advance(dt);
        let pitch = self.pitch.advance(dt);
        scene.set_group_rotation(Vec3::new(pitch, yaw, 0.0));

        let sway = time.elapsed.cos() as f32;
        scene.set_star_offset(Vec3::splat(sway));
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(MotionParams::default())
    }
}
