//! Pointer tracker.
//!
//! [`PointerState`] stores the latest cursor sample mapped to normalized axes:
//! `x` runs left to right over `[-1, 1]`, `y` runs bottom to top over `[-1, 1]`.
//! Samples are stored raw, without clamping or smoothing.

use glam::Vec2;
use tracing::trace;

/// Map a cursor position to normalized axes for a viewport of the given size.
///
/// `client_x`/`client_y` and the viewport size must use the same pixel unit.
/// Coordinates outside the viewport map outside `[-1, 1]`.
#[must_use]
pub fn normalize_pointer(client_x: f64, client_y: f64, width: f64, height: f64) -> Vec2 {
    let x = client_x / width * 2.0 - 1.0;
    let y = -(client_y / height * 2.0 - 1.0);
    Vec2::new(x as f32, y as f32)
}

/// Latest normalized pointer sample. Both axes start unset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    x: Option<f32>,
    y: Option<f32>,
}

impl PointerState {
    /// Creates a pointer state with no sample.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Event handlers ──────────────────────────────────────────────

    /// Process a pointer-move event in the viewport's pixel space.
    pub fn on_pointer_moved(&mut self, client_x: f64, client_y: f64, width: f64, height: f64) {
        let axes = normalize_pointer(client_x, client_y, width, height);
        self.x = Some(axes.x);
        self.y = Some(axes.y);
        trace!(x = axes.x, y = axes.y, "pointer sample");
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Normalized horizontal axis, if a sample was recorded.
    #[must_use]
    pub fn x(&self) -> Option<f32> {
        self.x
    }

    /// Normalized vertical axis, if a sample was recorded.
    #[must_use]
    pub fn y(&self) -> Option<f32> {
        self.y
    }

    /// Whether any sample has been recorded.
    #[must_use]
    pub fn has_sample(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// The sample to steer toward, if the pointer counts as engaged.
    ///
    /// A sample of exactly `(0, 0)` is treated the same as no sample at all.
    #[must_use]
    pub fn engaged_target(&self) -> Option<Vec2> {
        let x = self.x.unwrap_or(0.0);
        let y = self.y.unwrap_or(0.0);
        (x != 0.0 || y != 0.0).then(|| Vec2::new(x, y))
    }
}
