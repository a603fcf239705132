//! Variable-rate frame clock.
//!
//! Elapsed time is reported unclamped so time-driven motion stays locked to
//! the wall clock. The per-frame delta handed to smoothing filters is clamped,
//! so a stall (window drag, breakpoint) does not make a rotation jump.

use std::time::Instant;

use globe_scene::FrameTime;
use tracing::warn;

/// Largest delta reported for a single frame.
pub const MAX_FRAME_TIME: f64 = 0.25; // 250ms = 4 FPS minimum

/// Monotonic clock started when the animation loop starts.
pub struct FrameClock {
    start: Instant,
    last_elapsed: f64,
    frame_count: u64,
}

impl FrameClock {
    /// Start the clock now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Read the wall clock and advance one frame.
    pub fn tick(&mut self) -> FrameTime {
        let elapsed = self.start.elapsed().as_secs_f64();
        self.advance_to(elapsed)
    }

    /// Advance one frame to an explicit elapsed time in seconds.
    ///
    /// Time never runs backwards: an earlier `elapsed` yields a zero delta.
    pub fn advance_to(&mut self, elapsed: f64) -> FrameTime {
        let mut delta = (elapsed - self.last_elapsed).max(0.0);
        if delta > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                delta * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            delta = MAX_FRAME_TIME;
        }
        self.last_elapsed = self.last_elapsed.max(elapsed);
        self.frame_count += 1;

        FrameTime {
            elapsed: self.last_elapsed,
            delta,
        }
    }

    /// Seconds since the clock started, as of the last tick.
    pub fn elapsed(&self) -> f64 {
        self.last_elapsed
    }

    /// Number of frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
