//! Exponential approach toward a moving target.
//!
//! Each call to [`ExpSmoother::advance`] moves the value a frame-rate
//! independent fraction of the remaining distance. Retargeting mid-flight
//! continues from the current value, so the motion never jumps.

/// Fraction of the initial error left after `settle_time` seconds.
pub const SETTLE_FRACTION: f32 = 0.01;

/// Errors smaller than this snap to the target.
pub const SNAP_EPSILON: f32 = 1e-5;

/// A scalar that eases toward its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpSmoother {
    value: f32,
    target: f32,
    /// Decay rate in 1/s; infinite means "snap immediately".
    rate: f32,
}

impl ExpSmoother {
    /// Start at `initial` with no pending motion.
    ///
    /// A non-positive `settle_time` makes every advance snap to the target.
    pub fn new(initial: f32, settle_time: f32) -> Self {
        let rate = if settle_time > 0.0 {
            -SETTLE_FRACTION.ln() / settle_time
        } else {
            f32::INFINITY
        };
        Self {
            value: initial,
            target: initial,
            rate,
        }
    }

    /// Change the target without touching the current value.
    pub fn retarget(&mut self, target: f32) {
        self.target = target;
    }

    /// Step forward by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt <= 0.0 {
            return self.value;
        }
        let alpha = if self.rate.is_finite() {
            1.0 - (-self.rate * dt).exp()
        } else {
            1.0
        };
        self.value += (self.target - self.value) * alpha;
        if (self.target - self.value).abs() < SNAP_EPSILON {
            self.value = self.target;
        }
        self.value
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Value being approached.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// True once the value has reached the target.
    pub fn is_settled(&self) -> bool {
        self.value == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_settled() {
        let s = ExpSmoother::new(0.5, 2.0);
        assert!(s.is_settled());
        assert_eq!(s.value(), 0.5);
    }

    #[test]
    fn test_settles_to_one_percent_after_settle_time() {
        let mut s = ExpSmoother::new(0.0, 2.0);
        s.retarget(1.0);
        for _ in 0..120 {
            s.advance(1.0 / 60.0);
        }
        let remaining = (1.0 - s.value()).abs();
        assert!((remaining - 0.01).abs() < 1e-3, "remaining error {remaining}");
    }

    #[test]
    fn test_frame_rate_independent() {
        let mut fast = ExpSmoother::new(0.0, 2.0);
        let mut slow = ExpSmoother::new(0.0, 2.0);
        fast.retarget(1.0);
        slow.retarget(1.0);
        for _ in 0..120 {
            fast.advance(1.0 / 120.0);
        }
        for _ in 0..30 {
            slow.advance(1.0 / 30.0);
        }
        assert!((fast.value() - slow.value()).abs() < 1e-4);
    }

    #[test]
    fn test_monotonic_without_overshoot() {
        let mut s = ExpSmoother::new(0.0, 2.0);
        s.retarget(-0.3);
        let mut prev = s.value();
        for _ in 0..600 {
            let v = s.advance(1.0 / 60.0);
            assert!(v <= prev);
            assert!(v >= -0.3);
            prev = v;
        }
        assert!(s.is_settled());
    }

    #[test]
    fn test_retarget_continues_from_current_value() {
        let mut s = ExpSmoother::new(0.0, 2.0);
        s.retarget(1.0);
        s.advance(0.5);
        let mid = s.value();
        s.retarget(0.0);
        assert_eq!(s.value(), mid);
        let next = s.advance(1.0 / 60.0);
        assert!(next < mid && next > 0.0);
    }

    #[test]
    fn test_zero_settle_time_snaps() {
        let mut s = ExpSmoother::new(0.0, 0.0);
        s.retarget(0.7);
        assert_eq!(s.advance(1.0 / 60.0), 0.7);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut s = ExpSmoother::new(0.0, 2.0);
        s.retarget(1.0);
        assert_eq!(s.advance(0.0), 0.0);
    }
}
