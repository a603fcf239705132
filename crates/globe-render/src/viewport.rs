//! Logical viewport size and the pixel scale applied to the drawing buffer.
//!
//! The viewport is tracked in logical pixels, the unit pointer coordinates
//! arrive in. The drawing buffer (what the scene is rendered into) is the
//! logical size times a pixel scale that follows the window's scale factor
//! but is capped, so high-density displays do not render at full density.

/// Smallest logical dimension kept; minimized windows report zero.
pub const MIN_VIEWPORT_DIMENSION: f64 = 1.0;

/// Drawing buffer dimensions in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawingBufferSize {
    pub width: u32,
    pub height: u32,
}

/// Current viewport size and pixel scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    width: f64,
    height: f64,
    pixel_scale: f64,
    max_pixel_ratio: f64,
}

impl ViewportState {
    /// Create from the initial logical size and the window's scale factor.
    pub fn new(width: f64, height: f64, scale_factor: f64, max_pixel_ratio: f64) -> Self {
        let max_pixel_ratio = if max_pixel_ratio.is_finite() {
            max_pixel_ratio.max(1.0)
        } else {
            1.0
        };
        Self {
            width: clamp_dimension(width),
            height: clamp_dimension(height),
            pixel_scale: pixel_scale_for(scale_factor, max_pixel_ratio),
            max_pixel_ratio,
        }
    }

    /// Apply a resize: new logical size and scale factor.
    pub fn handle_resize(&mut self, width: f64, height: f64, scale_factor: f64) {
        self.width = clamp_dimension(width);
        self.height = clamp_dimension(height);
        self.pixel_scale = pixel_scale_for(scale_factor, self.max_pixel_ratio);
    }

    /// Logical width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Logical height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Device pixels per logical pixel used for the drawing buffer.
    pub fn pixel_scale(&self) -> f64 {
        self.pixel_scale
    }

    pub fn max_pixel_ratio(&self) -> f64 {
        self.max_pixel_ratio
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Logical size scaled by the pixel scale, rounded, at least 1×1.
    pub fn drawing_buffer_size(&self) -> DrawingBufferSize {
        DrawingBufferSize {
            width: scaled_dimension(self.width, self.pixel_scale),
            height: scaled_dimension(self.height, self.pixel_scale),
        }
    }
}

/// `min(scale_factor, max)`, never below 1.
pub fn pixel_scale_for(scale_factor: f64, max_pixel_ratio: f64) -> f64 {
    if !scale_factor.is_finite() {
        return 1.0;
    }
    scale_factor.min(max_pixel_ratio).max(1.0)
}

fn clamp_dimension(value: f64) -> f64 {
    if value.is_finite() {
        value.max(MIN_VIEWPORT_DIMENSION)
    } else {
        MIN_VIEWPORT_DIMENSION
    }
}

/// Device pixels for one logical dimension, at least 1.
pub fn scaled_dimension(logical: f64, scale: f64) -> u32 {
    ((logical * scale).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_from_container_size() {
        let viewport = ViewportState::new(800.0, 600.0, 1.0, 2.0);
        assert_eq!(viewport.width(), 800.0);
        assert_eq!(viewport.height(), 600.0);
        assert_eq!(viewport.pixel_scale(), 1.0);
        assert!((viewport.aspect_ratio() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_pixel_scale_capped_at_max() {
        let viewport = ViewportState::new(800.0, 600.0, 3.0, 2.0);
        assert_eq!(viewport.pixel_scale(), 2.0);
        assert_eq!(
            viewport.drawing_buffer_size(),
            DrawingBufferSize {
                width: 1600,
                height: 1200
            }
        );
    }

    #[test]
    fn test_fractional_scale_kept_below_max() {
        let mut viewport = ViewportState::new(800.0, 600.0, 1.0, 2.0);
        viewport.handle_resize(1001.0, 500.0, 1.5);
        assert_eq!(viewport.pixel_scale(), 1.5);
        assert_eq!(
            viewport.drawing_buffer_size(),
            DrawingBufferSize {
                width: 1502,
                height: 750
            }
        );
    }

    #[test]
    fn test_resize_replaces_size_and_scale() {
        let mut viewport = ViewportState::new(800.0, 600.0, 1.0, 2.0);
        viewport.handle_resize(1920.0, 1080.0, 2.5);
        assert_eq!(viewport.width(), 1920.0);
        assert_eq!(viewport.height(), 1080.0);
        assert_eq!(viewport.pixel_scale(), 2.0);
        assert!((viewport.aspect_ratio() - 16.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_size_clamped_to_one() {
        let mut viewport = ViewportState::new(800.0, 600.0, 1.0, 2.0);
        viewport.handle_resize(0.0, 0.0, 1.0);
        assert_eq!(viewport.width(), 1.0);
        assert_eq!(viewport.height(), 1.0);
        assert_eq!(
            viewport.drawing_buffer_size(),
            DrawingBufferSize {
                width: 1,
                height: 1
            }
        );
        assert!(viewport.aspect_ratio().is_finite());
    }

    #[test]
    fn test_scale_below_one_raised() {
        assert_eq!(pixel_scale_for(0.5, 2.0), 1.0);
        assert_eq!(pixel_scale_for(f64::NAN, 2.0), 1.0);
    }

    #[test]
    fn test_max_ratio_below_one_treated_as_one() {
        let viewport = ViewportState::new(100.0, 100.0, 2.0, 0.5);
        assert_eq!(viewport.max_pixel_ratio(), 1.0);
        assert_eq!(viewport.pixel_scale(), 1.0);
    }
}
