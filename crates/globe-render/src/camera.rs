//! Perspective camera for view and projection matrix generation.

use crate::pipeline::CameraUniform;
use glam::{Mat4, Vec3};

/// Construction parameters for [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip plane distance (positive).
    pub near: f32,
    /// Far clip plane distance (positive, > near).
    pub far: f32,
    /// Distance from the origin along +Z.
    pub distance: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            distance: 15.0,
        }
    }
}

/// A perspective camera on the +Z axis looking at the origin.
///
/// The projection matrix is cached: [`Camera::set_aspect_ratio`] only records
/// the new ratio and [`Camera::update_projection_matrix`] applies it.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space eye position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
    projection: Mat4,
}

impl Camera {
    /// Create a camera with the given parameters and initial aspect ratio.
    pub fn new(params: &CameraParams, aspect_ratio: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, params.distance),
            target: Vec3::ZERO,
            fov_y: params.fov_y_degrees.to_radians(),
            aspect_ratio,
            near: params.near,
            far: params.far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Compute the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Recompute the cached projection with reverse-Z.
    pub fn update_projection_matrix(&mut self) {
        // Reverse-Z: near maps to depth 1, far to 0, by swapping the planes.
        self.projection = Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near);
    }

    /// The cached projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Record a new aspect ratio. Call [`Camera::update_projection_matrix`] to apply it.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        self.aspect_ratio = width / height.max(f32::EPSILON);
    }

    /// Convert the camera to a uniform suitable for GPU upload.
    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            view: self.view_matrix().to_cols_array_2d(),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraParams::default(), 16.0 / 9.0)
    }
}
