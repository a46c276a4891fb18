//! Camera for primary ray generation.

use fovea_core::CameraSettings;
use fovea_math::{Ray, Vector3, VectorExt};
use thiserror::Error;

/// Squared lengths below this make a basis vector undefined.
const DEGENERATE_LENGTH_SQUARED: f64 = 1e-24;

/// Camera configurations that do not define a view.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CameraError {
    #[error("Camera look_at coincides with its position")]
    DegenerateForward,

    #[error("Camera up vector is parallel to the view direction")]
    ParallelUp,

    #[error("Field of view must be in (0, 180) degrees, got {0}")]
    InvalidFov(f64),

    #[error("Aspect ratio must be positive, got {0}")]
    InvalidAspect(f64),
}

/// Pinhole camera with an orthonormal (forward, right, up) basis.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    position: Vector3,
    forward: Vector3,
    right: Vector3,
    up: Vector3,
    view_width: f64,
    view_height: f64,
}

impl Camera {
    /// Derive the camera basis and view-plane size.
    ///
    /// `right = normalize(forward × up)` and `up` is recomputed as
    /// `right × forward`, so the supplied up only needs to be non-parallel.
    pub fn new(settings: &CameraSettings) -> Result<Self, CameraError> {
        if !(settings.fov > 0.0 && settings.fov < 180.0) {
            return Err(CameraError::InvalidFov(settings.fov));
        }
        if !(settings.aspect_ratio > 0.0 && settings.aspect_ratio.is_finite()) {
            return Err(CameraError::InvalidAspect(settings.aspect_ratio));
        }

        let view = settings.look_at - settings.position;
        if view.length_squared() < DEGENERATE_LENGTH_SQUARED {
            return Err(CameraError::DegenerateForward);
        }
        let forward = view.normalize_or_self();

        let side = forward.cross(settings.up);
        if side.length_squared() < DEGENERATE_LENGTH_SQUARED {
            return Err(CameraError::ParallelUp);
        }
        let right = side.normalize_or_self();
        let up = right.cross(forward);

        let view_height = 2.0 * (settings.fov.to_radians() / 2.0).tan();
        let view_width = view_height * settings.aspect_ratio;

        Ok(Self {
            position: settings.position,
            forward,
            right,
            up,
            view_width,
            view_height,
        })
    }

    /// Primary ray through image coordinate (ox, oy) of a width × height
    /// image. Coordinates are in pixels from the top-left corner and may
    /// fall outside the image.
    pub fn ray_through(&self, ox: f64, oy: f64, width: u32, height: u32) -> Ray {
        let u = (2.0 * ox / width as f64 - 1.0) * self.view_width / 2.0;
        let v = (1.0 - 2.0 * oy / height as f64) * self.view_height / 2.0;

        let direction = (self.forward + self.right * u + self.up * v).normalize_or_self();
        Ray::new(self.position, direction)
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn forward(&self) -> Vector3 {
        self.forward
    }

    pub fn right(&self) -> Vector3 {
        self.right
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn view_width(&self) -> f64 {
        self.view_width
    }

    pub fn view_height(&self) -> f64 {
        self.view_height
    }
}
