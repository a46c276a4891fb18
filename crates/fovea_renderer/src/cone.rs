//! Finite, capped cone primitive.

use std::sync::Arc;

use crate::hittable::{Hit, Hittable, EPSILON};
use fovea_core::Material;
use fovea_math::{Ray, Vector3, VectorExt};

/// Coefficients smaller than this are treated as zero.
const DEGENERATE_TOLERANCE: f64 = 1e-6;

/// A cone standing on a circular base.
///
/// In local coordinates (relative to `center`) the base disk lies in the
/// `y = 0` plane and the apex is at `y = height`. The base is capped.
#[derive(Debug, Clone)]
pub struct Cone {
    center: Vector3,
    radius: f64,
    height: f64,
    material: Arc<Material>,
}

impl Cone {
    /// Create a new cone with its base centered at `center`.
    pub fn new(center: Vector3, radius: f64, height: f64, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            height,
            material,
        }
    }

    pub fn apex(&self) -> Vector3 {
        self.center + Vector3::Y * self.height
    }

    /// Slope of the lateral surface (radius lost per unit of height).
    fn slope(&self) -> f64 {
        self.radius / self.height
    }
}

impl Hittable for Cone {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let ro = ray.origin - self.center;
        let rd = ray.direction;
        let h = self.height;
        let k2 = self.slope() * self.slope();

        let mut nearest = f64::INFINITY;

        // Lateral surface: x² + z² = k²(h - y)², restricted to 0 <= y <= h
        let a = rd.x * rd.x + rd.z * rd.z - k2 * rd.y * rd.y;
        let b = 2.0 * (ro.x * rd.x + ro.z * rd.z - k2 * ro.y * rd.y + k2 * h * rd.y);
        let c = ro.x * ro.x + ro.z * ro.z - k2 * ro.y * ro.y + 2.0 * k2 * h * ro.y - k2 * h * h;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 && a.abs() > DEGENERATE_TOLERANCE {
            let sqrtd = discriminant.sqrt();
            for t in [(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)] {
                let y = ro.y + t * rd.y;
                if t > EPSILON && (0.0..=h).contains(&y) {
                    nearest = nearest.min(t);
                }
            }
        }

        // Base cap
        if rd.y.abs() > DEGENERATE_TOLERANCE {
            let t = -ro.y / rd.y;
            if t > EPSILON {
                let p = ro + rd * t;
                if p.x * p.x + p.z * p.z <= self.radius * self.radius {
                    nearest = nearest.min(t);
                }
            }
        }

        if !nearest.is_finite() {
            return None;
        }

        let point = ray.at(nearest);
        let local = point - self.center;
        let normal = if local.y.abs() < EPSILON {
            Vector3::NEG_Y
        } else {
            Vector3::new(local.x, k2 * (h - local.y), local.z).normalize_or_self()
        };

        Some(Hit {
            distance: nearest,
            point,
            normal,
            material: &self.material,
        })
    }
}
