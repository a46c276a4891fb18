//! Infinite plane primitive.

use std::sync::Arc;

use crate::hittable::{Hit, Hittable, HIT_RANGE};
use fovea_core::Material;
use fovea_math::{Ray, Vector3, VectorExt};

/// Below this `|normal·direction|` a ray counts as parallel to the plane.
const PARALLEL_TOLERANCE: f64 = 1e-4;

/// An infinite plane through `point`.
///
/// The stored normal is returned for every hit; it is never flipped
/// toward the viewer.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vector3,
    normal: Vector3,
    material: Arc<Material>,
}

impl Plane {
    /// Create a new plane. The normal is normalized on construction.
    pub fn new(point: Vector3, normal: Vector3, material: Arc<Material>) -> Self {
        Self {
            point,
            normal: normal.normalize_or_self(),
            material,
        }
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() <= PARALLEL_TOLERANCE {
            return None;
        }

        let t = (self.point - ray.origin).dot(self.normal) / denom;
        if !HIT_RANGE.contains(t) {
            return None;
        }

        Some(Hit {
            distance: t,
            point: ray.at(t),
            normal: self.normal,
            material: &self.material,
        })
    }
}
