//! Axis-aligned box primitive, intersected with the slab method.

use std::sync::Arc;

use crate::hittable::{Hit, Hittable, HIT_RANGE};
use fovea_core::Material;
use fovea_math::{Ray, Vector3};

/// Direction components smaller than this are treated as parallel to a slab.
const PARALLEL_TOLERANCE: f64 = 1e-6;

/// Distance within which a hit point is considered to lie on a face.
const FACE_TOLERANCE: f64 = 1e-4;

/// An axis-aligned box between two corners.
#[derive(Debug, Clone)]
pub struct AaBox {
    min: Vector3,
    max: Vector3,
    material: Arc<Material>,
}

impl AaBox {
    /// Create a box from two opposite corners, in any order.
    pub fn new(a: Vector3, b: Vector3, material: Arc<Material>) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            material,
        }
    }

    pub fn min(&self) -> Vector3 {
        self.min
    }

    pub fn max(&self) -> Vector3 {
        self.max
    }

    /// Outward normal of the face `p` lies on.
    ///
    /// Faces are checked in the order -X, +X, -Y, +Y, -Z, +Z; the first one
    /// within tolerance wins. If rounding pushed `p` off every face, the
    /// closest face is used.
    fn face_normal(&self, p: Vector3) -> Vector3 {
        let faces = [
            ((p.x - self.min.x).abs(), Vector3::NEG_X),
            ((p.x - self.max.x).abs(), Vector3::X),
            ((p.y - self.min.y).abs(), Vector3::NEG_Y),
            ((p.y - self.max.y).abs(), Vector3::Y),
            ((p.z - self.min.z).abs(), Vector3::NEG_Z),
            ((p.z - self.max.z).abs(), Vector3::Z),
        ];

        faces
            .iter()
            .find(|(distance, _)| *distance < FACE_TOLERANCE)
            .or_else(|| faces.iter().min_by(|a, b| a.0.total_cmp(&b.0)))
            .map(|(_, normal)| *normal)
            .unwrap_or(Vector3::ZERO)
    }
}

impl Hittable for AaBox {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];

            if direction.abs() < PARALLEL_TOLERANCE {
                // Parallel to this slab: must already be between its planes
                if origin < lo || origin > hi {
                    return None;
                }
            } else {
                let t1 = (lo - origin) / direction;
                let t2 = (hi - origin) / direction;
                t_min = t_min.max(t1.min(t2));
                t_max = t_max.min(t1.max(t2));
            }
        }

        if t_max < t_min || t_max < 0.0 {
            return None;
        }

        let t = if t_min > 0.0 { t_min } else { t_max };
        if !HIT_RANGE.contains(t) || !t.is_finite() {
            return None;
        }

        let point = ray.at(t);
        Some(Hit {
            distance: t,
            point,
            normal: self.face_normal(point),
            material: &self.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AaBox {
        AaBox::new(
            Vector3::splat(-1.0),
            Vector3::splat(1.0),
            Arc::new(Material::default()),
        )
    }

    #[test]
    fn test_box_hit_each_face() {
        let cases = [
            (Vector3::new(-5.0, 0.0, 0.0), Vector3::X, Vector3::NEG_X),
            (Vector3::new(5.0, 0.0, 0.0), Vector3::NEG_X, Vector3::X),
            (Vector3::new(0.0, -5.0, 0.0), Vector3::Y, Vector3::NEG_Y),
            (Vector3::new(0.0, 5.0, 0.0), Vector3::NEG_Y, Vector3::Y),
            (Vector3::new(0.0, 0.0, -5.0), Vector3::Z, Vector3::NEG_Z),
            (Vector3::new(0.0, 0.0, 5.0), Vector3::NEG_Z, Vector3::Z),
        ];

        let aabox = unit_box();
        for (origin, direction, expected_normal) in cases {
            let hit = aabox.intersect(&Ray::new(origin, direction)).unwrap();
            assert!((hit.distance - 4.0).abs() < 1e-12, "{origin:?}");
            assert_eq!(hit.normal, expected_normal, "{origin:?}");
        }
    }

    #[test]
    fn test_box_hit_from_inside_uses_exit() {
        let ray = Ray::new(Vector3::ZERO, Vector3::Y);

        let aabox = unit_box();
        let hit = aabox.intersect(&ray).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-12);
        assert_eq!(hit.normal, Vector3::Y);
    }

    #[test]
    fn test_box_diagonal_hit() {
        let direction = Vector3::new(-1.0, -1.0, -1.0).normalize();
        let ray = Ray::new(Vector3::splat(3.0), direction);

        let aabox = unit_box();
        let hit = aabox.intersect(&ray).unwrap();
        assert!((hit.point - Vector3::ONE).length() < 1e-9);
        // Corner hit: x-max is checked before y-max and z-max
        assert_eq!(hit.normal, Vector3::X);
    }

    #[test]
    fn test_box_parallel_ray_outside_slab_misses() {
        let ray = Ray::new(Vector3::new(0.0, 2.0, -5.0), Vector3::Z);
        assert!(unit_box().intersect(&ray).is_none());
    }

    #[test]
    fn test_box_behind_ray_misses() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::Z);
        assert!(unit_box().intersect(&ray).is_none());
    }

    #[test]
    fn test_box_corners_in_any_order() {
        let aabox = AaBox::new(
            Vector3::new(1.0, -1.0, 1.0),
            Vector3::new(-1.0, 1.0, -1.0),
            Arc::new(Material::default()),
        );
        assert_eq!(aabox.min(), Vector3::splat(-1.0));
        assert_eq!(aabox.max(), Vector3::splat(1.0));
    }

    #[test]
    fn test_degenerate_box_does_not_panic() {
        let flat = AaBox::new(Vector3::ZERO, Vector3::ZERO, Arc::new(Material::default()));
        let _ = flat.intersect(&Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::NEG_Z));
        assert!(flat
            .intersect(&Ray::new(Vector3::new(0.0, 2.0, 5.0), Vector3::NEG_Z))
            .is_none());
    }
}
