//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::hittable::{Hit, Hittable, HIT_RANGE};
use fovea_core::Material;
use fovea_math::{Ray, Vector3, VectorExt};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vector3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vector3, radius: f64, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root first, the far one when the ray starts inside
        let mut root = (-b - sqrtd) / (2.0 * a);
        if !HIT_RANGE.contains(root) {
            root = (-b + sqrtd) / (2.0 * a);
            if !HIT_RANGE.contains(root) {
                return None;
            }
        }

        let point = ray.at(root);
        Some(Hit {
            distance: root,
            point,
            normal: (point - self.center).normalize_or_self(),
            material: &self.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey() -> Arc<Material> {
        Arc::new(Material::new(Vector3::splat(0.5)))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vector3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.distance - 0.5).abs() < 1e-9); // Should hit at t=0.5
        assert!((hit.point - Vector3::new(0.0, 0.0, -0.5)).length() < 1e-9);
        assert!((hit.normal.length() - 1.0).abs() < 1e-9);
        assert!((hit.normal - Vector3::Z).length() < 1e-9);
    }

    #[test]
    fn test_sphere_hit_unnormalized_direction() {
        let sphere = Sphere::new(Vector3::new(0.0, 0.0, -10.0), 2.0, grey());
        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 0.0, -4.0));

        // Surface at z=-8 is two direction-lengths away
        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-9);
        assert!((hit.point.z + 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_off_axis_normal_points_outward() {
        let center = Vector3::new(0.0, 0.0, -5.0);
        let sphere = Sphere::new(center, 1.0, grey());
        let ray = Ray::new(Vector3::new(0.5, 0.0, 0.0), Vector3::NEG_Z);

        let hit = sphere.intersect(&ray).unwrap();
        let expected = 5.0 - (1.0f64 - 0.25).sqrt();
        assert!((hit.distance - expected).abs() < 1e-9);
        assert!((hit.normal.length() - 1.0).abs() < 1e-9);
        assert!(hit.normal.dot(hit.point - center) > 0.0);
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = Sphere::new(Vector3::ZERO, 2.0, grey());
        let ray = Ray::new(Vector3::ZERO, Vector3::X);

        // Near root is behind the origin, so the far root is used
        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-9);
        assert!((hit.normal - Vector3::X).length() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vector3::new(0.0, 0.0, -1.0), 0.5, grey());

        // Ray pointing away from sphere
        let ray = Ray::new(Vector3::ZERO, Vector3::new(0.0, 1.0, 0.0));
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_behind_ray() {
        let sphere = Sphere::new(Vector3::new(0.0, 0.0, 5.0), 1.0, grey());
        let ray = Ray::new(Vector3::ZERO, Vector3::NEG_Z);
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_surface_origin_ignores_self() {
        let sphere = Sphere::new(Vector3::ZERO, 1.0, grey());

        // Starting on the surface heading outward must not re-hit it
        let ray = Ray::new(Vector3::new(0.0, 0.0, 1.0), Vector3::Z);
        assert!(sphere.intersect(&ray).is_none());
    }
}
