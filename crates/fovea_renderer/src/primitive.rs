//! Closed set of renderable shapes.

use crate::{
    hittable::{Hit, Hittable},
    AaBox, Cone, Plane, Sphere,
};
use fovea_core::{Object, Shape};
use fovea_math::Ray;

/// Any primitive the scene can hold.
#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Box(AaBox),
    Cone(Cone),
}

impl Primitive {
    /// Build the renderable form of a scene object.
    pub fn from_object(object: &Object) -> Self {
        let material = object.material.clone();
        match object.shape {
            Shape::Sphere { center, radius } => Sphere::new(center, radius, material).into(),
            Shape::Plane { point, normal } => Plane::new(point, normal, material).into(),
            Shape::Box { min, max } => AaBox::new(min, max, material).into(),
            Shape::Cone {
                center,
                radius,
                height,
            } => Cone::new(center, radius, height, material).into(),
        }
    }
}

impl Hittable for Primitive {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect(ray),
            Primitive::Plane(plane) => plane.intersect(ray),
            Primitive::Box(aabox) => aabox.intersect(ray),
            Primitive::Cone(cone) => cone.intersect(ray),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Plane> for Primitive {
    fn from(plane: Plane) -> Self {
        Primitive::Plane(plane)
    }
}

impl From<AaBox> for Primitive {
    fn from(aabox: AaBox) -> Self {
        Primitive::Box(aabox)
    }
}

impl From<Cone> for Primitive {
    fn from(cone: Cone) -> Self {
        Primitive::Cone(cone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fovea_core::Material;
    use fovea_math::Vector3;
    use std::sync::Arc;

    #[test]
    fn test_from_object_keeps_kind_and_material() {
        let material = Arc::new(Material::new(Vector3::new(0.2, 0.4, 0.6)));
        let objects = [
            Object::new(
                Shape::Sphere {
                    center: Vector3::ZERO,
                    radius: 1.0,
                },
                material.clone(),
            ),
            Object::new(
                Shape::Box {
                    min: Vector3::splat(-1.0),
                    max: Vector3::splat(1.0),
                },
                material.clone(),
            ),
            Object::new(
                Shape::Cone {
                    center: Vector3::new(0.0, -1.0, 0.0),
                    radius: 1.0,
                    height: 2.0,
                },
                material.clone(),
            ),
        ];

        let ray = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::NEG_Z);
        for object in &objects {
            let primitive = Primitive::from_object(object);
            let hit = primitive.intersect(&ray).unwrap();
            assert!(std::ptr::eq(hit.material, Arc::as_ptr(&material)));
        }

        assert!(matches!(
            Primitive::from_object(&objects[1]),
            Primitive::Box(_)
        ));
    }

    #[test]
    fn test_plane_dispatch() {
        let primitive = Primitive::from_object(&Object::new(
            Shape::Plane {
                point: Vector3::ZERO,
                normal: Vector3::Z,
            },
            Arc::new(Material::default()),
        ));

        let hit = primitive
            .intersect(&Ray::new(Vector3::new(0.0, 0.0, 3.0), Vector3::NEG_Z))
            .unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-12);
    }
}
