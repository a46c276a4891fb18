//! Recursive Whitted-style shading.
//!
//! Implements:
//! - Ambient, diffuse and Phong specular terms per point light
//! - Hard shadows via a nearest-hit query toward each light
//! - Mirror reflection blended by material reflectivity, depth-bounded

use crate::{hittable::Hit, Hittable, Scene};
use fovea_core::{Color, Light};
use fovea_math::{Ray, Vector3, VectorExt};
use std::ops::AddAssign;

/// Default reflection recursion limit.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Occluders must be at least this much closer than the light to cast a shadow.
pub const SHADOW_BIAS: f64 = 0.001;

/// Counts of rays cast while shading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RayStats {
    /// Calls into the tracer (primary plus reflection rays)
    pub traced: u64,
    /// Shadow rays cast toward lights
    pub shadow: u64,
}

impl RayStats {
    /// Total rays cast of any kind.
    pub fn total(&self) -> u64 {
        self.traced + self.shadow
    }
}

impl AddAssign for RayStats {
    fn add_assign(&mut self, other: Self) {
        self.traced += other.traced;
        self.shadow += other.shadow;
    }
}

/// Compute the color seen along `ray`.
///
/// Returns the background once `depth` exceeds `max_depth` or nothing is
/// hit. Reflection rays are only spawned while `depth < max_depth`, so at
/// most `max_depth + 1` levels are ever traced.
pub fn trace_ray(scene: &Scene, ray: &Ray, depth: u32, max_depth: u32) -> Color {
    trace_ray_with_stats(scene, ray, depth, max_depth, &mut RayStats::default())
}

/// [`trace_ray`] that also counts the rays it casts into `stats`.
pub fn trace_ray_with_stats(
    scene: &Scene,
    ray: &Ray,
    depth: u32,
    max_depth: u32,
    stats: &mut RayStats,
) -> Color {
    stats.traced += 1;

    if depth > max_depth {
        return scene.background();
    }

    let Some(hit) = scene.intersect(ray) else {
        return scene.background();
    };

    let material = hit.material;
    let mut color = material.color * material.ambient;

    let view_dir = (scene.camera().position() - hit.point).normalize_or_self();
    for light in scene.lights() {
        stats.shadow += 1;
        if is_occluded(scene, &hit, light) {
            continue;
        }
        color += direct_light(&hit, light, view_dir);
    }

    if material.is_reflective() && depth < max_depth {
        let reflected_ray = Ray::new(hit.point, ray.direction.reflect(hit.normal));
        let reflected = trace_ray_with_stats(scene, &reflected_ray, depth + 1, max_depth, stats);
        color = color * (1.0 - material.reflectivity) + reflected * material.reflectivity;
    }

    color
}

/// True if anything lies between the hit point and the light.
fn is_occluded(scene: &Scene, hit: &Hit<'_>, light: &Light) -> bool {
    let to_light = light.position - hit.point;
    let shadow_ray = Ray::new(hit.point, to_light.normalize_or_self());

    match scene.intersect(&shadow_ray) {
        Some(blocker) => blocker.distance < to_light.length() - SHADOW_BIAS,
        None => false,
    }
}

/// Diffuse plus specular contribution of one unoccluded light.
fn direct_light(hit: &Hit<'_>, light: &Light, view_dir: Vector3) -> Color {
    let material = hit.material;
    let light_dir = (light.position - hit.point).normalize_or_self();

    let diff = hit.normal.dot(light_dir).max(0.0);
    let diffuse = material.color * material.diffuse * diff * light.intensity;

    let reflect_dir = (-light_dir).reflect(hit.normal);
    let spec = view_dir.dot(reflect_dir).max(0.0).powf(material.shininess);
    let specular = Color::ONE * material.specular * spec * light.intensity;

    diffuse + specular
}
