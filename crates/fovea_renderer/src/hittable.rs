//! Hittable trait and Hit record for ray-object intersection.

use fovea_core::Material;
use fovea_math::{Interval, Ray, Vector3};

/// Minimum accepted ray parameter. Hits closer than this are discarded so
/// secondary rays do not re-hit the surface they start on.
pub const EPSILON: f64 = 0.001;

/// Range of ray parameters a hit must fall in to be accepted.
pub const HIT_RANGE: Interval = Interval::new(EPSILON, f64::INFINITY);

/// Record of a ray-object intersection.
///
/// Hits are transient: produced per intersection query, never stored.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Parameter t along the ray where the intersection occurs
    pub distance: f64,
    /// Point of intersection
    pub point: Vector3,
    /// Outward surface normal (unit length for non-degenerate shapes)
    pub normal: Vector3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection of `ray` with this object at a parameter
    /// within [`HIT_RANGE`], if any.
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>>;
}
