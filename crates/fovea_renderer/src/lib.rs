//! Fovea renderer - foveated Whitted-style CPU ray tracing
//!
//! A recursive ray tracer with ambient, diffuse and Phong specular shading,
//! hard shadows and mirror reflection. The per-pixel ray budget falls off
//! with distance from a focus point, and peripheral samples are jittered
//! wide enough to blur.
//!
//! Rendering is single-threaded via [`render_with_config`] or bucketed on
//! the rayon pool via [`render_parallel`]; both give identical output for
//! the same seed.

mod aabox;
mod bucket;
mod camera;
mod cone;
mod hittable;
mod plane;
mod primitive;
mod renderer;
mod sampler;
mod scene;
mod shader;
mod sphere;

pub use aabox::AaBox;
pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::{Camera, CameraError};
pub use cone::Cone;
pub use hittable::{Hit, Hittable, EPSILON, HIT_RANGE};
pub use plane::Plane;
pub use primitive::Primitive;
pub use renderer::{
    color_to_rgb8, gamma_correct, linear_to_gamma, pixel_rng, render, render_pixel,
    render_with_config, ImageBuffer, RenderConfig, GAMMA,
};
pub use sampler::{FoveatedSampler, FoveationConfig, PixelSampling};
pub use scene::Scene;
pub use shader::{trace_ray, trace_ray_with_stats, RayStats, DEFAULT_MAX_DEPTH, SHADOW_BIAS};
pub use sphere::Sphere;

/// Re-export math and scene types used in the public API
pub use fovea_core::{Color, Light, Material};
pub use fovea_math::{Interval, Ray, Vector3, VectorExt};

use rand::{Rng, RngCore};

/// Uniform f64 in [0, 1) from a type-erased generator.
#[inline]
pub(crate) fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}
