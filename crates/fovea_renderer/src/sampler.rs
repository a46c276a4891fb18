//! Foveated sampling policy.
//!
//! Pixels within the inner radius of the focus point get the full ray
//! budget and sub-pixel jitter. Between the inner and outer radius the
//! sharpness falls off linearly; beyond the outer radius a pixel gets a
//! single ray whose jitter is widened well past its own cell.

use crate::gen_f64;
use fovea_math::DVec2;
use rand::RngCore;

/// Tunables of the foveation falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoveationConfig {
    /// Full-sharpness radius as a fraction of min(width, height)
    pub inner_radius_fraction: f64,
    /// Zero-sharpness radius as a fraction of min(width, height)
    pub outer_radius_fraction: f64,
    /// Blur factor at zero sharpness
    pub blur_strength: f64,
    /// Jitter widening per unit of blur factor
    pub jitter_spread: f64,
    /// Below this sharpness a pixel always gets exactly one ray
    pub min_sharpness: f64,
}

impl Default for FoveationConfig {
    fn default() -> Self {
        Self {
            inner_radius_fraction: 0.20,
            outer_radius_fraction: 0.60,
            blur_strength: 4.0,
            jitter_spread: 5.0,
            min_sharpness: 0.05,
        }
    }
}

/// How a single pixel is to be sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSampling {
    /// 1.0 at the focus, 0.0 in the periphery
    pub sharpness: f64,
    /// Number of primary rays to cast (at least 1)
    pub ray_count: u32,
    /// Jitter widening factor, `(1 - sharpness) * blur_strength`
    pub blur_factor: f64,
}

/// Per-pixel ray budget and jitter based on distance to a focus point.
#[derive(Debug, Clone, Copy)]
pub struct FoveatedSampler {
    width: u32,
    height: u32,
    focus: DVec2,
    radius_inner: f64,
    radius_outer: f64,
    rays_per_pixel: u32,
    config: FoveationConfig,
}

impl FoveatedSampler {
    /// Create a sampler for a width × height image.
    ///
    /// The focus point is in pixel coordinates and may lie outside the image.
    pub fn new(
        width: u32,
        height: u32,
        focus_x: f64,
        focus_y: f64,
        rays_per_pixel: u32,
        config: FoveationConfig,
    ) -> Self {
        let min_dim = width.min(height) as f64;
        Self {
            width,
            height,
            focus: DVec2::new(focus_x, focus_y),
            radius_inner: min_dim * config.inner_radius_fraction,
            radius_outer: min_dim * config.outer_radius_fraction,
            rays_per_pixel,
            config,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn radius_inner(&self) -> f64 {
        self.radius_inner
    }

    pub fn radius_outer(&self) -> f64 {
        self.radius_outer
    }

    /// Sharpness of pixel (x, y) in [0, 1].
    pub fn sharpness(&self, x: u32, y: u32) -> f64 {
        let dist = DVec2::new(x as f64, y as f64).distance(self.focus);

        if dist <= self.radius_inner {
            1.0
        } else if dist >= self.radius_outer {
            0.0
        } else {
            1.0 - (dist - self.radius_inner) / (self.radius_outer - self.radius_inner)
        }
    }

    /// Ray count and blur factor for pixel (x, y).
    pub fn classify(&self, x: u32, y: u32) -> PixelSampling {
        let sharpness = self.sharpness(x, y);

        let ray_count = if sharpness < self.config.min_sharpness {
            1
        } else {
            ((self.rays_per_pixel as f64 * sharpness).floor() as u32).max(1)
        };

        PixelSampling {
            sharpness,
            ray_count,
            blur_factor: (1.0 - sharpness) * self.config.blur_strength,
        }
    }

    /// Sub-pixel sample offset (ox, oy) relative to the pixel's top-left
    /// corner.
    ///
    /// Each axis is `0.5 + U(-0.5, 0.5) * (1 + blur_factor * jitter_spread)`
    /// with a fresh draw per axis, so blurred samples may land in
    /// neighboring cells.
    pub fn jitter(&self, blur_factor: f64, rng: &mut dyn RngCore) -> (f64, f64) {
        let spread = 1.0 + blur_factor * self.config.jitter_spread;
        let jitter_x = gen_f64(rng) - 0.5;
        let jitter_y = gen_f64(rng) - 0.5;
        (0.5 + jitter_x * spread, 0.5 + jitter_y * spread)
    }
}
