//! Foveated frame renderer.
//!
//! Implements:
//! - Per-pixel ray budgets from the foveated sampler
//! - Jittered primary rays averaged per pixel
//! - Clamping and gamma correction (gamma = 2.2)
//! - Deterministic per-pixel random streams

use crate::{
    sampler::{FoveatedSampler, FoveationConfig},
    shader::{trace_ray_with_stats, RayStats, DEFAULT_MAX_DEPTH},
    Scene,
};
use fovea_core::Color;
use fovea_math::Interval;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::Instant;

/// Display gamma applied to every output channel.
pub const GAMMA: f64 = 2.2;

/// Rows between progress messages in the serial renderer.
const PROGRESS_INTERVAL: u32 = 50;

/// Render configuration.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Ray budget for fully sharp pixels
    pub rays_per_pixel: u32,
    /// Focus point in pixel coordinates
    pub focus_x: f64,
    pub focus_y: f64,
    /// Reflection recursion limit
    pub max_depth: u32,
    /// Seed of the per-pixel random streams
    pub seed: u64,
    pub foveation: FoveationConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            rays_per_pixel: 4,
            focus_x: 0.0,
            focus_y: 0.0,
            max_depth: DEFAULT_MAX_DEPTH,
            seed: 0,
            foveation: FoveationConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Create a config with the given ray budget and focus point.
    pub fn new(rays_per_pixel: u32, focus_x: f64, focus_y: f64) -> Self {
        Self {
            rays_per_pixel,
            focus_x,
            focus_y,
            ..Default::default()
        }
    }

    /// Focus on the center of a width × height image.
    pub fn centered(width: u32, height: u32, rays_per_pixel: u32) -> Self {
        Self::new(rays_per_pixel, width as f64 / 2.0, height as f64 / 2.0)
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_foveation(mut self, foveation: FoveationConfig) -> Self {
        self.foveation = foveation;
        self
    }

    /// Sampler for a width × height image under this config.
    pub fn sampler(&self, width: u32, height: u32) -> FoveatedSampler {
        FoveatedSampler::new(
            width,
            height,
            self.focus_x,
            self.focus_y,
            self.rays_per_pixel,
            self.foveation,
        )
    }
}

/// Random stream for the pixel at row-major `index`.
///
/// Depends only on the seed and the pixel, so the order pixels are
/// rendered in does not change the image.
pub fn pixel_rng(seed: u64, index: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Clamp to [0, 1] and apply display gamma.
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    Interval::UNIT.clamp(linear).powf(1.0 / GAMMA)
}

/// [`linear_to_gamma`] on every channel.
pub fn gamma_correct(color: Color) -> Color {
    Color::new(
        linear_to_gamma(color.x),
        linear_to_gamma(color.y),
        linear_to_gamma(color.z),
    )
}

/// Convert a gamma-corrected color to 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b]
}

/// Render a single pixel: average its foveated samples, then gamma correct.
pub fn render_pixel(
    scene: &Scene,
    sampler: &FoveatedSampler,
    x: u32,
    y: u32,
    max_depth: u32,
    rng: &mut dyn RngCore,
    stats: &mut RayStats,
) -> Color {
    let sampling = sampler.classify(x, y);
    let camera = scene.camera();

    let mut pixel_color = Color::ZERO;
    for _ in 0..sampling.ray_count {
        let (ox, oy) = sampler.jitter(sampling.blur_factor, rng);
        let ray = camera.ray_through(
            x as f64 + ox,
            y as f64 + oy,
            sampler.width(),
            sampler.height(),
        );
        pixel_color += trace_ray_with_stats(scene, &ray, 0, max_depth, stats);
    }

    gamma_correct(pixel_color / sampling.ray_count as f64)
}

/// Gamma-corrected render output, row-major from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to packed RGB bytes for an image encoder.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }
}

/// Render a width × height image focused at (focus_x, focus_y).
///
/// Jitter is drawn from a fresh entropy seed, so repeated calls differ in
/// noise. Use [`render_with_config`] with a fixed seed for reproducible
/// output.
pub fn render(
    scene: &Scene,
    width: u32,
    height: u32,
    rays_per_pixel: u32,
    focus_x: f64,
    focus_y: f64,
) -> ImageBuffer {
    let config = RenderConfig::new(rays_per_pixel, focus_x, focus_y).with_seed(rand::random());
    render_with_config(scene, width, height, &config)
}

/// Render the whole image on the calling thread, row by row.
pub fn render_with_config(
    scene: &Scene,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> ImageBuffer {
    let sampler = config.sampler(width, height);
    let mut image = ImageBuffer::new(width, height);
    let mut stats = RayStats::default();

    log::info!(
        "Rendering {}x{} @ {} rays/pixel, focus ({}, {})",
        width,
        height,
        config.rays_per_pixel,
        config.focus_x,
        config.focus_y
    );
    let start = Instant::now();

    for y in 0..height {
        if y % PROGRESS_INTERVAL == 0 {
            log::debug!("Row {}/{}", y, height);
        }
        for x in 0..width {
            let index = u64::from(y) * u64::from(width) + u64::from(x);
            let mut rng = pixel_rng(config.seed, index);
            let color = render_pixel(scene, &sampler, x, y, config.max_depth, &mut rng, &mut stats);
            image.set(x, y, color);
        }
    }

    log::info!(
        "Rendered in {:.2?}: {} rays traced, {} shadow rays",
        start.elapsed(),
        stats.traced,
        stats.shadow
    );

    image
}
