//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Buckets nearest the focus point go first.

use crate::{
    renderer::{pixel_rng, render_pixel, ImageBuffer, RenderConfig},
    sampler::FoveatedSampler,
    shader::RayStats,
    Scene,
};
use fovea_core::Color;
use rayon::prelude::*;
use std::time::Instant;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Squared distance from the bucket center to (px, py).
    fn distance_squared_to(&self, px: f64, py: f64) -> f64 {
        let cx = self.x as f64 + self.width as f64 / 2.0;
        let cy = self.y as f64 + self.height as f64 / 2.0;
        (cx - px).powi(2) + (cy - py).powi(2)
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets covering a width × height image, sorted by distance
/// from the focus point.
///
/// A bucket size of 0 is treated as 1.
pub fn generate_buckets(
    width: u32,
    height: u32,
    bucket_size: u32,
    focus_x: f64,
    focus_y: f64,
) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets.sort_by(|a, b| {
        a.distance_squared_to(focus_x, focus_y)
            .total_cmp(&b.distance_squared_to(focus_x, focus_y))
    });

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
    /// Rays cast for this bucket
    pub stats: RayStats,
}

/// Render a single bucket.
///
/// Pixels use the same per-pixel random streams as the serial renderer.
pub fn render_bucket(
    bucket: &Bucket,
    scene: &Scene,
    sampler: &FoveatedSampler,
    config: &RenderConfig,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);
    let mut stats = RayStats::default();
    let image_width = u64::from(sampler.width());

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let x = bucket.x + local_x;
            let y = bucket.y + local_y;
            let mut rng = pixel_rng(config.seed, u64::from(y) * image_width + u64::from(x));
            pixels.push(render_pixel(
                scene,
                sampler,
                x,
                y,
                config.max_depth,
                &mut rng,
                &mut stats,
            ));
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
        stats,
    }
}

/// Render the whole image on the rayon thread pool.
///
/// Produces the same image as [`render_with_config`](crate::render_with_config)
/// for the same config.
pub fn render_parallel(
    scene: &Scene,
    width: u32,
    height: u32,
    config: &RenderConfig,
    bucket_size: u32,
) -> ImageBuffer {
    let sampler = config.sampler(width, height);
    let buckets = generate_buckets(width, height, bucket_size, config.focus_x, config.focus_y);

    log::info!(
        "Rendering {}x{} @ {} rays/pixel, focus ({}, {}), {} buckets on {} threads",
        width,
        height,
        config.rays_per_pixel,
        config.focus_x,
        config.focus_y,
        buckets.len(),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, scene, &sampler, config))
        .collect();

    let mut image = ImageBuffer::new(width, height);
    let mut stats = RayStats::default();
    for result in results {
        let bucket = result.bucket;
        for (i, color) in result.pixels.into_iter().enumerate() {
            let i = i as u32;
            image.set(bucket.x + i % bucket.width, bucket.y + i / bucket.width, color);
        }
        stats += result.stats;
    }

    log::info!(
        "Rendered in {:.2?}: {} rays traced, {} shadow rays",
        start.elapsed(),
        stats.traced,
        stats.shadow
    );

    image
}
