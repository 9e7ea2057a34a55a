//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon. Buckets never overlap, so
//! each one owns the pixels it writes.

use crate::renderer::{pixel_rng, render_pixel};
use crate::{Camera, Color, RenderConfig, Scene};

/// A rectangular tile of the image, addressed by its top-left pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in render order (0 renders first)
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Squared distance from the tile's center to `(cx, cy)`.
    fn distance_sq_to(&self, cx: f64, cy: f64) -> f64 {
        let dx = f64::from(self.x) + f64::from(self.width) / 2.0 - cx;
        let dy = f64::from(self.y) + f64::from(self.height) / 2.0 - cy;
        dx * dx + dy * dy
    }
}

/// Default bucket edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Tile a `width` x `height` image into buckets of at most `bucket_size`.
///
/// Edge buckets are clipped to the image. Buckets are ordered outward from
/// the image center; equidistant buckets keep row-major order.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(size as usize)
        .flat_map(|y| {
            (0..width).step_by(size as usize).map(move |x| {
                Bucket::new(x, y, size.min(width - x), size.min(height - y), 0)
            })
        })
        .collect();

    let (cx, cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    buckets.sort_by(|a, b| a.distance_sq_to(cx, cy).total_cmp(&b.distance_sq_to(cx, cy)));

    for (index, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = index;
    }
    buckets
}

/// Render a single bucket.
///
/// Each pixel draws from its own RNG seeded by position, so results do not
/// depend on bucket size or scheduling.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let x = bucket.x + local_x;
            let y = bucket.y + local_y;
            let mut rng = pixel_rng(config.seed, x, y);
            pixels.push(render_pixel(camera, scene, x, y, config, &mut rng));
        }
    }

    log::debug!(
        "Bucket {} ({}, {}) {}x{} done",
        bucket.index,
        bucket.x,
        bucket.y,
        bucket.width,
        bucket.height
    );

    BucketResult::new(*bucket, pixels)
}

/// Linear colors for one bucket, row-major within the tile.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}
