//! Core Whitted ray tracing renderer.
//!
//! Implements recursive ray tracing with:
//! - Phong direct lighting with shadow rays
//! - Mirror reflection blended by material reflectivity, bounded by depth
//! - Anti-aliasing via multi-sampling, rendered in parallel buckets

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, DEFAULT_BUCKET_SIZE};
use crate::{
    hittable::HitRecord, mirror, reflect, Camera, Color, ImageBuffer, Interval, PointLight, Ray,
    Sampler, Scene, Vec3,
};

/// Lower bound on `t` for primary and reflected rays.
pub const HIT_EPSILON: f64 = 1e-3;

/// Offset along the normal for reflected ray origins.
pub const REFLECTION_EPSILON: f64 = 1e-3;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray depth (1 = primary rays only, no reflections)
    pub max_depth: u32,
    /// Sub-pixel sample placement
    pub sampler: Sampler,
    /// Seed for all per-pixel randomness
    pub seed: u64,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            samples_per_pixel: 4,
            max_depth: 5,
            sampler: Sampler::Jittered,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }
}

/// Compute the radiance seen along `ray`.
///
/// `depth` is the remaining ray budget: 0 returns black without touching the
/// scene, 1 shades the hit without spawning reflections. The result is
/// linear and unclamped.
pub fn trace(ray: &Ray, scene: &Scene, depth: u32) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.nearest_hit(ray, Interval::new(HIT_EPSILON, f64::INFINITY)) else {
        return scene.background_color(ray);
    };

    let material = rec.material;
    let mut result = material.emission + material.ambient * scene.ambient_light();

    let view_dir = (-ray.direction()).normalize_or_zero();
    for light in scene.lights() {
        for emitter in light.emitters() {
            result += direct_light(scene, &rec, view_dir, emitter);
        }
    }

    if material.is_reflective() && depth > 1 {
        let reflected = Ray::new(
            rec.p + REFLECTION_EPSILON * rec.normal,
            mirror(ray.direction().normalize_or_zero(), rec.normal),
        );
        let reflected_color = trace(&reflected, scene, depth - 1);
        result = result * (1.0 - material.reflectivity) + reflected_color * material.reflectivity;
    }

    result
}

/// Diffuse and specular contribution of one point emitter at a hit.
fn direct_light(scene: &Scene, rec: &HitRecord<'_>, view_dir: Vec3, light: &PointLight) -> Color {
    let light_dir = light.direction_from(rec.p);
    let n_dot_l = rec.normal.dot(light_dir);

    // Facing away from the light: no diffuse, hence no specular either
    if n_dot_l <= 0.0 || scene.is_shadowed(rec.p, light) {
        return Color::ZERO;
    }

    let material = rec.material;
    let intensity = light.intensity_at(rec.p);

    let diffuse = material.diffuse * intensity * n_dot_l;
    let highlight = view_dir.dot(reflect(light_dir, rec.normal)).max(0.0);
    let specular = material.specular * intensity * highlight.powf(material.shininess);

    diffuse + specular
}

/// Render a single pixel by averaging `trace` over the sampler's offsets.
///
/// Pixel (0, 0) is the top-left corner of the image.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut StdRng,
) -> Color {
    let offsets = config.sampler.offsets(config.samples_per_pixel, rng);
    let width = f64::from(config.width.max(1));
    let height = f64::from(config.height.max(1));

    let mut pixel_color = Color::ZERO;
    for offset in &offsets {
        let s = (f64::from(x) + offset.x) / width;
        let t = 1.0 - (f64::from(y) + offset.y) / height;
        let ray = camera.get_ray(s, t);
        pixel_color += trace(&ray, scene, config.max_depth);
    }

    pixel_color / offsets.len() as f64
}

/// Deterministic per-pixel RNG, independent of bucket layout and thread count.
pub fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let index = (u64::from(y) << 32) | u64::from(x);
    StdRng::seed_from_u64(seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render the entire scene to an image buffer.
///
/// Buckets are rendered in parallel on the current rayon pool and each
/// writes a disjoint set of pixels.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    let buckets = generate_buckets(config.width, config.height, config.bucket_size.max(1));

    log::info!(
        "Rendering {}x{} @ {} spp, depth {} in {} buckets",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len()
    );

    let results: Vec<_> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, scene, config))
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}
