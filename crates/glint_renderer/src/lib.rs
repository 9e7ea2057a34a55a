//! Glint renderer - Whitted-style CPU ray tracing
//!
//! Recursive ray tracer with Phong shading, hard and soft shadows from
//! point and area lights, and mirror reflection. Scenes are built from
//! spheres, planes, axis-aligned boxes, triangles and affine-transformed
//! instances of any of them.

mod aa_box;
mod bucket;
mod camera;
mod hittable;
mod light;
mod material;
mod output;
mod plane;
mod primitive;
mod renderer;
mod sampler;
mod scene;
mod sphere;
mod transformed;
mod triangle;

pub use aa_box::AaBox;
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable};
pub use light::{AreaLight, Attenuation, Light, PointLight};
pub use material::Material;
pub use output::{color_to_rgb, linear_to_gamma, ImageBuffer, OutputError};
pub use plane::Plane;
pub use primitive::Primitive;
pub use renderer::{
    pixel_rng, render, render_pixel, trace, RenderConfig, HIT_EPSILON, REFLECTION_EPSILON,
};
pub use sampler::Sampler;
pub use scene::{Background, Scene, SceneBuilder, SHADOW_EPSILON};
pub use sphere::Sphere;
pub use transformed::Transformed;
pub use triangle::Triangle;

/// Re-export the math types the renderer is built on
pub use glint_math::{mirror, reflect, Color, Interval, Point3, Ray, Transform, TransformError, Vec3};
