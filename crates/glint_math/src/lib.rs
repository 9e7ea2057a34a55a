// Re-export the f64 glam types used throughout glint
pub use glam::{dvec3, DMat3, DMat4, DVec2, DVec3, DVec4};

// Glint math types
mod interval;
mod ray;
mod transform;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::{Transform, TransformError};

/// 3-component f64 vector used for points, directions and colors.
pub type Vec3 = DVec3;

/// A point in 3D space.
pub type Point3 = DVec3;

/// Linear RGB color. Component-wise multiplication tints per channel.
pub type Color = DVec3;

/// Mirror `d` about `n`: `2 * dot(d, n) * n - d`.
///
/// With `d` pointing away from the surface (e.g. toward a light) the
/// result also points away from the surface.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    2.0 * d.dot(n) * n - d
}

/// Reflect an incoming direction `d` off a surface with normal `n`.
///
/// Equivalent to `-reflect(d, n)`; used to spawn mirror rays.
#[inline]
pub fn mirror(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}
