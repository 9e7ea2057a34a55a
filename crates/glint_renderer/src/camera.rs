//! Pinhole camera for primary ray generation.

use crate::{Point3, Ray, Vec3};

/// A pinhole camera mapping viewport coordinates to world-space rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Create a camera at `look_from` aimed at `look_at`.
    ///
    /// `vfov` is the vertical field of view in degrees, `aspect_ratio` is
    /// width / height. The viewport sits one unit in front of the eye.
    pub fn new(look_from: Point3, look_at: Point3, vup: Vec3, vfov: f64, aspect_ratio: f64) -> Self {
        let theta = vfov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width = aspect_ratio * viewport_height;

        // Camera basis; fall back to a canonical frame for degenerate input
        let w = (look_from - look_at).try_normalize().unwrap_or(Vec3::Z);
        let u = vup.cross(w).try_normalize().unwrap_or_else(|| w.any_orthonormal_vector());
        let v = w.cross(u);

        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;

        Self {
            origin: look_from,
            lower_left_corner: look_from - horizontal / 2.0 - vertical / 2.0 - w,
            horizontal,
            vertical,
        }
    }

    /// Ray through viewport coordinate `(s, t)`; `(0, 0)` is bottom-left,
    /// `(1, 1)` top-right. The direction is not normalized.
    pub fn get_ray(&self, s: f64, t: f64) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin,
        )
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::ZERO, Point3::NEG_Z, Vec3::Y, 90.0, 16.0 / 9.0)
    }
}
