//! Infinite plane primitive.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Interval, Material, Point3, Ray, Vec3,
};

/// Rays with `|dot(normal, direction)|` below this are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-8;

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Point3,
    normal: Vec3,
    material: Arc<Material>,
}

impl Plane {
    /// Create a plane. A zero-length normal yields a plane that is never hit.
    pub fn new(point: Point3, normal: Vec3, material: Arc<Material>) -> Self {
        let normal = normal.normalize_or_zero();
        if normal == Vec3::ZERO {
            log::warn!("Plane through {point} has a zero-length normal; it will never be hit");
        }

        Self {
            point,
            normal,
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane (also covers a degenerate normal)
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, &self.material))
    }
}
