//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Interval, Material, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Created fresh by every successful intersection test and borrowed from
/// the primitive that produced it.
#[derive(Debug, Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record at parameter `t`, orienting `outward_normal` against the ray.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: &'a Material) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection with parameter strictly inside `ray_t`.
    ///
    /// "No hit" is the common case and is reported as `None`; this never fails.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_face_keeps_normal() {
        let mat = Material::default();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let rec = HitRecord::new(&ray, 4.0, Vec3::Z, &mat);

        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.p, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_back_face_flips_normal() {
        let mat = Material::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, &mat);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_Z);
    }
}
