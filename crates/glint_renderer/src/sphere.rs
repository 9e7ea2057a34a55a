//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Interval, Material, Point3, Ray,
};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero, which never hits.
    pub fn new(center: Point3, radius: f64, material: Arc<Material>) -> Self {
        if radius <= 0.0 {
            log::warn!("Sphere at {center} has non-positive radius {radius}; it will never be hit");
        }

        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let a = ray.direction().length_squared();
        if self.radius <= 0.0 || a == 0.0 {
            return None;
        }

        let oc = self.center - ray.origin();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::ZERO, 1.0, Arc::new(Material::default()))
    }

    #[test]
    fn test_sphere_hit_from_outside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere
            .intersect(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray should hit the sphere");

        assert!((rec.t - 4.0).abs() < 1e-9);
        assert!((rec.p - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-9);
        assert!((rec.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-9);
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_non_unit_direction() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0));

        let rec = sphere.intersect(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-9);
        assert!((rec.p - Vec3::Z).length() < 1e-9);
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.intersect(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-9);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.intersect(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_sphere_respects_interval() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        // Both roots (4 and 6) lie beyond t_max
        assert!(sphere.intersect(&ray, Interval::new(0.001, 3.5)).is_none());
        // Near root excluded, far root accepted
        let rec = sphere.intersect(&ray, Interval::new(4.5, 10.0)).unwrap();
        assert!((rec.t - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_sphere_never_hits() {
        let sphere = Sphere::new(Vec3::ZERO, -1.0, Arc::new(Material::default()));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(sphere.radius(), 0.0);
        assert!(sphere.intersect(&ray, Interval::UNIVERSE).is_none());

        let zero_dir = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        assert!(unit_sphere().intersect(&zero_dir, Interval::UNIVERSE).is_none());
    }
}
