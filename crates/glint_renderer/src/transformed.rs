//! Affine transform wrapper around any primitive.
//!
//! Rays are moved into the child's object space with the inverse transform,
//! intersected there, and the hit is mapped back: points through the forward
//! matrix, normals through the inverse-transpose. The object-space direction
//! is left unnormalized so the hit parameter `t` is valid in both spaces.

use std::sync::Arc;

use glam::DMat3;

use crate::{
    hittable::{HitRecord, Hittable},
    Interval, Primitive, Ray, Transform,
};

/// A primitive placed in the world by an affine transform.
#[derive(Debug, Clone)]
pub struct Transformed {
    child: Arc<Primitive>,
    transform: Transform,
    normal_matrix: DMat3,
}

impl Transformed {
    /// Wrap `child` (which may be shared between several instances).
    pub fn new(child: impl Into<Arc<Primitive>>, transform: Transform) -> Self {
        Self {
            child: child.into(),
            normal_matrix: transform.normal_matrix(),
            transform,
        }
    }

    pub fn child(&self) -> &Primitive {
        &self.child
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl Hittable for Transformed {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let local_ray = Ray::new(
            self.transform.inverse_transform_point(ray.origin()),
            self.transform.inverse_transform_vector(ray.direction()),
        );

        let mut rec = self.child.intersect(&local_ray, ray_t)?;

        // The child's normal already opposes the local ray; the inverse-transpose
        // preserves the sign of dot(normal, direction), so front_face carries over.
        rec.p = self.transform.transform_point(rec.p);
        rec.normal = (self.normal_matrix * rec.normal).normalize_or_zero();

        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AaBox, Material, Sphere, Triangle, Vec3};
    use std::f64::consts::FRAC_PI_2;

    fn unit_sphere() -> Primitive {
        Sphere::new(Vec3::ZERO, 1.0, Arc::new(Material::default())).into()
    }

    fn hit_interval() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_translate_round_trip() {
        let offset = Vec3::new(3.0, -2.0, 1.0);
        let moved = Transformed::new(unit_sphere(), Transform::translate(offset));
        let plain = unit_sphere();

        let ray = Ray::new(Vec3::new(3.5, -1.8, 8.0), Vec3::new(0.0, 0.0, -1.0));
        let shifted = Ray::new(ray.origin() - offset, ray.direction());

        let world = moved.intersect(&ray, hit_interval()).unwrap();
        let local = plain.intersect(&shifted, hit_interval()).unwrap();

        assert!((world.t - local.t).abs() < 1e-9);
        assert!((world.p - (local.p + offset)).length() < 1e-9);
        assert!((world.normal - local.normal).length() < 1e-9);
    }

    #[test]
    fn test_rotated_normals_stay_unit() {
        let rotation = Transform::rotate_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.9).unwrap();
        let cube = AaBox::cube(Vec3::ZERO, 1.0, Arc::new(Material::default()));
        let rotated = Transformed::new(Primitive::from(cube), rotation);

        for origin in [Vec3::new(0.1, 0.2, 6.0), Vec3::new(5.0, 0.3, 0.2), Vec3::new(-0.2, -6.0, 0.4)] {
            let ray = Ray::new(origin, -origin);
            let rec = rotated.intersect(&ray, hit_interval()).unwrap();

            assert!((rec.normal.length() - 1.0).abs() < 1e-6);
            assert!(rec.normal.dot(ray.direction()) < 0.0);
        }
    }

    #[test]
    fn test_non_uniform_scale_normal() {
        // Sphere stretched into an ellipsoid with semi-axes (2, 1, 1)
        let scale = Transform::scale(Vec3::new(2.0, 1.0, 1.0)).unwrap();
        let ellipsoid = Transformed::new(unit_sphere(), scale);

        let ray = Ray::new(Vec3::new(1.0, 5.0, 0.0), Vec3::NEG_Y);
        let rec = ellipsoid.intersect(&ray, hit_interval()).unwrap();

        // Surface point (1, sqrt(3)/2, 0); gradient of x²/4 + y² is (x/2, 2y)
        let expected_y = 3.0_f64.sqrt() / 2.0;
        assert!((rec.p - Vec3::new(1.0, expected_y, 0.0)).length() < 1e-9);
        assert!((rec.t - (5.0 - expected_y)).abs() < 1e-9);

        let expected_normal = Vec3::new(0.5, 2.0 * expected_y, 0.0).normalize();
        assert!((rec.normal - expected_normal).length() < 1e-9);
    }

    #[test]
    fn test_t_matches_world_distance_under_scale() {
        let scaled = Transformed::new(unit_sphere(), Transform::scale(Vec3::splat(3.0)).unwrap());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);

        let rec = scaled.intersect(&ray, hit_interval()).unwrap();
        assert!((rec.t - 7.0).abs() < 1e-9);
        assert!((rec.p - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-9);
    }

    #[test]
    fn test_rotation_keeps_back_face_culling() {
        // Triangle facing +Z, rotated a quarter turn about Y to face +X
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Arc::new(Material::default()),
        );
        let turned = Transformed::new(Primitive::from(tri), Transform::rotate_y(FRAC_PI_2));

        let front = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X);
        let rec = turned.intersect(&front, hit_interval()).unwrap();
        assert!((rec.normal - Vec3::X).length() < 1e-9);

        let back = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert!(turned.intersect(&back, hit_interval()).is_none());
    }

    #[test]
    fn test_shared_child() {
        let child: Arc<Primitive> = Arc::new(unit_sphere());
        let left = Transformed::new(child.clone(), Transform::translate(Vec3::new(-2.0, 0.0, 0.0)));
        let right = Transformed::new(child, Transform::translate(Vec3::new(2.0, 0.0, 0.0)));

        let ray = Ray::new(Vec3::new(-2.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(left.intersect(&ray, hit_interval()).is_some());
        assert!(right.intersect(&ray, hit_interval()).is_none());
    }
}
