//! Axis-aligned box primitive.
//!
//! Uses the slab method: the ray is clipped against the pair of planes
//! bounding each axis and the resulting parameter ranges are intersected.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Interval, Material, Point3, Ray, Vec3,
};

/// Direction components smaller than this are treated as parallel to a slab.
pub const SLAB_EPSILON: f64 = 1e-8;

/// An axis-aligned box spanning `min` to `max`.
#[derive(Debug, Clone)]
pub struct AaBox {
    min: Point3,
    max: Point3,
    material: Arc<Material>,
}

/// Which face of the box a slab bound came from.
#[derive(Debug, Clone, Copy)]
struct Face {
    axis: usize,
    /// Sign of the ray direction on `axis`
    sign: f64,
}

impl AaBox {
    /// Create a box from two opposite corners, in any order.
    pub fn new(a: Point3, b: Point3, material: Arc<Material>) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            material,
        }
    }

    /// A cube centered at `center` with half side length `half_len`.
    pub fn cube(center: Point3, half_len: f64, material: Arc<Material>) -> Self {
        let h = Vec3::splat(half_len.abs());
        Self::new(center - h, center + h, material)
    }

    pub fn min(&self) -> Point3 {
        self.min
    }

    pub fn max(&self) -> Point3 {
        self.max
    }
}

impl Hittable for AaBox {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let origin = ray.origin();
        let dir = ray.direction();

        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;
        let mut near_face: Option<Face> = None;
        let mut far_face: Option<Face> = None;

        for axis in 0..3 {
            let (o, d) = (origin[axis], dir[axis]);
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < SLAB_EPSILON {
                // Parallel to this slab: either always inside it or never
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv_d = 1.0 / d;
            let mut t0 = (lo - o) * inv_d;
            let mut t1 = (hi - o) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            let face = Face {
                axis,
                sign: d.signum(),
            };
            if t0 > t_near {
                t_near = t0;
                near_face = Some(face);
            }
            if t1 < t_far {
                t_far = t1;
                far_face = Some(face);
            }
            if t_near > t_far {
                return None;
            }
        }

        // Entering hit from outside, otherwise the exit from inside
        let (t, face, outward_sign) = match (near_face, far_face) {
            (Some(face), _) if ray_t.surrounds(t_near) => (t_near, face, -1.0),
            (_, Some(face)) if ray_t.surrounds(t_far) => (t_far, face, 1.0),
            _ => return None,
        };

        let mut outward_normal = Vec3::ZERO;
        outward_normal[face.axis] = outward_sign * face.sign;

        Some(HitRecord::new(ray, t, outward_normal, &self.material))
    }
}
