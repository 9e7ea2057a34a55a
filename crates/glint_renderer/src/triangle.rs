//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection, with
//! back-face culling: only rays approaching against the face normal hit.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Interval, Material, Point3, Ray, Vec3,
};

/// Determinants below this are rejected (back faces and grazing rays).
pub const CULL_EPSILON: f64 = 1e-8;

/// A flat-shaded, single-sided triangle.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: Point3,
    v1: Point3,
    v2: Point3,
    /// Pre-computed edges v1 - v0 and v2 - v0
    edge1: Vec3,
    edge2: Vec3,
    /// Pre-computed face normal (unit length, counter-clockwise winding)
    normal: Vec3,
    material: Arc<Material>,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The front face is the one from which `v0, v1, v2` appear counter-clockwise.
    pub fn new(v0: Point3, v1: Point3, v2: Point3, material: Arc<Material>) -> Self {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let normal = edge1.cross(edge2).normalize_or_zero();
        if normal == Vec3::ZERO {
            log::warn!("Degenerate triangle ({v0}, {v1}, {v2}) has zero area; it will never be hit");
        }

        Self {
            v0,
            v1,
            v2,
            edge1,
            edge2,
            normal,
            material,
        }
    }

    pub fn vertices(&self) -> [Point3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let pvec = ray.direction().cross(self.edge2);
        let det = self.edge1.dot(pvec);

        // Back face, parallel ray or zero-area triangle
        if det < CULL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let tvec = ray.origin() - self.v0;
        let u = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(self.edge1);
        let v = ray.direction().dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = self.edge2.dot(qvec) * inv_det;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, &self.material))
    }
}
