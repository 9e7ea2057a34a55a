//! The closed set of renderable primitives.

use crate::{
    hittable::{HitRecord, Hittable},
    AaBox, Interval, Plane, Ray, Sphere, Transformed, Triangle,
};

/// Any primitive glint can intersect.
///
/// Dispatch is a `match` over a fixed variant set; new shapes are added here
/// rather than through open-ended trait objects.
#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Box(AaBox),
    Triangle(Triangle),
    Transformed(Transformed),
}

impl Primitive {
    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Sphere(_) => "sphere",
            Primitive::Plane(_) => "plane",
            Primitive::Box(_) => "box",
            Primitive::Triangle(_) => "triangle",
            Primitive::Transformed(_) => "transformed",
        }
    }
}

impl Hittable for Primitive {
    #[inline]
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(s) => s.intersect(ray, ray_t),
            Primitive::Plane(p) => p.intersect(ray, ray_t),
            Primitive::Box(b) => b.intersect(ray, ray_t),
            Primitive::Triangle(t) => t.intersect(ray, ray_t),
            Primitive::Transformed(t) => t.intersect(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Self {
        Primitive::Sphere(s)
    }
}

impl From<Plane> for Primitive {
    fn from(p: Plane) -> Self {
        Primitive::Plane(p)
    }
}

impl From<AaBox> for Primitive {
    fn from(b: AaBox) -> Self {
        Primitive::Box(b)
    }
}

impl From<Triangle> for Primitive {
    fn from(t: Triangle) -> Self {
        Primitive::Triangle(t)
    }
}

impl From<Transformed> for Primitive {
    fn from(t: Transformed) -> Self {
        Primitive::Transformed(t)
    }
}
