//! Light sources.
//!
//! Every light is ultimately evaluated as one or more point emitters: a
//! [`PointLight`] is its own single emitter, an [`AreaLight`] is a fixed set
//! of jittered point samples chosen when the light is built.

use rand::Rng;

use crate::{Color, Point3, Vec3};

/// How a point light's intensity falls off with distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Attenuation {
    /// Constant intensity at any distance
    #[default]
    None,
    /// Intensity divided by squared distance
    InverseSquare,
}

/// Distances below this are clamped when attenuating, to avoid infinities.
const MIN_ATTENUATION_DISTANCE: f64 = 1e-4;

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point3,
    pub intensity: Color,
    pub attenuation: Attenuation,
}

impl PointLight {
    pub fn new(position: Point3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
            attenuation: Attenuation::None,
        }
    }

    pub fn with_attenuation(mut self, attenuation: Attenuation) -> Self {
        self.attenuation = attenuation;
        self
    }

    /// Unit direction from `point` toward the light (zero if they coincide).
    pub fn direction_from(&self, point: Point3) -> Vec3 {
        (self.position - point).normalize_or_zero()
    }

    pub fn distance_to(&self, point: Point3) -> f64 {
        self.position.distance(point)
    }

    /// Intensity arriving at `point`.
    pub fn intensity_at(&self, point: Point3) -> Color {
        match self.attenuation {
            Attenuation::None => self.intensity,
            Attenuation::InverseSquare => {
                let d = self.distance_to(point).max(MIN_ATTENUATION_DISTANCE);
                self.intensity / (d * d)
            }
        }
    }
}

/// A rectangular light spanning `corner + s*u + t*v` for `s, t` in [0, 1].
///
/// Approximated by `samples_u * samples_v` point emitters, one per cell of a
/// stratified grid, each carrying an equal share of the total intensity.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaLight {
    corner: Point3,
    u: Vec3,
    v: Vec3,
    intensity: Color,
    emitters: Vec<PointLight>,
}

impl AreaLight {
    /// Build an area light, jittering each sample inside its cell with `rng`.
    ///
    /// Sample counts of zero are raised to one.
    pub fn new<R: Rng>(
        corner: Point3,
        u: Vec3,
        v: Vec3,
        intensity: Color,
        (samples_u, samples_v): (u32, u32),
        attenuation: Attenuation,
        rng: &mut R,
    ) -> Self {
        let samples_u = samples_u.max(1);
        let samples_v = samples_v.max(1);
        let share = intensity / f64::from(samples_u * samples_v);

        let mut emitters = Vec::with_capacity((samples_u * samples_v) as usize);
        for i in 0..samples_u {
            for j in 0..samples_v {
                let su = (f64::from(i) + rng.gen::<f64>()) / f64::from(samples_u);
                let sv = (f64::from(j) + rng.gen::<f64>()) / f64::from(samples_v);
                let position = corner + su * u + sv * v;
                emitters.push(PointLight::new(position, share).with_attenuation(attenuation));
            }
        }

        Self {
            corner,
            u,
            v,
            intensity,
            emitters,
        }
    }

    pub fn center(&self) -> Point3 {
        self.corner + 0.5 * (self.u + self.v)
    }

    pub fn area(&self) -> f64 {
        self.u.cross(self.v).length()
    }

    /// Total intensity over all emitters.
    pub fn intensity(&self) -> Color {
        self.intensity
    }

    pub fn emitters(&self) -> &[PointLight] {
        &self.emitters
    }
}

/// Any light in a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Point(PointLight),
    Area(AreaLight),
}

impl Light {
    /// The point emitters this light is evaluated as.
    pub fn emitters(&self) -> &[PointLight] {
        match self {
            Light::Point(p) => std::slice::from_ref(p),
            Light::Area(a) => a.emitters(),
        }
    }
}

impl From<PointLight> for Light {
    fn from(p: PointLight) -> Self {
        Light::Point(p)
    }
}

impl From<AreaLight> for Light {
    fn from(a: AreaLight) -> Self {
        Light::Area(a)
    }
}
