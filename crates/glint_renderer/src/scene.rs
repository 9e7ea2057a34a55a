//! Scene container and the queries the integrator runs against it.
//!
//! Traversal is linear over all primitives in insertion order.

use crate::{
    hittable::{HitRecord, Hittable},
    Color, Interval, Light, Point3, PointLight, Primitive, Ray,
};

/// Offset applied to shadow ray origins and bounds to avoid self-intersection.
pub const SHADOW_EPSILON: f64 = 1e-3;

/// What a ray that hits nothing sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Solid(Color),
    /// Vertical blend on the unit ray direction, `bottom` at y=-1, `top` at y=+1
    Gradient { bottom: Color, top: Color },
}

impl Background {
    /// Sky gradient from white to light blue.
    pub const SKY: Background = Background::Gradient {
        bottom: Color::ONE,
        top: Color::new(0.5, 0.7, 1.0),
    };

    pub fn color(&self, ray: &Ray) -> Color {
        match *self {
            Background::Solid(color) => color,
            Background::Gradient { bottom, top } => {
                let Some(unit_direction) = ray.direction().try_normalize() else {
                    return bottom.lerp(top, 0.5);
                };
                let a = 0.5 * (unit_direction.y + 1.0);
                bottom * (1.0 - a) + top * a
            }
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::ZERO)
    }
}

/// An immutable, thread-safe scene: primitives, lights and ambient light.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
    ambient_light: Color,
    background: Background,
}

impl Scene {
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn ambient_light(&self) -> Color {
        self.ambient_light
    }

    pub fn background(&self) -> Background {
        self.background
    }

    /// Color seen by a ray that escapes the scene.
    pub fn background_color(&self, ray: &Ray) -> Color {
        self.background.color(ray)
    }

    /// Closest hit over all primitives with `t` strictly inside `ray_t`.
    ///
    /// Each test is bounded by the closest `t` found so far, so a farther
    /// primitive can never replace a nearer one, and on an exact tie the
    /// earlier-inserted primitive wins.
    pub fn nearest_hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for primitive in &self.primitives {
            let interval = ray_t.with_max(closest.as_ref().map_or(ray_t.max, |rec| rec.t));
            if let Some(rec) = primitive.intersect(ray, interval) {
                closest = Some(rec);
            }
        }

        closest
    }

    /// True if something opaque lies between `point` and `light`.
    ///
    /// Hits on emissive surfaces are ignored so visible lamp geometry does
    /// not shadow the light it represents.
    pub fn is_shadowed(&self, point: Point3, light: &PointLight) -> bool {
        let direction = light.direction_from(point);
        let distance = light.distance_to(point);
        if distance <= 2.0 * SHADOW_EPSILON {
            return false;
        }

        let shadow_ray = Ray::new(point + SHADOW_EPSILON * direction, direction);
        let interval = Interval::new(SHADOW_EPSILON, distance - SHADOW_EPSILON);

        self.primitives.iter().any(|primitive| {
            primitive
                .intersect(&shadow_ray, interval)
                .is_some_and(|rec| !rec.material.is_emissive())
        })
    }
}

/// Collects primitives and lights, then freezes them into a [`Scene`].
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    pub fn add_primitive(&mut self, primitive: impl Into<Primitive>) -> &mut Self {
        self.scene.primitives.push(primitive.into());
        self
    }

    pub fn add_light(&mut self, light: impl Into<Light>) -> &mut Self {
        self.scene.lights.push(light.into());
        self
    }

    pub fn ambient_light(&mut self, color: Color) -> &mut Self {
        self.scene.ambient_light = color;
        self
    }

    pub fn background(&mut self, background: Background) -> &mut Self {
        self.scene.background = background;
        self
    }

    pub fn build(&mut self) -> Scene {
        let scene = std::mem::take(&mut self.scene);
        log::info!(
            "Built scene: {} primitives, {} lights ({} emitters)",
            scene.primitives.len(),
            scene.lights.len(),
            scene.lights.iter().map(|l| l.emitters().len()).sum::<usize>()
        );
        scene
    }
}
