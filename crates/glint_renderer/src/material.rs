//! Phong surface materials.

use crate::Color;

/// Phong material shared (via `Arc`) by any number of primitives.
///
/// Immutable once built. `reflectivity` blends the locally shaded color
/// with a mirror-reflected trace: 0 is opaque, 1 is a perfect mirror.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Ka - ambient response, tinted by the scene's ambient light
    pub ambient: Color,
    /// Kd - Lambertian response
    pub diffuse: Color,
    /// Ks - specular highlight response
    pub specular: Color,
    /// Phong exponent
    pub shininess: f64,
    /// Mirror blend factor in [0, 1]
    pub reflectivity: f64,
    /// Light emitted by the surface (visible lamps)
    pub emission: Color,
}

impl Material {
    /// Create an opaque, non-emissive Phong material.
    pub fn new(ambient: Color, diffuse: Color, specular: Color, shininess: f64) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess: shininess.max(0.0),
            reflectivity: 0.0,
            emission: Color::ZERO,
        }
    }

    /// Derive ambient and diffuse terms from one base color.
    pub fn from_color(base: Color, specular: Color, shininess: f64) -> Self {
        Self::new(base * 0.1, base * 0.7, specular, shininess)
    }

    /// Set the mirror blend factor, clamped to [0, 1].
    pub fn with_reflectivity(mut self, reflectivity: f64) -> Self {
        self.reflectivity = reflectivity.clamp(0.0, 1.0);
        self
    }

    /// Set the emitted color. Negative channels are clamped to zero.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission.max(Color::ZERO);
        self
    }

    /// True if the material reflects any light from mirror rays.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }

    /// True if the surface is a light source. Emissive surfaces never cast shadows.
    pub fn is_emissive(&self) -> bool {
        self.emission.max_element() > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::from_color(Color::splat(0.5), Color::splat(0.5), 32.0)
    }
}
