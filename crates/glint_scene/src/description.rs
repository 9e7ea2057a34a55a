//! Serde types mirroring the JSON scene format.
//!
//! These are plain data; validation and conversion into renderer types
//! happens in the loader. Vectors and colors are `[x, y, z]` arrays.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default = "default_ambient_light")]
    pub ambient_light: [f64; 3],
    #[serde(default)]
    pub background: BackgroundDescription,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDescription>,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
}

fn default_ambient_light() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDescription {
    pub look_from: [f64; 3],
    pub look_at: [f64; 3],
    #[serde(default = "default_up")]
    pub up: [f64; 3],
    /// Vertical field of view in degrees
    pub vfov: f64,
}

fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

/// Optional render defaults carried by the scene; command line flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSettings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum BackgroundDescription {
    Solid { color: [f64; 3] },
    Gradient { bottom: [f64; 3], top: [f64; 3] },
}

impl Default for BackgroundDescription {
    fn default() -> Self {
        BackgroundDescription::Solid { color: [0.0; 3] }
    }
}

/// A Phong material.
///
/// Either give `ambient` and `diffuse` explicitly or give `color`, which
/// derives both from one base color.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialDescription {
    pub color: Option<[f64; 3]>,
    pub ambient: Option<[f64; 3]>,
    pub diffuse: Option<[f64; 3]>,
    #[serde(default)]
    pub specular: [f64; 3],
    #[serde(default = "default_shininess")]
    pub shininess: f64,
    #[serde(default)]
    pub reflectivity: f64,
    #[serde(default)]
    pub emission: [f64; 3],
}

fn default_shininess() -> f64 {
    32.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDescription {
    #[serde(flatten)]
    pub shape: ShapeDescription,
    pub material: String,
    /// Applied outermost-first: the first step is applied last to points
    #[serde(default)]
    pub transform: Vec<TransformStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescription {
    Sphere { center: [f64; 3], radius: f64 },
    Plane { point: [f64; 3], normal: [f64; 3] },
    Box { min: [f64; 3], max: [f64; 3] },
    Triangle { vertices: [[f64; 3]; 3] },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum TransformStep {
    Translate([f64; 3]),
    Scale([f64; 3]),
    Rotate { axis: [f64; 3], degrees: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum LightDescription {
    Point {
        position: [f64; 3],
        intensity: [f64; 3],
        #[serde(default)]
        attenuation: AttenuationDescription,
    },
    Area {
        corner: [f64; 3],
        u: [f64; 3],
        v: [f64; 3],
        intensity: [f64; 3],
        #[serde(default = "default_area_samples")]
        samples: [u32; 2],
        #[serde(default)]
        attenuation: AttenuationDescription,
    },
}

fn default_area_samples() -> [u32; 2] {
    [4, 4]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttenuationDescription {
    #[default]
    None,
    InverseSquare,
}
