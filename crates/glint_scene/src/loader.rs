//! Scene loading: JSON text to a renderable `Scene`.
//!
//! Materials are resolved by name and shared between objects. Any
//! reference to an undefined material fails the whole load.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use glint_renderer::{
    AaBox, AreaLight, Attenuation, Background, Camera, Color, Light, Material, Plane, PointLight,
    Primitive, Scene, Sphere, Transform, TransformError, Transformed, Triangle, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::description::{
    AttenuationDescription, BackgroundDescription, CameraDescription, LightDescription,
    MaterialDescription, ObjectDescription, RenderSettings, SceneDescription, ShapeDescription,
    TransformStep,
};

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Object {object} references unknown material '{name}'")]
    UnknownMaterial { object: usize, name: String },

    #[error("Invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("Invalid transform: {0}")]
    Transform(#[from] TransformError),

    #[error("Area light {0} has zero samples along an edge")]
    ZeroLightSamples(usize),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, SceneError>;

/// A scene ready to render, plus the view and render defaults it came with.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub scene: Scene,
    pub camera: CameraDescription,
    pub render: RenderSettings,
}

impl CameraDescription {
    /// Build a camera for an image of the given aspect ratio.
    pub fn build(&self, aspect_ratio: f64) -> Camera {
        Camera::new(
            Vec3::from(self.look_from),
            Vec3::from(self.look_at),
            Vec3::from(self.up),
            self.vfov,
            aspect_ratio,
        )
    }
}

/// Load a scene file from disk.
///
/// `seed` drives the jitter of area light samples.
pub fn load_scene<P: AsRef<Path>>(path: P, seed: u64) -> LoadResult<LoadedScene> {
    let path = path.as_ref();
    log::info!("Loading scene {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_scene(&content, seed)
}

/// Parse a scene from JSON text.
pub fn parse_scene(json: &str, seed: u64) -> LoadResult<LoadedScene> {
    let description: SceneDescription = serde_json::from_str(json)?;
    build_scene(description, seed)
}

/// Convert a parsed description into a scene.
pub fn build_scene(description: SceneDescription, seed: u64) -> LoadResult<LoadedScene> {
    let mut materials = HashMap::with_capacity(description.materials.len());
    for (name, desc) in &description.materials {
        materials.insert(name.as_str(), Arc::new(build_material(name, desc)?));
    }

    let mut builder = Scene::builder();
    builder
        .ambient_light(Color::from(description.ambient_light))
        .background(build_background(&description.background));

    for (index, object) in description.objects.iter().enumerate() {
        let material = materials.get(object.material.as_str()).cloned().ok_or_else(|| {
            SceneError::UnknownMaterial {
                object: index,
                name: object.material.clone(),
            }
        })?;
        let primitive = build_object(object, material)?;
        log::debug!("Object {index}: {} ({})", primitive.kind(), object.material);
        builder.add_primitive(primitive);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for (index, light) in description.lights.iter().enumerate() {
        builder.add_light(build_light(index, light, &mut rng)?);
    }

    log::info!(
        "Loaded {} materials, {} objects, {} lights",
        materials.len(),
        description.objects.len(),
        description.lights.len()
    );

    Ok(LoadedScene {
        scene: builder.build(),
        camera: description.camera,
        render: description.render,
    })
}

fn build_material(name: &str, desc: &MaterialDescription) -> LoadResult<Material> {
    let invalid = |reason: &str| SceneError::InvalidMaterial {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut colors = vec![("specular", desc.specular), ("emission", desc.emission)];
    colors.extend(desc.color.map(|c| ("color", c)));
    colors.extend(desc.ambient.map(|c| ("ambient", c)));
    colors.extend(desc.diffuse.map(|c| ("diffuse", c)));
    for (field, c) in colors {
        if c.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(invalid(&format!("{field} must be finite and non-negative")));
        }
    }
    if !desc.shininess.is_finite() || desc.shininess < 0.0 {
        return Err(invalid("shininess must be finite and non-negative"));
    }
    if !(0.0..=1.0).contains(&desc.reflectivity) {
        return Err(invalid("reflectivity must be in [0, 1]"));
    }

    let specular = Color::from(desc.specular);
    let material = match (desc.color, desc.ambient, desc.diffuse) {
        (Some(base), None, None) => Material::from_color(Color::from(base), specular, desc.shininess),
        (Some(_), _, _) => return Err(invalid("color cannot be combined with ambient or diffuse")),
        (None, ambient, diffuse) => Material::new(
            ambient.map_or(Color::ZERO, Color::from),
            diffuse.map_or(Color::ZERO, Color::from),
            specular,
            desc.shininess,
        ),
    };

    Ok(material
        .with_reflectivity(desc.reflectivity)
        .with_emission(Color::from(desc.emission)))
}

fn build_background(desc: &BackgroundDescription) -> Background {
    match *desc {
        BackgroundDescription::Solid { color } => Background::Solid(Color::from(color)),
        BackgroundDescription::Gradient { bottom, top } => Background::Gradient {
            bottom: Color::from(bottom),
            top: Color::from(top),
        },
    }
}

fn build_object(object: &ObjectDescription, material: Arc<Material>) -> LoadResult<Primitive> {
    let primitive: Primitive = match object.shape {
        ShapeDescription::Sphere { center, radius } => {
            Sphere::new(Vec3::from(center), radius, material).into()
        }
        ShapeDescription::Plane { point, normal } => {
            Plane::new(Vec3::from(point), Vec3::from(normal), material).into()
        }
        ShapeDescription::Box { min, max } => {
            AaBox::new(Vec3::from(min), Vec3::from(max), material).into()
        }
        ShapeDescription::Triangle { vertices: [a, b, c] } => {
            Triangle::new(Vec3::from(a), Vec3::from(b), Vec3::from(c), material).into()
        }
    };

    if object.transform.is_empty() {
        return Ok(primitive);
    }

    let transform = build_transform(&object.transform)?;
    Ok(Transformed::new(primitive, transform).into())
}

/// Compose steps listed outermost-first into one transform.
pub fn build_transform(steps: &[TransformStep]) -> LoadResult<Transform> {
    let mut transform = Transform::IDENTITY;
    for step in steps {
        let next = match *step {
            TransformStep::Translate(offset) => Transform::translate(Vec3::from(offset)),
            TransformStep::Scale(factors) => Transform::scale(Vec3::from(factors))?,
            TransformStep::Rotate { axis, degrees } => {
                Transform::rotate_axis_angle(Vec3::from(axis), degrees.to_radians())?
            }
        };
        transform = transform * next;
    }
    Ok(transform)
}

fn build_light(index: usize, light: &LightDescription, rng: &mut StdRng) -> LoadResult<Light> {
    let light = match *light {
        LightDescription::Point {
            position,
            intensity,
            attenuation,
        } => PointLight::new(Vec3::from(position), Color::from(intensity))
            .with_attenuation(build_attenuation(attenuation))
            .into(),
        LightDescription::Area {
            corner,
            u,
            v,
            intensity,
            samples: [samples_u, samples_v],
            attenuation,
        } => {
            if samples_u == 0 || samples_v == 0 {
                return Err(SceneError::ZeroLightSamples(index));
            }
            AreaLight::new(
                Vec3::from(corner),
                Vec3::from(u),
                Vec3::from(v),
                Color::from(intensity),
                (samples_u, samples_v),
                build_attenuation(attenuation),
                rng,
            )
            .into()
        }
    };
    Ok(light)
}

fn build_attenuation(desc: AttenuationDescription) -> Attenuation {
    match desc {
        AttenuationDescription::None => Attenuation::None,
        AttenuationDescription::InverseSquare => Attenuation::InverseSquare,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_renderer::{Interval, Ray};

    const MINIMAL: &str = r#"{
        "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 60 },
        "materials": { "red": { "color": [0.8, 0.2, 0.2], "specular": [0.5, 0.5, 0.5] } },
        "objects": [ { "type": "sphere", "center": [0, 0, -5], "radius": 1, "material": "red" } ],
        "lights": [ { "type": "point", "position": [5, 5, 5], "intensity": [1, 1, 1] } ]
    }"#;

    fn scene_with(objects: &str, lights: &str) -> String {
        format!(
            r#"{{
                "camera": {{ "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 60 }},
                "materials": {{ "grey": {{ "color": [0.5, 0.5, 0.5] }} }},
                "objects": {objects},
                "lights": {lights}
            }}"#
        )
    }

    #[test]
    fn test_parse_minimal_scene() {
        let _ = env_logger::builder().is_test(true).try_init();
        let loaded = parse_scene(MINIMAL, 0).unwrap();

        assert_eq!(loaded.scene.primitives().len(), 1);
        assert_eq!(loaded.scene.lights().len(), 1);
        assert_eq!(loaded.scene.ambient_light(), Color::ONE);
        assert_eq!(loaded.camera.up, [0.0, 1.0, 0.0]);
        assert_eq!(loaded.render, RenderSettings::default());

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = loaded.scene.nearest_hit(&ray, Interval::new(1e-3, f64::INFINITY)).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-9);
        assert!((hit.material.diffuse - Color::new(0.56, 0.14, 0.14)).length() < 1e-12);
    }

    #[test]
    fn test_unknown_material_fails() {
        let json = scene_with(
            r#"[ { "type": "sphere", "center": [0, 0, -5], "radius": 1, "material": "gold" } ]"#,
            "[]",
        );
        let err = parse_scene(&json, 0).unwrap_err();
        assert!(
            matches!(err, SceneError::UnknownMaterial { object: 0, ref name } if name == "gold")
        );
    }

    #[test]
    fn test_invalid_material_values() {
        let json = r#"{
            "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 60 },
            "materials": { "bad": { "color": [1, 1, 1], "reflectivity": 1.5 } }
        }"#;
        let err = parse_scene(json, 0).unwrap_err();
        assert!(matches!(err, SceneError::InvalidMaterial { ref name, .. } if name == "bad"));

        let json = r#"{
            "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 60 },
            "materials": { "bad": { "diffuse": [1, -1, 1] } }
        }"#;
        assert!(matches!(parse_scene(json, 0), Err(SceneError::InvalidMaterial { .. })));

        let json = r#"{
            "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 60 },
            "materials": { "bad": { "color": [1, 1, 1], "diffuse": [1, 1, 1] } }
        }"#;
        assert!(matches!(parse_scene(json, 0), Err(SceneError::InvalidMaterial { .. })));
    }

    #[test]
    fn test_explicit_material_terms() {
        let json = r#"{
            "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 60 },
            "materials": { "lamp": { "diffuse": [0.2, 0.2, 0.2], "emission": [4, 4, 4] } },
            "objects": [ { "type": "sphere", "center": [0, 0, -5], "radius": 1, "material": "lamp" } ]
        }"#;
        let loaded = parse_scene(json, 0).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = loaded.scene.nearest_hit(&ray, Interval::new(1e-3, f64::INFINITY)).unwrap();

        assert_eq!(hit.material.ambient, Color::ZERO);
        assert_eq!(hit.material.diffuse, Color::splat(0.2));
        assert!(hit.material.is_emissive());
        assert!((hit.material.shininess - 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_scene("{ not json", 0), Err(SceneError::Json(_))));
        // Camera is required
        assert!(matches!(parse_scene("{}", 0), Err(SceneError::Json(_))));
    }

    #[test]
    fn test_transform_steps_outermost_first() {
        // Scale first, then translate: box spans z in [-6, -4]
        let json = scene_with(
            r#"[ {
                "type": "box", "min": [-0.5, -0.5, -0.5], "max": [0.5, 0.5, 0.5],
                "material": "grey",
                "transform": [ { "translate": [0, 0, -5] }, { "scale": [2, 2, 2] } ]
            } ]"#,
            "[]",
        );
        let loaded = parse_scene(&json, 0).unwrap();
        assert!(matches!(loaded.scene.primitives()[0], Primitive::Transformed(_)));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = loaded.scene.nearest_hit(&ray, Interval::new(1e-3, f64::INFINITY)).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-9);
        assert!((hit.normal - Vec3::Z).length() < 1e-9);
    }

    #[test]
    fn test_rotate_step_in_degrees() {
        let transform = build_transform(&[TransformStep::Rotate {
            axis: [0.0, 1.0, 0.0],
            degrees: 90.0,
        }])
        .unwrap();
        let p = transform.transform_point(Vec3::X);
        assert!((p - Vec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn test_degenerate_transform_fails() {
        let json = scene_with(
            r#"[ {
                "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "grey",
                "transform": [ { "scale": [1, 0, 1] } ]
            } ]"#,
            "[]",
        );
        assert!(matches!(
            parse_scene(&json, 0),
            Err(SceneError::Transform(TransformError::DegenerateScale(_)))
        ));

        let json = scene_with(
            r#"[ {
                "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "grey",
                "transform": [ { "rotate": { "axis": [0, 0, 0], "degrees": 30 } } ]
            } ]"#,
            "[]",
        );
        assert!(matches!(
            parse_scene(&json, 0),
            Err(SceneError::Transform(TransformError::DegenerateAxis))
        ));
    }

    #[test]
    fn test_area_light_samples() {
        let json = scene_with(
            "[]",
            r#"[ {
                "type": "area", "corner": [-1, 5, -1], "u": [2, 0, 0], "v": [0, 0, 2],
                "intensity": [1, 1, 1], "samples": [2, 3], "attenuation": "inverse_square"
            } ]"#,
        );
        let loaded = parse_scene(&json, 7).unwrap();
        let emitters = loaded.scene.lights()[0].emitters();
        assert_eq!(emitters.len(), 6);
        assert!(emitters.iter().all(|e| e.attenuation == Attenuation::InverseSquare));

        // Same seed, same jitter
        let again = parse_scene(&json, 7).unwrap();
        assert_eq!(again.scene.lights()[0].emitters(), emitters);
    }

    #[test]
    fn test_zero_area_light_samples_fails() {
        let json = scene_with(
            "[]",
            r#"[
                { "type": "point", "position": [0, 5, 0], "intensity": [1, 1, 1] },
                { "type": "area", "corner": [0, 5, 0], "u": [1, 0, 0], "v": [0, 0, 1],
                  "intensity": [1, 1, 1], "samples": [0, 4] }
            ]"#,
        );
        assert!(matches!(parse_scene(&json, 0), Err(SceneError::ZeroLightSamples(1))));
    }

    #[test]
    fn test_background_and_render_settings() {
        let json = r#"{
            "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 60 },
            "render": { "width": 320, "samples_per_pixel": 9 },
            "background": { "type": "gradient", "bottom": [1, 1, 1], "top": [0.5, 0.7, 1.0] }
        }"#;
        let loaded = parse_scene(json, 0).unwrap();

        assert_eq!(loaded.scene.background(), Background::SKY);
        assert_eq!(loaded.render.width, Some(320));
        assert_eq!(loaded.render.height, None);
        assert_eq!(loaded.render.samples_per_pixel, Some(9));
    }

    #[test]
    fn test_camera_build() {
        let loaded = parse_scene(MINIMAL, 0).unwrap();
        let camera = loaded.camera.build(1.0);
        let ray = camera.get_ray(0.5, 0.5);

        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction().normalize() - Vec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn test_load_scene_missing_file() {
        let err = load_scene("/nonexistent/glint/scene.json", 0).unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
    }
}
