//! JSON scene loading.
//!
//! Converts a scene file into a [`SceneDescription`]. The file layout is:
//!
//! ```json
//! {
//!   "camera": { "position": {"x":0,"y":1,"z":5}, "look_at": {"x":0,"y":0,"z":0},
//!               "up": {"x":0,"y":1,"z":0}, "fov": 60, "aspect_ratio": 1.333 },
//!   "materials": { "mirror": { "color": {"x":1,"y":1,"z":1}, "reflectivity": 0.9 } },
//!   "objects": [
//!     { "type": "sphere", "center": {"x":0,"y":0,"z":0}, "radius": 1, "material": "mirror" },
//!     { "type": "plane", "point": {"x":0,"y":-1,"z":0}, "normal": {"x":0,"y":1,"z":0},
//!       "material": { "color": {"x":0.8,"y":0.8,"z":0.8} } }
//!   ],
//!   "lights": [ { "position": {"x":5,"y":5,"z":5}, "intensity": 1.0 } ],
//!   "background_color": {"x":0.1,"y":0.1,"z":0.1}
//! }
//! ```
//!
//! Objects referring to the same named material share one `Arc<Material>`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use fovea_math::Vector3;
use serde::Deserialize;
use thiserror::Error;

use crate::scene::{CameraSettings, Light, Material, SceneDescription, Shape};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material reference: {0}")]
    UnknownMaterial(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file and return its description.
///
/// The scene is named after the file stem.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let contents = std::fs::read_to_string(path)?;
    let raw: RawScene = serde_json::from_str(&contents)?;
    let scene = raw.into_scene(name)?;

    log::info!(
        "Loaded scene '{}' from {}: {} objects, {} lights",
        scene.name,
        path.display(),
        scene.object_count(),
        scene.light_count()
    );

    Ok(scene)
}

/// Parse a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> LoadResult<SceneDescription> {
    let raw: RawScene = serde_json::from_str(json)?;
    raw.into_scene("unnamed")
}

#[derive(Deserialize, Debug, Clone, Copy)]
struct RawVector {
    x: f64,
    y: f64,
    z: f64,
}

impl From<RawVector> for Vector3 {
    fn from(v: RawVector) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

#[derive(Deserialize, Debug)]
struct RawCamera {
    position: RawVector,
    look_at: RawVector,
    up: RawVector,
    fov: f64,
    aspect_ratio: f64,
}

impl From<RawCamera> for CameraSettings {
    fn from(c: RawCamera) -> Self {
        Self {
            position: c.position.into(),
            look_at: c.look_at.into(),
            up: c.up.into(),
            fov: c.fov,
            aspect_ratio: c.aspect_ratio,
        }
    }
}

fn default_ambient() -> f64 {
    0.1
}

fn default_diffuse() -> f64 {
    0.7
}

fn default_specular() -> f64 {
    0.2
}

fn default_shininess() -> f64 {
    32.0
}

fn default_intensity() -> f64 {
    1.0
}

#[derive(Deserialize, Debug)]
struct RawMaterial {
    color: RawVector,
    #[serde(default = "default_ambient")]
    ambient: f64,
    #[serde(default = "default_diffuse")]
    diffuse: f64,
    #[serde(default = "default_specular")]
    specular: f64,
    #[serde(default = "default_shininess")]
    shininess: f64,
    #[serde(default)]
    reflectivity: f64,
}

impl From<&RawMaterial> for Material {
    fn from(m: &RawMaterial) -> Self {
        Material {
            color: m.color.into(),
            ambient: m.ambient,
            diffuse: m.diffuse,
            specular: m.specular,
            shininess: m.shininess,
            reflectivity: 0.0,
        }
        .with_reflectivity(m.reflectivity)
    }
}

/// Either the name of an entry in `materials` or an inline definition.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawMaterialRef {
    Named(String),
    Inline(RawMaterial),
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawShape {
    Sphere {
        center: RawVector,
        radius: f64,
    },
    Plane {
        point: RawVector,
        normal: RawVector,
    },
    Box {
        min: RawVector,
        max: RawVector,
    },
    Cone {
        center: RawVector,
        radius: f64,
        height: f64,
    },
}

impl From<RawShape> for Shape {
    fn from(s: RawShape) -> Self {
        match s {
            RawShape::Sphere { center, radius } => Shape::Sphere {
                center: center.into(),
                radius,
            },
            RawShape::Plane { point, normal } => Shape::Plane {
                point: point.into(),
                normal: normal.into(),
            },
            RawShape::Box { min, max } => Shape::Box {
                min: min.into(),
                max: max.into(),
            },
            RawShape::Cone {
                center,
                radius,
                height,
            } => Shape::Cone {
                center: center.into(),
                radius,
                height,
            },
        }
    }
}

#[derive(Deserialize, Debug)]
struct RawObject {
    #[serde(flatten)]
    shape: RawShape,
    material: RawMaterialRef,
}

#[derive(Deserialize, Debug)]
struct RawLight {
    position: RawVector,
    #[serde(default = "default_intensity")]
    intensity: f64,
}

#[derive(Deserialize, Debug)]
struct RawScene {
    camera: RawCamera,
    #[serde(default)]
    materials: HashMap<String, RawMaterial>,
    #[serde(default)]
    objects: Vec<RawObject>,
    #[serde(default)]
    lights: Vec<RawLight>,
    #[serde(default)]
    background_color: Option<RawVector>,
}

impl RawScene {
    fn into_scene(self, name: &str) -> LoadResult<SceneDescription> {
        let named: HashMap<String, Arc<Material>> = self
            .materials
            .iter()
            .map(|(name, raw)| (name.clone(), Arc::new(Material::from(raw))))
            .collect();

        let mut scene = SceneDescription::new(name, self.camera.into());
        if let Some(background) = self.background_color {
            scene = scene.with_background(background.into());
        }

        for object in self.objects {
            let material = match &object.material {
                RawMaterialRef::Named(key) => named
                    .get(key)
                    .cloned()
                    .ok_or_else(|| LoadError::UnknownMaterial(key.clone()))?,
                RawMaterialRef::Inline(raw) => Arc::new(Material::from(raw)),
            };
            scene.add_object(object.shape.into(), material);
        }

        for light in self.lights {
            scene.add_light(Light::new(light.position.into(), light.intensity));
        }

        log::debug!(
            "Resolved {} named materials for scene '{}'",
            named.len(),
            scene.name
        );

        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAMERA: &str = r#""camera": {
        "position": {"x": 0, "y": 1, "z": 5},
        "look_at": {"x": 0, "y": 0, "z": 0},
        "up": {"x": 0, "y": 1, "z": 0},
        "fov": 60,
        "aspect_ratio": 1.5
    }"#;

    #[test]
    fn test_load_minimal_scene() {
        let scene = load_scene_from_str(&format!("{{ {CAMERA} }}")).unwrap();

        assert_eq!(scene.name, "unnamed");
        assert_eq!(scene.camera.position, Vector3::new(0.0, 1.0, 5.0));
        assert_eq!(scene.camera.fov, 60.0);
        assert_eq!(scene.camera.aspect_ratio, 1.5);
        assert_eq!(scene.object_count(), 0);
        assert_eq!(scene.light_count(), 0);
        assert_eq!(scene.background, SceneDescription::DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_load_all_shape_kinds() {
        let json = format!(
            r#"{{ {CAMERA},
            "objects": [
                {{ "type": "sphere", "center": {{"x":0,"y":0,"z":0}}, "radius": 1.0,
                   "material": {{ "color": {{"x":1,"y":0,"z":0}} }} }},
                {{ "type": "plane", "point": {{"x":0,"y":-1,"z":0}}, "normal": {{"x":0,"y":1,"z":0}},
                   "material": {{ "color": {{"x":0.5,"y":0.5,"z":0.5}} }} }},
                {{ "type": "box", "min": {{"x":-1,"y":-1,"z":-1}}, "max": {{"x":1,"y":1,"z":1}},
                   "material": {{ "color": {{"x":0,"y":1,"z":0}} }} }},
                {{ "type": "cone", "center": {{"x":2,"y":0,"z":0}}, "radius": 0.5, "height": 2.0,
                   "material": {{ "color": {{"x":0,"y":0,"z":1}} }} }}
            ],
            "lights": [
                {{ "position": {{"x":5,"y":5,"z":5}} }},
                {{ "position": {{"x":-5,"y":5,"z":5}}, "intensity": 0.5 }}
            ],
            "background_color": {{"x":0,"y":0,"z":0}}
        }}"#
        );

        let scene = load_scene_from_str(&json).unwrap();
        let kinds: Vec<_> = scene.objects.iter().map(|o| o.shape.kind()).collect();
        assert_eq!(kinds, ["sphere", "plane", "box", "cone"]);

        assert_eq!(
            scene.objects[3].shape,
            Shape::Cone {
                center: Vector3::new(2.0, 0.0, 0.0),
                radius: 0.5,
                height: 2.0
            }
        );

        assert_eq!(scene.lights[0].intensity, 1.0);
        assert_eq!(scene.lights[1].intensity, 0.5);
        assert_eq!(scene.background, Vector3::ZERO);
    }

    #[test]
    fn test_material_defaults_applied() {
        let json = format!(
            r#"{{ {CAMERA},
            "objects": [
                {{ "type": "sphere", "center": {{"x":0,"y":0,"z":0}}, "radius": 1.0,
                   "material": {{ "color": {{"x":1,"y":1,"z":1}}, "shininess": 8, "reflectivity": 2.0 }} }}
            ]
        }}"#
        );

        let scene = load_scene_from_str(&json).unwrap();
        let material = &scene.objects[0].material;
        assert_eq!(material.ambient, 0.1);
        assert_eq!(material.diffuse, 0.7);
        assert_eq!(material.specular, 0.2);
        assert_eq!(material.shininess, 8.0);
        // Reflectivity is clamped to [0, 1]
        assert_eq!(material.reflectivity, 1.0);
    }

    #[test]
    fn test_named_materials_are_shared() {
        let json = format!(
            r#"{{ {CAMERA},
            "materials": {{ "mirror": {{ "color": {{"x":1,"y":1,"z":1}}, "reflectivity": 0.8 }} }},
            "objects": [
                {{ "type": "sphere", "center": {{"x":0,"y":0,"z":0}}, "radius": 1.0, "material": "mirror" }},
                {{ "type": "sphere", "center": {{"x":3,"y":0,"z":0}}, "radius": 1.0, "material": "mirror" }}
            ]
        }}"#
        );

        let scene = load_scene_from_str(&json).unwrap();
        assert!(Arc::ptr_eq(
            &scene.objects[0].material,
            &scene.objects[1].material
        ));
        assert_eq!(scene.objects[0].material.reflectivity, 0.8);
    }

    #[test]
    fn test_unknown_material_rejected() {
        let json = format!(
            r#"{{ {CAMERA},
            "objects": [
                {{ "type": "sphere", "center": {{"x":0,"y":0,"z":0}}, "radius": 1.0, "material": "gold" }}
            ]
        }}"#
        );

        match load_scene_from_str(&json) {
            Err(LoadError::UnknownMaterial(name)) => assert_eq!(name, "gold"),
            other => panic!("expected UnknownMaterial, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = format!(
            r#"{{ {CAMERA},
            "objects": [
                {{ "type": "torus", "center": {{"x":0,"y":0,"z":0}},
                   "material": {{ "color": {{"x":1,"y":1,"z":1}} }} }}
            ]
        }}"#
        );

        assert!(matches!(load_scene_from_str(&json), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_missing_camera_rejected() {
        assert!(matches!(
            load_scene_from_str(r#"{ "objects": [] }"#),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_load_scene_from_file() {
        let _ = env_logger::builder().is_test(true).try_init();

        let path = std::env::temp_dir().join("fovea_loader_test_scene.json");
        std::fs::write(&path, format!("{{ {CAMERA} }}")).unwrap();

        let scene = load_scene(&path).unwrap();
        assert_eq!(scene.name, "fovea_loader_test_scene");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("fovea_loader_does_not_exist.json");
        assert!(matches!(load_scene(&path), Err(LoadError::Io(_))));
    }

    #[test]
    fn test_demo_scene_parses() {
        let scene = load_scene_from_str(include_str!("../../../scenes/demo.json")).unwrap();

        assert_eq!(scene.object_count(), 5);
        assert_eq!(scene.light_count(), 2);
        let kinds: Vec<_> = scene.objects.iter().map(|o| o.shape.kind()).collect();
        assert_eq!(kinds, ["plane", "sphere", "sphere", "cone", "box"]);
        assert_eq!(scene.objects[1].material.reflectivity, 0.8);
    }
}
