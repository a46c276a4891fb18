//! Scene description types for Fovea.
//!
//! This module defines the scene as handed over by a loader: camera
//! settings, shapes with shared materials, point lights and a background.
//! It carries no intersection logic; the renderer builds its own scene
//! from a [`SceneDescription`].

use std::sync::Arc;

use fovea_math::Vector3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vector3;

/// A Phong-style surface description.
///
/// Materials are read-only after scene construction and shared between
/// any number of objects through `Arc<Material>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Base color (RGB, 0-1)
    pub color: Color,

    /// Ambient coefficient
    pub ambient: f64,

    /// Diffuse coefficient
    pub diffuse: f64,

    /// Specular coefficient
    pub specular: f64,

    /// Phong exponent (positive)
    pub shininess: f64,

    /// Mirror blend factor (0=matte, 1=perfect mirror)
    pub reflectivity: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::ONE,
            ambient: 0.1,
            diffuse: 0.7,
            specular: 0.2,
            shininess: 32.0,
            reflectivity: 0.0,
        }
    }
}

impl Material {
    /// Create a new material with a color and default coefficients.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Set the mirror blend factor, clamped to [0, 1].
    pub fn with_reflectivity(mut self, reflectivity: f64) -> Self {
        self.reflectivity = reflectivity.clamp(0.0, 1.0);
        self
    }

    /// Check if this material casts reflection rays.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }
}

/// A point light. Lights carry a scalar intensity only, no color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vector3,
    pub intensity: f64,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vector3, intensity: f64) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// Camera placement as supplied by the scene file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub position: Vector3,
    pub look_at: Vector3,
    /// World-up hint; re-orthogonalized by the renderer camera
    pub up: Vector3,
    /// Vertical field of view in degrees
    pub fov: f64,
    pub aspect_ratio: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            look_at: Vector3::NEG_Z,
            up: Vector3::Y,
            fov: 60.0,
            aspect_ratio: 4.0 / 3.0,
        }
    }
}

/// Geometric part of an object. The set of kinds is closed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere { center: Vector3, radius: f64 },
    Plane { point: Vector3, normal: Vector3 },
    /// Axis-aligned box between two corners
    Box { min: Vector3, max: Vector3 },
    /// Capped cone standing on its base center, apex at `center + height * Y`
    Cone {
        center: Vector3,
        radius: f64,
        height: f64,
    },
}

impl Shape {
    /// Lowercase kind name, as used in scene files.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere { .. } => "sphere",
            Shape::Plane { .. } => "plane",
            Shape::Box { .. } => "box",
            Shape::Cone { .. } => "cone",
        }
    }
}

/// A shape paired with its (possibly shared) material.
#[derive(Clone, Debug)]
pub struct Object {
    pub shape: Shape,
    pub material: Arc<Material>,
}

impl Object {
    pub fn new(shape: Shape, material: Arc<Material>) -> Self {
        Self { shape, material }
    }
}

/// A complete scene: camera, objects, lights and background.
///
/// Objects and lights keep their insertion order.
#[derive(Clone, Debug)]
pub struct SceneDescription {
    /// Scene name (usually from filename)
    pub name: String,

    pub camera: CameraSettings,

    pub objects: Vec<Object>,

    pub lights: Vec<Light>,

    /// Color returned by rays that escape the scene
    pub background: Color,
}

impl SceneDescription {
    /// Default background for rays that hit nothing.
    pub const DEFAULT_BACKGROUND: Color = Color::new(0.1, 0.1, 0.1);

    /// Create an empty scene viewed through `camera`.
    pub fn new(name: impl Into<String>, camera: CameraSettings) -> Self {
        Self {
            name: name.into(),
            camera,
            objects: Vec::new(),
            lights: Vec::new(),
            background: Self::DEFAULT_BACKGROUND,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, shape: Shape, material: Arc<Material>) {
        self.objects.push(Object::new(shape, material));
    }

    /// Add a point light to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Get object count.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_defaults() {
        let material = Material::new(Color::new(1.0, 0.0, 0.0));
        assert_eq!(material.color, Color::new(1.0, 0.0, 0.0));
        assert_eq!(material.ambient, 0.1);
        assert_eq!(material.diffuse, 0.7);
        assert_eq!(material.specular, 0.2);
        assert_eq!(material.shininess, 32.0);
        assert_eq!(material.reflectivity, 0.0);
        assert!(!material.is_reflective());
    }

    #[test]
    fn test_reflectivity_clamped() {
        assert_eq!(Material::default().with_reflectivity(1.5).reflectivity, 1.0);
        assert_eq!(Material::default().with_reflectivity(-0.5).reflectivity, 0.0);
        assert!(Material::default().with_reflectivity(0.3).is_reflective());
    }

    #[test]
    fn test_scene_creation() {
        let mut scene = SceneDescription::new("test", CameraSettings::default());
        assert_eq!(scene.background, SceneDescription::DEFAULT_BACKGROUND);

        let shared = Arc::new(Material::default());
        scene.add_object(
            Shape::Sphere {
                center: Vector3::NEG_Z,
                radius: 0.5,
            },
            shared.clone(),
        );
        scene.add_object(
            Shape::Plane {
                point: Vector3::ZERO,
                normal: Vector3::Y,
            },
            shared.clone(),
        );
        scene.add_light(Light::new(Vector3::new(0.0, 5.0, 0.0), 1.0));

        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.light_count(), 1);
        assert_eq!(scene.objects[0].shape.kind(), "sphere");
        assert_eq!(scene.objects[1].shape.kind(), "plane");
        assert!(Arc::ptr_eq(&scene.objects[0].material, &scene.objects[1].material));
    }
}
