//! Renderable scene and the nearest-hit query.

use crate::{
    camera::{Camera, CameraError},
    hittable::{Hit, Hittable},
    Primitive,
};
use fovea_core::{Color, Light, SceneDescription};
use fovea_math::Ray;

/// Primitives, lights, camera and background for one render.
///
/// Immutable while rendering, so it can be shared across worker threads.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
    camera: Camera,
    background: Color,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(camera: Camera, background: Color) -> Self {
        Self {
            primitives: Vec::new(),
            lights: Vec::new(),
            camera,
            background,
        }
    }

    /// Build a scene from a loaded description.
    ///
    /// Fails if the described camera does not define a view.
    pub fn from_description(description: &SceneDescription) -> Result<Self, CameraError> {
        let camera = Camera::new(&description.camera)?;
        let mut scene = Self::new(camera, description.background);

        for object in &description.objects {
            scene.add_primitive(Primitive::from_object(object));
        }
        for light in &description.lights {
            scene.add_light(*light);
        }

        log::debug!(
            "Built scene '{}': {} primitives, {} lights",
            description.name,
            scene.primitives.len(),
            scene.lights.len()
        );

        Ok(scene)
    }

    /// Add a primitive to the scene.
    pub fn add_primitive(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Add a point light to the scene.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn background(&self) -> Color {
        self.background
    }
}

impl Hittable for Scene {
    /// Linear scan over every primitive; the globally nearest hit wins.
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut closest: Option<Hit<'_>> = None;

        for primitive in &self.primitives {
            if let Some(hit) = primitive.intersect(ray) {
                if closest.map_or(true, |c| hit.distance < c.distance) {
                    closest = Some(hit);
                }
            }
        }

        closest
    }
}
