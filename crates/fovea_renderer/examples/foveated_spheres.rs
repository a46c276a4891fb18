//! Foveated render example.
//!
//! Renders spheres, a cone and a row of boxes, focused on the left of the
//! frame, and saves to PPM format.

use fovea_core::CameraSettings;
use fovea_renderer::{
    render_parallel, AaBox, Camera, Color, Cone, Light, Material, Plane, RenderConfig, Scene,
    Sphere, Vector3, DEFAULT_BUCKET_SIZE,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Fovea - Foveated Spheres Example");
    println!("================================");

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let config = RenderConfig::new(16, WIDTH as f64 * 0.3, HEIGHT as f64 * 0.5).with_seed(7);

    println!(
        "Rendering {}x{} @ {} rays/pixel, focus ({}, {})...",
        WIDTH, HEIGHT, config.rays_per_pixel, config.focus_x, config.focus_y
    );

    let start = std::time::Instant::now();
    let image = render_parallel(&scene, WIDTH, HEIGHT, &config, DEFAULT_BUCKET_SIZE);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "foveated.ppm";
    save_ppm(&image.to_rgb8(), WIDTH, HEIGHT, filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Result<Scene, fovea_renderer::CameraError> {
    let camera = Camera::new(&CameraSettings {
        position: Vector3::new(0.0, 1.5, 7.0),
        look_at: Vector3::new(0.0, 0.5, 0.0),
        up: Vector3::Y,
        fov: 45.0,
        aspect_ratio: WIDTH as f64 / HEIGHT as f64,
    })?;

    let mut scene = Scene::new(camera, Color::new(0.05, 0.05, 0.1));

    let ground = Arc::new(Material::new(Color::new(0.5, 0.5, 0.5)).with_reflectivity(0.2));
    scene.add_primitive(Plane::new(Vector3::ZERO, Vector3::Y, ground));

    let mirror = Arc::new(Material::new(Color::new(0.9, 0.9, 0.9)).with_reflectivity(0.8));
    scene.add_primitive(Sphere::new(Vector3::new(-2.0, 1.0, 0.0), 1.0, mirror));

    let red = Arc::new(Material::new(Color::new(0.8, 0.1, 0.1)));
    scene.add_primitive(Sphere::new(Vector3::new(0.0, 0.6, 1.0), 0.6, red));

    let blue = Arc::new(Material {
        shininess: 128.0,
        specular: 0.6,
        ..Material::new(Color::new(0.1, 0.2, 0.8))
    });
    scene.add_primitive(Cone::new(Vector3::new(2.0, 0.0, 0.0), 0.8, 1.8, blue));

    // Row of small boxes behind
    let tile = Arc::new(Material::new(Color::new(0.9, 0.7, 0.2)));
    for i in -3..=3 {
        let x = i as f64 * 1.2;
        scene.add_primitive(AaBox::new(
            Vector3::new(x - 0.3, 0.0, -3.0),
            Vector3::new(x + 0.3, 0.6, -2.4),
            tile.clone(),
        ));
    }

    scene.add_light(Light::new(Vector3::new(-4.0, 6.0, 5.0), 0.8));
    scene.add_light(Light::new(Vector3::new(5.0, 4.0, 3.0), 0.5));

    Ok(scene)
}

/// Write packed RGB bytes as a binary PPM.
fn save_ppm(rgb: &[u8], width: u32, height: u32, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    write!(writer, "P6\n{} {}\n255\n", width, height)?;
    writer.write_all(rgb)?;
    writer.flush()?;

    Ok(())
}
