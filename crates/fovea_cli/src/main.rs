use anyhow::{Context, Result};
use clap::Parser;
use fovea_core::load_scene;
use fovea_renderer::{render_parallel, render_with_config, ImageBuffer, RenderConfig, Scene};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let description = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    let scene = Scene::from_description(&description)
        .with_context(|| format!("Invalid camera in scene '{}'", description.name))?;

    let (focus_x, focus_y) = args.focus();
    let config = RenderConfig::new(args.rays, focus_x, focus_y)
        .with_max_depth(args.max_depth)
        .with_seed(args.seed.unwrap_or_else(rand::random));

    let image = if args.serial {
        render_with_config(&scene, args.width, args.height, &config)
    } else {
        render_parallel(&scene, args.width, args.height, &config, args.bucket_size)
    };

    save_image(&image, &args)?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}

fn save_image(image: &ImageBuffer, args: &Args) -> Result<()> {
    let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .context("Render buffer does not match image dimensions")?;

    rgb.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
