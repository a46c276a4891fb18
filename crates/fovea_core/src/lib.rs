//! Fovea Core - Renderer-agnostic scene description and loading.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `Object`, `Shape`,
//!   `Material`, `Light`, `CameraSettings`
//! - **JSON support**: scene file parsing with shared, named materials
//!
//! # Example
//!
//! ```ignore
//! use fovea_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} objects, {} lights",
//!     scene.object_count(),
//!     scene.light_count());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use scene::{CameraSettings, Color, Light, Material, Object, SceneDescription, Shape};
