// Re-export glam for convenience
pub use glam::*;

// Fovea math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::VectorExt;

/// Double-precision 3-component vector used for all scene geometry.
pub type Vector3 = DVec3;
