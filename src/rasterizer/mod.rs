//! Orthographic software rasterizer
//!
//! Features:
//! - Row-vector rotation matrices (heading and pitch)
//! - Wireframe outlines with Bresenham lines
//! - Filled triangles with barycentric inside test and a z-buffer
//! - Optional row-banded parallel fill

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;

/// Default surface dimensions
pub const WIDTH: usize = 400;
pub const HEIGHT: usize = 400;
