//! Ortho Viewer: orthographic software rasterizer for simple polyhedra
//!
//! Turns a heading and a pitch into a rendered frame:
//! - Row-vector 3x3 rotations composed as heading x pitch
//! - Quads split along their long diagonal
//! - Wireframe outlines or filled triangles with a z-buffer
//!
//! The window and sliders live in the binary; this crate only draws into a
//! caller-owned [`rasterizer::Framebuffer`].

pub mod config;
pub mod export;
pub mod mesh;
pub mod pipeline;
pub mod rasterizer;

pub use config::{load_config, load_config_from_str, save_config, AngleRange, ConfigError, ViewerConfig, MAX_SURFACE_SIDE};
pub use export::{save_png, to_rgba_image, ExportError};
pub use mesh::{cube, cuboid, tetrahedron, Mesh, Primitive, Quad, ShapeKind, Triangle};
pub use pipeline::{project, render, render_frame, render_with, Orientation};
pub use rasterizer::{Color, Framebuffer, Mat3, RasterStats, RenderMode, RenderOptions, Vec3};
