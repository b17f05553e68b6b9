//! Colors and render settings shared by the rasterizer and the viewer

use serde::{Serialize, Deserialize};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    pub const YELLOW: Color = Color { r: 255, g: 255, b: 0, a: 255 };
    /// Fully transparent, the state of a never-written pixel
    pub const CLEAR: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to [u8; 4] for framebuffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self { r: bytes[0], g: bytes[1], b: bytes[2], a: bytes[3] }
    }
}

/// How triangles reach the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Closed outline per triangle, no depth test, input order
    Wireframe,
    /// Solid fill with per-pixel depth test
    #[default]
    Filled,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Wireframe => RenderMode::Filled,
            RenderMode::Filled => RenderMode::Wireframe,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RenderMode::Wireframe => "Wireframe",
            RenderMode::Filled => "Filled",
        }
    }
}

/// Per-call rendering options
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Line color for wireframe mode
    pub stroke: Color,
    /// Fill color of a freshly allocated surface
    pub background: Color,
    /// Split the filled pass into row bands across rayon workers
    pub parallel: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            stroke: Color::WHITE,
            background: Color::BLACK,
            parallel: false,
        }
    }
}
