//! Frame pipeline
//!
//! angles -> rotation -> triangulate -> transform -> fill or stroke.
//! Everything is passed explicitly; there is no shared render state.

use serde::{Serialize, Deserialize};

use crate::mesh::{Mesh, Triangle};
use crate::rasterizer::{
    render_filled, render_filled_parallel, render_wireframe, Framebuffer, Mat3, RasterStats,
    RenderMode, RenderOptions, ScreenTriangle, Vec3,
};

/// Heading and pitch in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub heading: f64,
    pub pitch: f64,
}

impl Orientation {
    /// Untilted view. Pitch 180 also flips model +y to screen up.
    pub const NEUTRAL: Orientation = Orientation { heading: 0.0, pitch: 180.0 };

    pub fn new(heading: f64, pitch: f64) -> Self {
        Self { heading, pitch }
    }

    pub fn matrix(&self) -> Mat3 {
        Mat3::compose(self.heading.to_radians(), self.pitch.to_radians())
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Rotate a triangle and move the origin to the surface center
pub fn project(tri: &Triangle, matrix: &Mat3, width: usize, height: usize) -> ScreenTriangle {
    let offset = Vec3::new(width as f64 / 2.0, height as f64 / 2.0, 0.0);
    let [v1, v2, v3] = tri.vertices.map(|v| matrix.transform(v) + offset);
    ScreenTriangle { v1, v2, v3, color: tri.color }
}

/// Draw already-triangulated faces with an explicit matrix
pub fn render_with(
    matrix: &Mat3,
    triangles: &[Triangle],
    fb: &mut Framebuffer,
    mode: RenderMode,
    options: &RenderOptions,
) -> RasterStats {
    let projected: Vec<ScreenTriangle> = triangles
        .iter()
        .map(|t| project(t, matrix, fb.width, fb.height))
        .collect();

    let stats = match mode {
        RenderMode::Wireframe => {
            render_wireframe(fb, &projected, options.stroke);
            RasterStats { triangles: projected.len(), ..Default::default() }
        }
        RenderMode::Filled if options.parallel => render_filled_parallel(fb, &projected),
        RenderMode::Filled => render_filled(fb, &projected),
    };

    log::debug!(
        "{} frame: {} triangles, {} degenerate, {} offscreen, {} fragments",
        mode.label(),
        stats.triangles,
        stats.degenerate,
        stats.offscreen,
        stats.fragments,
    );
    stats
}

/// Render `mesh` at the given angles (degrees) onto `fb`.
///
/// Does not clear the surface; callers clear between frames.
pub fn render(
    heading_deg: f64,
    pitch_deg: f64,
    mesh: &Mesh,
    fb: &mut Framebuffer,
    mode: RenderMode,
) -> RasterStats {
    let matrix = Orientation::new(heading_deg, pitch_deg).matrix();
    render_with(&matrix, &mesh.triangulate(), fb, mode, &RenderOptions::default())
}

/// Allocate a surface filled with the background color and render into it
pub fn render_frame(
    orientation: Orientation,
    mesh: &Mesh,
    width: usize,
    height: usize,
    mode: RenderMode,
    options: &RenderOptions,
) -> Framebuffer {
    let mut fb = Framebuffer::with_background(width, height, options.background);
    render_with(&orientation.matrix(), &mesh.triangulate(), &mut fb, mode, options);
    fb
}
