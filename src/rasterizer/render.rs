//! Framebuffer, z-buffer and triangle scan conversion
//! Wireframe stroking and depth-tested triangle fill

use rayon::prelude::*;

use super::math::{barycentric, signed_area, Vec3};
use super::types::Color;

/// Below this the projected triangle is treated as collinear
const DEGENERATE_AREA: f64 = 1e-9;

/// Rows per rayon band in the parallel fill
const BAND_ROWS: usize = 16;

/// Framebuffer for software rendering
///
/// Depth starts at negative infinity: any real depth wins, larger z is closer.
pub struct Framebuffer {
    pub pixels: Vec<u8>,    // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f64>,  // Depth buffer
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    /// Fresh surface: transparent pixels, empty depth
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f64::NEG_INFINITY; width * height],
            width,
            height,
        }
    }

    /// Fresh surface filled with `color`
    pub fn with_background(width: usize, height: usize, color: Color) -> Self {
        let mut fb = Self::new(width, height);
        fb.clear(color);
        fb
    }

    /// Fill every pixel with `color` and forget all depth
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.zbuffer.fill(f64::NEG_INFINITY);
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&self.pixels[idx..idx + 4]);
            Some(Color::from_bytes(bytes))
        } else {
            None
        }
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.zbuffer[y * self.width + x])
        } else {
            None
        }
    }

    /// Write the pixel only if `z` is strictly closer than what is stored.
    /// Equal depth keeps the earlier writer.
    pub fn set_pixel_with_depth(&mut self, x: usize, y: usize, z: f64, color: Color) -> bool {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            return write_fragment(&mut self.pixels, &mut self.zbuffer, idx, z, color);
        }
        false
    }

    /// Plot the segment between two surface points, pixel centers at integer
    /// coordinates. The segment is clipped to the surface before stepping, so
    /// endpoints far off screen cost nothing extra.
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        let Some((from, to)) = clip_segment(from, to, self.width, self.height) else {
            return;
        };
        let (x_end, y_end) = (from_clipped(to.0), from_clipped(to.1));
        let (mut x, mut y) = (from_clipped(from.0), from_clipped(from.1));

        let run = (x_end - x).abs();
        let rise = -(y_end - y).abs();
        let (step_x, step_y) = ((x_end - x).signum(), (y_end - y).signum());
        let mut err = run + rise;

        loop {
            self.set_pixel(x as usize, y as usize, color);
            if x == x_end && y == y_end {
                break;
            }
            let doubled = 2 * err;
            if doubled >= rise {
                err += rise;
                x += step_x;
            }
            if doubled <= run {
                err += run;
                y += step_y;
            }
        }
    }

    /// Stroke the closed outline v1 -> v2 -> v3 -> v1
    pub fn stroke_triangle(&mut self, tri: &ScreenTriangle, color: Color) {
        let corners = [tri.v1, tri.v2, tri.v3];
        for i in 0..3 {
            let (a, b) = (corners[i], corners[(i + 1) % 3]);
            self.draw_line((a.x, a.y), (b.x, b.y), color);
        }
    }
}

/// Liang-Barsky clip against [0, width-1] x [0, height-1].
/// None when the segment misses the surface or has a non-finite coordinate.
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    width: usize,
    height: usize,
) -> Option<((f64, f64), (f64, f64))> {
    if width == 0 || height == 0 {
        return None;
    }
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    if ![from.0, from.1, dx, dy].iter().all(|v| v.is_finite()) {
        return None;
    }

    let (max_x, max_y) = ((width - 1) as f64, (height - 1) as f64);
    let (mut t_in, mut t_out) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, from.0), (dx, max_x - from.0), (-dy, from.1), (dy, max_y - from.1)] {
        if p == 0.0 {
            // Parallel to this edge: fully outside or irrelevant
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t_in = t_in.max(r);
        } else {
            t_out = t_out.min(r);
        }
        if t_in > t_out {
            return None;
        }
    }

    let at = |t: f64| {
        (
            (from.0 + t * dx).clamp(0.0, max_x),
            (from.1 + t * dy).clamp(0.0, max_y),
        )
    };
    Some((at(t_in), at(t_out)))
}

/// Clipped coordinate to its pixel index
fn from_clipped(v: f64) -> i64 {
    v.round() as i64
}

/// Strict greater-than depth test on raw buffers
fn write_fragment(pixels: &mut [u8], zbuffer: &mut [f64], idx: usize, z: f64, color: Color) -> bool {
    if z > zbuffer[idx] {
        zbuffer[idx] = z;
        let p = idx * 4;
        pixels[p..p + 4].copy_from_slice(&color.to_bytes());
        return true;
    }
    false
}

/// Projected triangle in surface coordinates, ready for rasterization.
/// x/y are pixels (origin top-left), z is depth (larger is closer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTriangle {
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
    pub color: Color,
}

/// Inclusive pixel bounds, already clamped to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl PixelBounds {
    /// Bounding box of the triangle's pixel centers, clamped to [0, w-1] x [0, h-1]
    pub fn of(tri: &ScreenTriangle, width: usize, height: usize) -> Self {
        let (v1, v2, v3) = (tri.v1, tri.v2, tri.v3);
        let min_x = v1.x.min(v2.x).min(v3.x).ceil().max(0.0) as i64;
        let max_x = (v1.x.max(v2.x).max(v3.x).floor() as i64).min(width as i64 - 1);
        let min_y = v1.y.min(v2.y).min(v3.y).ceil().max(0.0) as i64;
        let max_y = (v1.y.max(v2.y).max(v3.y).floor() as i64).min(height as i64 - 1);
        Self { min_x, max_x, min_y, max_y }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Counters from one fill pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub triangles: usize,
    /// Collinear after projection, skipped
    pub degenerate: usize,
    /// Bounding box fell outside the surface
    pub offscreen: usize,
    /// Pixels that passed the depth test
    pub fragments: usize,
}

/// Triangle that survived setup: non-degenerate, on screen
struct Prepared<'a> {
    tri: &'a ScreenTriangle,
    area: f64,
    bounds: PixelBounds,
}

fn prepare<'a>(
    triangles: &'a [ScreenTriangle],
    width: usize,
    height: usize,
    stats: &mut RasterStats,
) -> Vec<Prepared<'a>> {
    let mut prepared = Vec::with_capacity(triangles.len());
    stats.triangles += triangles.len();

    for tri in triangles {
        let area = signed_area(tri.v1, tri.v2, tri.v3);
        if !area.is_finite() || area.abs() < DEGENERATE_AREA {
            log::trace!("skipping degenerate triangle {:?}", tri);
            stats.degenerate += 1;
            continue;
        }

        let bounds = PixelBounds::of(tri, width, height);
        if bounds.is_empty() {
            stats.offscreen += 1;
            continue;
        }

        prepared.push(Prepared { tri, area, bounds });
    }

    prepared
}

/// Fill every prepared triangle, in order, over rows [y_start, y_end).
/// `pixels`/`zbuffer` hold exactly those rows.
fn fill_rows(
    pixels: &mut [u8],
    zbuffer: &mut [f64],
    width: usize,
    y_start: usize,
    y_end: usize,
    prepared: &[Prepared<'_>],
) -> usize {
    let mut fragments = 0;

    for p in prepared {
        let (v1, v2, v3) = (p.tri.v1, p.tri.v2, p.tri.v3);
        let row_lo = p.bounds.min_y.max(y_start as i64);
        let row_hi = p.bounds.max_y.min(y_end as i64 - 1);

        for y in row_lo..=row_hi {
            let row = (y as usize - y_start) * width;
            for x in p.bounds.min_x..=p.bounds.max_x {
                let (b1, b2, b3) = barycentric(x as f64, y as f64, v1, v2, v3, p.area);
                if (0.0..=1.0).contains(&b1) && (0.0..=1.0).contains(&b2) && (0.0..=1.0).contains(&b3) {
                    let z = b1 * v1.z + b2 * v2.z + b3 * v3.z;
                    if write_fragment(pixels, zbuffer, row + x as usize, z, p.tri.color) {
                        fragments += 1;
                    }
                }
            }
        }
    }

    fragments
}

/// Fill triangles with the depth test, one thread
pub fn render_filled(fb: &mut Framebuffer, triangles: &[ScreenTriangle]) -> RasterStats {
    let mut stats = RasterStats::default();
    let prepared = prepare(triangles, fb.width, fb.height, &mut stats);
    stats.fragments = fill_rows(&mut fb.pixels, &mut fb.zbuffer, fb.width, 0, fb.height, &prepared);
    stats
}

/// Fill triangles with the depth test, rows split into bands across rayon workers.
///
/// Each worker owns a disjoint slice of rows and walks every triangle in input
/// order, so the result matches `render_filled` bit for bit.
pub fn render_filled_parallel(fb: &mut Framebuffer, triangles: &[ScreenTriangle]) -> RasterStats {
    let mut stats = RasterStats::default();
    let width = fb.width;
    let height = fb.height;
    if width == 0 || height == 0 {
        stats.triangles = triangles.len();
        stats.offscreen = triangles.len();
        return stats;
    }

    let prepared = prepare(triangles, width, height, &mut stats);

    stats.fragments = fb
        .pixels
        .par_chunks_mut(BAND_ROWS * width * 4)
        .zip(fb.zbuffer.par_chunks_mut(BAND_ROWS * width))
        .enumerate()
        .map(|(band, (pixels, zbuffer))| {
            let y_start = band * BAND_ROWS;
            let y_end = (y_start + BAND_ROWS).min(height);
            fill_rows(pixels, zbuffer, width, y_start, y_end, &prepared)
        })
        .sum();

    stats
}

/// Stroke each triangle's outline, no depth test, later triangles on top
pub fn render_wireframe(fb: &mut Framebuffer, triangles: &[ScreenTriangle], stroke: Color) {
    for tri in triangles {
        fb.stroke_triangle(tri, stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tri(v1: (f64, f64, f64), v2: (f64, f64, f64), v3: (f64, f64, f64), color: Color) -> ScreenTriangle {
        ScreenTriangle {
            v1: Vec3::new(v1.0, v1.1, v1.2),
            v2: Vec3::new(v2.0, v2.1, v2.2),
            v3: Vec3::new(v3.0, v3.1, v3.2),
            color,
        }
    }

    fn flat(z: f64, color: Color) -> ScreenTriangle {
        tri((2.0, 2.0, z), (30.0, 4.0, z), (10.0, 28.0, z), color)
    }

    #[test]
    fn test_new_depth_is_negative_infinity() {
        let fb = Framebuffer::new(4, 3);
        assert_eq!(fb.pixels.len(), 4 * 3 * 4);
        assert!(fb.zbuffer.iter().all(|z| *z == f64::NEG_INFINITY));
    }

    #[test]
    fn test_clear_resets_depth() {
        let mut fb = Framebuffer::new(8, 8);
        assert!(fb.set_pixel_with_depth(1, 1, 5.0, Color::RED));
        fb.clear(Color::BLACK);
        assert_eq!(fb.depth_at(1, 1), Some(f64::NEG_INFINITY));
        assert_eq!(fb.get_pixel(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_depth_test_is_strict() {
        let mut fb = Framebuffer::new(2, 2);
        assert!(fb.set_pixel_with_depth(0, 0, 1.0, Color::RED));
        assert!(!fb.set_pixel_with_depth(0, 0, 1.0, Color::GREEN));
        assert!(!fb.set_pixel_with_depth(0, 0, 0.5, Color::GREEN));
        assert!(fb.set_pixel_with_depth(0, 0, 2.0, Color::BLUE));
        assert_eq!(fb.get_pixel(0, 0), Some(Color::BLUE));
        assert!(!fb.set_pixel_with_depth(5, 5, 9.0, Color::BLUE));
    }

    #[test]
    fn test_nearer_triangle_wins_either_order() {
        let near = flat(10.0, Color::RED);
        let far = flat(-10.0, Color::BLUE);

        for order in [[near, far], [far, near]] {
            let mut fb = Framebuffer::new(32, 32);
            render_filled(&mut fb, &order);
            assert_eq!(fb.get_pixel(12, 10), Some(Color::RED));
            let z = fb.depth_at(12, 10).unwrap();
            assert!((z - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_equal_depth_first_writer_wins() {
        let mut fb = Framebuffer::new(32, 32);
        render_filled(&mut fb, &[flat(3.0, Color::GREEN), flat(3.0, Color::YELLOW)]);
        assert_eq!(fb.get_pixel(12, 10), Some(Color::GREEN));
    }

    #[test]
    fn test_depth_is_interpolated() {
        let mut fb = Framebuffer::new(16, 16);
        let t = tri((0.0, 0.0, 0.0), (10.0, 0.0, 10.0), (0.0, 10.0, 0.0), Color::WHITE);
        render_filled(&mut fb, &[t]);
        // z varies with x only
        assert!((fb.depth_at(4, 2).unwrap() - 4.0).abs() < 1e-9);
        assert!(fb.depth_at(0, 0).unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_edges_are_inclusive() {
        let mut fb = Framebuffer::new(16, 16);
        let t = tri((0.0, 0.0, 1.0), (8.0, 0.0, 1.0), (0.0, 8.0, 1.0), Color::RED);
        render_filled(&mut fb, &[t]);
        assert_eq!(fb.get_pixel(0, 0), Some(Color::RED));
        assert_eq!(fb.get_pixel(8, 0), Some(Color::RED));
        assert_eq!(fb.get_pixel(4, 4), Some(Color::RED));
        assert_eq!(fb.get_pixel(5, 4), Some(Color::CLEAR));
    }

    #[test]
    fn test_degenerate_triangle_is_skipped() {
        let mut fb = Framebuffer::new(16, 16);
        let line = tri((0.0, 0.0, 1.0), (5.0, 5.0, 1.0), (10.0, 10.0, 1.0), Color::RED);
        let stats = render_filled(&mut fb, &[line]);
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.fragments, 0);
        assert!(fb.pixels.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_offscreen_triangle_is_noop() {
        let mut fb = Framebuffer::new(16, 16);
        let t = tri((-50.0, -50.0, 1.0), (-40.0, -50.0, 1.0), (-45.0, -30.0, 1.0), Color::RED);
        let stats = render_filled(&mut fb, &[t]);
        assert_eq!(stats.offscreen, 1);
        assert!(fb.zbuffer.iter().all(|z| *z == f64::NEG_INFINITY));
    }

    #[test]
    fn test_partially_offscreen_is_clamped() {
        let mut fb = Framebuffer::new(16, 16);
        let t = tri((-20.0, -20.0, 1.0), (40.0, -20.0, 1.0), (-20.0, 40.0, 1.0), Color::RED);
        let stats = render_filled(&mut fb, &[t]);
        assert_eq!(fb.get_pixel(0, 0), Some(Color::RED));
        assert!(stats.fragments > 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let tris = vec![
            tri((-5.0, 3.0, 2.0), (70.0, 20.0, -4.0), (20.0, 60.0, 8.0), Color::RED),
            tri((10.0, 10.0, 5.0), (60.0, 5.0, 5.0), (35.0, 55.0, -1.0), Color::GREEN),
            flat(3.0, Color::BLUE),
            tri((0.0, 0.0, 1.0), (5.0, 5.0, 1.0), (10.0, 10.0, 1.0), Color::WHITE),
        ];
        let mut a = Framebuffer::new(64, 50);
        let mut b = Framebuffer::new(64, 50);
        let sa = render_filled(&mut a, &tris);
        let sb = render_filled_parallel(&mut b, &tris);
        assert_eq!(a.pixels, b.pixels);
        assert_eq!(a.zbuffer, b.zbuffer);
        assert_eq!(sa, sb);
    }

    #[test]
    fn test_draw_line_endpoints() {
        let mut fb = Framebuffer::new(10, 10);
        fb.draw_line((1.0, 1.0), (8.0, 5.0), Color::WHITE);
        assert_eq!(fb.get_pixel(1, 1), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(8, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_draw_line_clips_to_surface() {
        let mut fb = Framebuffer::new(10, 10);
        fb.draw_line((-5.0, 2.0), (20.0, 2.0), Color::WHITE);
        for x in 0..10 {
            assert_eq!(fb.get_pixel(x, 2), Some(Color::WHITE));
        }
        fb.draw_line((-100.0, -100.0), (-1.0, -200.0), Color::RED);
        assert!(fb.pixels.chunks(4).all(|p| p != Color::RED.to_bytes()));
    }

    #[test]
    fn test_draw_line_with_far_off_endpoints() {
        let mut fb = Framebuffer::new(400, 400);
        fb.draw_line((-536_870_911.0, 0.0), (536_870_911.0, 400.0), Color::WHITE);
        assert_eq!(fb.get_pixel(0, 200), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(399, 200), Some(Color::WHITE));
        assert_eq!(fb.pixels.chunks(4).filter(|p| *p == Color::WHITE.to_bytes()).count(), 400);

        // Nearly horizontal and passing below the surface
        fb.draw_line((-536_870_911.0, 0.0), (536_870_911.0, 1000.0), Color::RED);
        assert!(fb.pixels.chunks(4).all(|p| p != Color::RED.to_bytes()));
    }

    #[test]
    fn test_draw_line_rejects_non_finite() {
        let mut fb = Framebuffer::new(8, 8);
        fb.draw_line((f64::NAN, 1.0), (4.0, 4.0), Color::WHITE);
        fb.draw_line((1.0, 1.0), (f64::INFINITY, 4.0), Color::WHITE);
        assert!(fb.pixels.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_stroke_huge_triangle() {
        let mut fb = Framebuffer::new(64, 64);
        let t = tri((-1.0e12, 30.0, 0.0), (1.0e12, 30.0, 0.0), (0.0, 1.0e12, 0.0), Color::RED);
        render_wireframe(&mut fb, &[t], Color::GREEN);
        assert_eq!(fb.get_pixel(32, 30), Some(Color::GREEN));
    }

    #[test]
    fn test_wireframe_ignores_depth_and_draws_in_order() {
        let mut fb = Framebuffer::new(32, 32);
        let t = tri((2.0, 2.0, 5.0), (20.0, 2.0, 5.0), (2.0, 20.0, 5.0), Color::RED);
        render_wireframe(&mut fb, &[t], Color::WHITE);
        render_wireframe(&mut fb, &[t], Color::GREEN);
        assert_eq!(fb.get_pixel(10, 2), Some(Color::GREEN));
        assert!(fb.zbuffer.iter().all(|z| *z == f64::NEG_INFINITY));
        // Interior untouched
        assert_eq!(fb.get_pixel(6, 6), Some(Color::CLEAR));
    }

    proptest! {
        #[test]
        fn test_writes_stay_inside_bounds(
            coords in prop::collection::vec(-40.0f64..80.0, 6),
            z in -10.0f64..10.0,
        ) {
            let t = tri(
                (coords[0], coords[1], z),
                (coords[2], coords[3], -z),
                (coords[4], coords[5], z * 0.5),
                Color::RED,
            );
            let mut fb = Framebuffer::new(40, 30);
            render_filled(&mut fb, &[t]);
            let bounds = PixelBounds::of(&t, 40, 30);
            for y in 0..30 {
                for x in 0..40 {
                    if fb.depth_at(x, y) != Some(f64::NEG_INFINITY) {
                        prop_assert!(bounds.contains(x as i64, y as i64));
                    }
                }
            }
        }
    }
}
