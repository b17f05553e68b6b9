//! Mesh primitives: colored triangles and quads
//!
//! Pure data with in-place scaling. Every primitive owns its vertices;
//! nothing is shared between faces.

use crate::rasterizer::{Color, Vec3};

/// A flat-colored triangle. Winding is not normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    pub color: Color,
}

impl Triangle {
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3, color: Color) -> Self {
        Self {
            vertices: [v1, v2, v3],
            color,
        }
    }

    /// Twice the 3D area (length of the edge cross product)
    pub fn double_area(&self) -> f64 {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a).len()
    }
}

/// A flat-colored quadrilateral, assumed planar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub vertices: [Vec3; 4],
    pub color: Color,
}

impl Quad {
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3, v4: Vec3, color: Color) -> Self {
        Self {
            vertices: [v1, v2, v3, v4],
            color,
        }
    }

    /// Index of the vertex farthest from the first one.
    /// Scans in order and only moves on a strictly larger distance, so
    /// ties keep the earlier vertex and an all-coincident quad yields 0.
    pub fn far_corner(&self) -> usize {
        let first = self.vertices[0];
        let mut far = 0;
        let mut max_distance = 0.0;
        for (i, v) in self.vertices.iter().enumerate() {
            let d = first.distance(*v);
            if max_distance < d {
                max_distance = d;
                far = i;
            }
        }
        far
    }

    /// Split along the diagonal from the first vertex to its far corner.
    ///
    /// Emits `(v1, a, far)` and `(far, b, v1)` where `a` and `b` are the
    /// remaining vertices in their original order. Only correct for
    /// rectangular quads, which is all the shape generators produce.
    pub fn triangulate(&self) -> [Triangle; 2] {
        let far = self.far_corner();
        let mut rest = (1..4).filter(|&i| i != far);
        let a = rest.next().unwrap_or(1);
        let b = rest.next().unwrap_or(2);

        let v1 = self.vertices[0];
        let corner = self.vertices[far];
        [
            Triangle::new(v1, self.vertices[a], corner, self.color),
            Triangle::new(corner, self.vertices[b], v1, self.color),
        ]
    }
}

/// A mesh face: triangle or quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Triangle(Triangle),
    Quad(Quad),
}

impl Primitive {
    pub fn color(&self) -> Color {
        match self {
            Primitive::Triangle(t) => t.color,
            Primitive::Quad(q) => q.color,
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        match self {
            Primitive::Triangle(t) => &t.vertices,
            Primitive::Quad(q) => &q.vertices,
        }
    }

    pub fn vertices_mut(&mut self) -> &mut [Vec3] {
        match self {
            Primitive::Triangle(t) => &mut t.vertices,
            Primitive::Quad(q) => &mut q.vertices,
        }
    }

    /// Append this face as triangles (quads split in two)
    pub fn triangulate_into(&self, out: &mut Vec<Triangle>) {
        match self {
            Primitive::Triangle(t) => out.push(*t),
            Primitive::Quad(q) => out.extend_from_slice(&q.triangulate()),
        }
    }

    pub fn scale_x(&mut self, a: f64) {
        self.scale(a, 1.0, 1.0);
    }

    pub fn scale_y(&mut self, b: f64) {
        self.scale(1.0, b, 1.0);
    }

    pub fn scale_z(&mut self, c: f64) {
        self.scale(1.0, 1.0, c);
    }

    /// Per-axis scale, in place
    pub fn scale(&mut self, a: f64, b: f64, c: f64) {
        for v in self.vertices_mut() {
            *v = v.scale_axes(a, b, c);
        }
    }

    pub fn scale_uniform(&mut self, s: f64) {
        self.scale(s, s, s);
    }
}

impl From<Triangle> for Primitive {
    fn from(t: Triangle) -> Self {
        Primitive::Triangle(t)
    }
}

impl From<Quad> for Primitive {
    fn from(q: Quad) -> Self {
        Primitive::Quad(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Quad {
        Quad::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Color::RED,
        )
    }

    #[test]
    fn test_far_corner_of_square() {
        let q = unit_square();
        assert_eq!(q.far_corner(), 2);
        assert_eq!(q.vertices[q.far_corner()], Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_square_split_tiles_exactly() {
        let q = unit_square();
        let [t1, t2] = q.triangulate();

        assert_eq!(t1.vertices, [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]);
        assert_eq!(t2.vertices, [
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
        ]);

        // Two halves of area 1/2 each, sharing only the diagonal
        assert!((t1.double_area() - 1.0).abs() < 1e-12);
        assert!((t2.double_area() - 1.0).abs() < 1e-12);
        assert_eq!(t1.color, Color::RED);
        assert_eq!(t2.color, Color::RED);
    }

    #[test]
    fn test_split_with_diagonal_in_last_slot() {
        // Far corner listed last: remaining vertices keep their order
        let q = Quad::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
            Color::BLUE,
        );
        assert_eq!(q.far_corner(), 3);
        let [t1, t2] = q.triangulate();
        assert_eq!(t1.vertices[1], Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(t2.vertices[1], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_collapsed_quad_does_not_panic() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        let q = Quad::new(p, p, p, p, Color::GREEN);
        assert_eq!(q.far_corner(), 0);
        let [t1, t2] = q.triangulate();
        assert_eq!(t1.double_area(), 0.0);
        assert_eq!(t2.double_area(), 0.0);
    }

    #[test]
    fn test_scale_mutates_in_place() {
        let mut p = Primitive::from(unit_square());
        p.scale(2.0, 3.0, 4.0);
        assert_eq!(p.vertices()[2], Vec3::new(2.0, 3.0, 0.0));
        p.scale_z(-1.0);
        p.scale_uniform(0.5);
        assert_eq!(p.vertices()[2], Vec3::new(1.0, 1.5, 0.0));
        p.scale_x(-1.0);
        assert_eq!(p.vertices()[1], Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_triangulate_into() {
        let mut out = Vec::new();
        Primitive::from(unit_square()).triangulate_into(&mut out);
        let t = Triangle::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Color::YELLOW);
        Primitive::from(t).triangulate_into(&mut out);
        assert_eq!(out.len(), 3);
        assert_eq!(out[2], t);
    }
}
