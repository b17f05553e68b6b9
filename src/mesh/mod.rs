//! Polygon meshes built from colored triangles and quads
//!
//! - Tagged primitives instead of a shape hierarchy
//! - Deterministic quad split along the long diagonal
//! - Stock tetrahedron, cube and cuboid generators

mod primitives;
mod shapes;

pub use primitives::*;
pub use shapes::*;

use crate::rasterizer::Vec3;

/// Ordered list of faces, each with its own color
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub primitives: Vec<Primitive>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            primitives: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// All faces as triangles, in face order
    pub fn triangulate(&self) -> Vec<Triangle> {
        let mut out = Vec::with_capacity(self.primitives.len() * 2);
        for p in &self.primitives {
            p.triangulate_into(&mut out);
        }
        out
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

    /// Per-axis scale of every vertex, in place
    pub fn scale(&mut self, a: f64, b: f64, c: f64) {
        for p in &mut self.primitives {
            p.scale(a, b, c);
        }
    }

    pub fn scale_uniform(&mut self, s: f64) {
        self.scale(s, s, s);
    }

    /// Axis-aligned (min, max) corners, None for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut vertices = self.primitives.iter().flat_map(|p| p.vertices().iter().copied());
        let first = vertices.next()?;
        Some(vertices.fold((first, first), |(min, max), v| {
            (
                Vec3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z)),
                Vec3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z)),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Color;

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_none());
        assert!(mesh.triangulate().is_empty());
    }

    #[test]
    fn test_mesh_scale_all_axes() {
        let mut mesh = Mesh::new();
        mesh.push(Triangle::new(
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, -3.0),
            Color::RED,
        ));
        mesh.scale_x(2.0);
        mesh.scale_y(3.0);
        mesh.scale_z(-1.0);
        assert_eq!(mesh.primitives[0].vertices()[0], Vec3::new(2.0, 3.0, -1.0));
        mesh.scale_uniform(2.0);
        assert_eq!(mesh.primitives[0].vertices()[2], Vec3::new(0.0, 0.0, 6.0));
    }
}
