//! Canonical shape generators
//!
//! Every face of these shapes is a triangle or an axis-aligned rectangle,
//! which is what the far-corner quad split expects.

use serde::{Serialize, Deserialize};

use super::{Mesh, Primitive, Quad, Triangle};
use crate::rasterizer::{Color, Vec3};

/// Regular tetrahedron inscribed in the cube [-size, size]^3
pub fn tetrahedron(size: f64) -> Mesh {
    let s = size;
    let a = Vec3::new(s, s, s);
    let b = Vec3::new(-s, -s, s);
    let c = Vec3::new(-s, s, -s);
    let d = Vec3::new(s, -s, -s);

    let mut mesh = Mesh::new();
    mesh.push(Triangle::new(a, b, c, Color::RED));
    mesh.push(Triangle::new(a, b, d, Color::GREEN));
    mesh.push(Triangle::new(c, d, a, Color::BLUE));
    mesh.push(Triangle::new(c, d, b, Color::YELLOW));
    mesh
}

/// Cube spanning [-size, size] on every axis.
/// Opposite faces share a color and are built by mirroring.
pub fn cube(size: f64) -> Mesh {
    let s = size;
    let mut mesh = Mesh::with_capacity(6);

    let z_face = Primitive::from(Quad::new(
        Vec3::new(-s, s, s),
        Vec3::new(-s, -s, s),
        Vec3::new(s, -s, s),
        Vec3::new(s, s, s),
        Color::RED,
    ));
    let x_face = Primitive::from(Quad::new(
        Vec3::new(-s, s, s),
        Vec3::new(-s, -s, s),
        Vec3::new(-s, -s, -s),
        Vec3::new(-s, s, -s),
        Color::GREEN,
    ));
    let y_face = Primitive::from(Quad::new(
        Vec3::new(-s, s, s),
        Vec3::new(s, s, s),
        Vec3::new(s, s, -s),
        Vec3::new(-s, s, -s),
        Color::BLUE,
    ));

    let mut mirrored = z_face;
    mirrored.scale_z(-1.0);
    mesh.push(z_face);
    mesh.push(mirrored);

    let mut mirrored = x_face;
    mirrored.scale_x(-1.0);
    mesh.push(x_face);
    mesh.push(mirrored);

    let mut mirrored = y_face;
    mirrored.scale_y(-1.0);
    mesh.push(y_face);
    mesh.push(mirrored);

    mesh
}

/// Unit cube stretched per axis: x by `length`, y by `width`, z by `height`
pub fn cuboid(length: f64, width: f64, height: f64) -> Mesh {
    let mut mesh = cube(1.0);
    mesh.scale(length, width, height);
    mesh
}

/// Which shape to build, as stored in the viewer config
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Tetrahedron { size: f64 },
    Cube { size: f64 },
    Cuboid { length: f64, width: f64, height: f64 },
}

impl ShapeKind {
    /// The three shapes the viewer cycles through, with their stock sizes
    pub const PRESETS: [ShapeKind; 3] = [
        ShapeKind::Tetrahedron { size: 100.0 },
        ShapeKind::Cube { size: 100.0 },
        ShapeKind::Cuboid { length: 50.0, width: 75.0, height: 100.0 },
    ];

    pub fn build(&self) -> Mesh {
        match *self {
            ShapeKind::Tetrahedron { size } => tetrahedron(size),
            ShapeKind::Cube { size } => cube(size),
            ShapeKind::Cuboid { length, width, height } => cuboid(length, width, height),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Tetrahedron { .. } => "Tetrahedron",
            ShapeKind::Cube { .. } => "Cube",
            ShapeKind::Cuboid { .. } => "Cuboid",
        }
    }
}

impl Default for ShapeKind {
    fn default() -> Self {
        ShapeKind::Cube { size: 100.0 }
    }
}
