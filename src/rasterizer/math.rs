//! Vector and matrix math for the orthographic pipeline
//!
//! Row-major 3x3 matrices, vectors multiplied as rows (`v · M`).

use std::ops::{Add, Mul, Sub};
use serde::{Serialize, Deserialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Vec3) -> f64 {
        (self - other).len()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f64) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Per-axis scale
    pub fn scale_axes(self, sx: f64, sy: f64, sz: f64) -> Vec3 {
        Vec3 {
            x: self.x * sx,
            y: self.y * sy,
            z: self.z * sz,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 {
        self.scale(s)
    }
}

/// 3x3 rotation matrix, row-major
///
/// Only built from compositions of elementary rotations, so it stays
/// orthogonal: the transpose is the inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub m: [f64; 9],
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        m: [
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        ],
    };

    pub fn new(m: [f64; 9]) -> Self {
        Self { m }
    }

    /// Rotation about the vertical (y) axis, in radians
    pub fn heading(h: f64) -> Self {
        let (s, c) = h.sin_cos();
        Self::new([
            c, 0.0, s,
            0.0, 1.0, 0.0,
            -s, 0.0, c,
        ])
    }

    /// Rotation about the horizontal (x) axis, in radians
    pub fn pitch(p: f64) -> Self {
        let (s, c) = p.sin_cos();
        Self::new([
            1.0, 0.0, 0.0,
            0.0, c, s,
            0.0, -s, c,
        ])
    }

    /// Heading times pitch. Not commutative; the order is fixed.
    pub fn compose(heading: f64, pitch: f64) -> Self {
        Self::heading(heading).multiply(&Self::pitch(pitch))
    }

    /// Standard row-major product: `r[row][col] = Σ self[row][k] * other[k][col]`
    pub fn multiply(&self, other: &Mat3) -> Mat3 {
        let mut r = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                for k in 0..3 {
                    r[row * 3 + col] += self.m[row * 3 + k] * other.m[k * 3 + col];
                }
            }
        }
        Mat3 { m: r }
    }

    /// Multiply `v` as a row vector by this matrix (`v · M`, not `M · v`)
    pub fn transform(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3 {
            x: v.x * m[0] + v.y * m[3] + v.z * m[6],
            y: v.x * m[1] + v.y * m[4] + v.z * m[7],
            z: v.x * m[2] + v.y * m[5] + v.z * m[8],
        }
    }

    pub fn transpose(&self) -> Mat3 {
        let m = &self.m;
        Mat3::new([
            m[0], m[3], m[6],
            m[1], m[4], m[7],
            m[2], m[5], m[8],
        ])
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat3 {
    type Output = Mat3;
    fn mul(self, other: Mat3) -> Mat3 {
        self.multiply(&other)
    }
}

/// Twice the signed area of the projected triangle (x/y only)
pub fn signed_area(v1: Vec3, v2: Vec3, v3: Vec3) -> f64 {
    (v1.y - v3.y) * (v2.x - v3.x) + (v2.y - v3.y) * (v3.x - v1.x)
}

/// Barycentric weights of pixel (px, py) against the projected triangle.
/// `area` must be `signed_area(v1, v2, v3)` and non-zero.
/// Sign conventions cancel, so the result does not depend on winding.
pub fn barycentric(px: f64, py: f64, v1: Vec3, v2: Vec3, v3: Vec3, area: f64) -> (f64, f64, f64) {
    let b1 = ((py - v3.y) * (v2.x - v3.x) + (v2.y - v3.y) * (v3.x - px)) / area;
    let b2 = ((py - v1.y) * (v3.x - v1.x) + (v3.y - v1.y) * (v1.x - px)) / area;
    let b3 = ((py - v2.y) * (v1.x - v2.x) + (v1.y - v2.y) * (v2.x - px)) / area;
    (b1, b2, b3)
}
