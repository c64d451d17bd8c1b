#![warn(missing_docs)]

//! Math types for the walkthru hidden-line renderer.
//!
//! Thin wrappers around nalgebra providing the points, vectors, placement
//! transforms and tolerance constants shared by the rendering crates.

use nalgebra::{Matrix4, Vector3, Vector4};

/// A point in 3D scene space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D scene space.
pub type Vec3 = Vector3<f64>;

/// Linear interpolation between two points: `a` at `t = 0`, `b` at `t = 1`.
#[inline]
pub fn lerp_point(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Uniform scale by `s` along every axis.
    pub fn uniform_scale(s: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = s;
        m[(1, 1)] = s;
        m[(2, 2)] = s;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Compose: `self` then `other` (self * other).
    ///
    /// Applying the result to a point applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in scene units.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-8 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-8,
        angular: 1e-9,
    };
}
