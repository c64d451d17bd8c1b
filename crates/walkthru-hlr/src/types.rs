//! Core value types shared by the projection and hidden-line passes.

use serde::{Deserialize, Serialize};
use walkthru_math::Point3;

/// A 2D point on the projection plane or on an output page.
///
/// We use a custom type instead of nalgebra::Point2 so drawing commands can
/// be serialized without nalgebra's serde feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at parameter `t` on the segment from `self` (t = 0) to `other` (t = 1).
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
        }
    }
}

/// The projection of one vertex through one camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionRecord {
    /// The original 3D point.
    pub point: Point3,
    /// Its 2D coordinates in the camera's (right, up) basis.
    pub projected: Point2D,
    /// Signed distance of the point along the camera's view axis.
    pub depth: f64,
}

/// An edge of a mesh as a pair of vertex indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshEdge {
    /// Index of the first vertex.
    pub v0: usize,
    /// Index of the second vertex.
    pub v1: usize,
}

impl MeshEdge {
    /// Create a new mesh edge.
    pub fn new(v0: usize, v1: usize) -> Self {
        Self { v0, v1 }
    }
}

/// A 3D triangle, used for occlusion testing.
#[derive(Debug, Clone, Copy)]
pub struct Triangle3D {
    /// First vertex.
    pub v0: Point3,
    /// Second vertex.
    pub v1: Point3,
    /// Third vertex.
    pub v2: Point3,
}

impl Triangle3D {
    /// Create a new triangle.
    pub fn new(v0: Point3, v1: Point3, v2: Point3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Centroid of the triangle.
    pub fn centroid(&self) -> Point3 {
        Point3::new(
            (self.v0.x + self.v1.x + self.v2.x) / 3.0,
            (self.v0.y + self.v1.y + self.v2.y) / 3.0,
            (self.v0.z + self.v1.z + self.v2.z) / 3.0,
        )
    }
}
