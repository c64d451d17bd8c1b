//! Prototype meshes and the object library that supplies them.
//!
//! A prototype is an immutable named mesh: vertex positions, edges as
//! vertex-index pairs, and triangular faces as vertex-index triples. Edges
//! are what gets drawn; faces are what occludes.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

use walkthru_math::Point3;

use crate::error::{HlrError, Result};
use crate::types::{MeshEdge, Triangle3D};

/// Read access to a vertex/edge/face mesh.
///
/// Implemented by prototypes and by placed scene objects, which share
/// topology but not vertex positions.
pub trait SceneGeometry {
    /// Vertex positions, indexed by the edge and face lists.
    fn vertices(&self) -> &[Point3];

    /// Edges in stable enumeration order.
    fn edges(&self) -> &[MeshEdge];

    /// Triangular faces as vertex-index triples.
    fn faces(&self) -> &[[usize; 3]];

    /// Iterate over vertex positions.
    fn all_vertices(&self) -> std::slice::Iter<'_, Point3> {
        self.vertices().iter()
    }

    /// Iterate over edges together with their endpoint positions.
    fn all_edges(&self) -> impl Iterator<Item = (MeshEdge, Point3, Point3)> + '_ {
        let vertices = self.vertices();
        self.edges()
            .iter()
            .map(move |e| (*e, vertices[e.v0], vertices[e.v1]))
    }

    /// Iterate over faces as positioned triangles.
    fn all_faces(&self) -> impl Iterator<Item = Triangle3D> + '_ {
        let vertices = self.vertices();
        self.faces()
            .iter()
            .map(move |&[a, b, c]| Triangle3D::new(vertices[a], vertices[b], vertices[c]))
    }
}

/// An immutable mesh from the object library.
#[derive(Debug, Clone, PartialEq)]
pub struct PrototypeGeometry {
    vertices: Vec<Point3>,
    edges: Vec<MeshEdge>,
    faces: Vec<[usize; 3]>,
}

impl PrototypeGeometry {
    /// Create a prototype from explicit edges and faces.
    ///
    /// Every index must refer to an existing vertex and no edge may join a
    /// vertex to itself.
    pub fn new(
        vertices: Vec<Point3>,
        edges: Vec<[usize; 2]>,
        faces: Vec<[usize; 3]>,
    ) -> Result<Self> {
        let n = vertices.len();
        for (i, &[a, b]) in edges.iter().enumerate() {
            if a >= n || b >= n {
                return Err(HlrError::InvalidGeometry(format!(
                    "edge {i} references vertex {} of {n}",
                    a.max(b)
                )));
            }
            if a == b {
                return Err(HlrError::InvalidGeometry(format!(
                    "edge {i} joins vertex {a} to itself"
                )));
            }
        }
        for (i, face) in faces.iter().enumerate() {
            if let Some(bad) = face.iter().find(|&&v| v >= n) {
                return Err(HlrError::InvalidGeometry(format!(
                    "face {i} references vertex {bad} of {n}"
                )));
            }
        }

        Ok(Self {
            vertices,
            edges: edges.into_iter().map(|[a, b]| MeshEdge::new(a, b)).collect(),
            faces,
        })
    }

    /// Create a prototype whose edges are the sides of its faces.
    ///
    /// Each unordered vertex pair becomes one edge, in order of first
    /// appearance.
    pub fn from_faces(vertices: Vec<Point3>, faces: Vec<[usize; 3]>) -> Result<Self> {
        let mut edges: Vec<[usize; 2]> = Vec::new();
        for &[a, b, c] in &faces {
            for (p, q) in [(a, b), (b, c), (c, a)] {
                if p == q {
                    continue;
                }
                let seen = edges
                    .iter()
                    .any(|&[x, y]| (x == p && y == q) || (x == q && y == p));
                if !seen {
                    edges.push([p, q]);
                }
            }
        }
        Self::new(vertices, edges, faces)
    }

    /// Upright triangle standing on its base circle, facing the X axis.
    pub fn triangle() -> Self {
        Self {
            vertices: vec![
                Point3::new(0.0, -1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            edges: vec![MeshEdge::new(0, 1), MeshEdge::new(1, 2), MeshEdge::new(2, 0)],
            faces: vec![[0, 1, 2]],
        }
    }

    /// Flat square lying on the ground, corners on the unit circle.
    pub fn square() -> Self {
        let s = FRAC_1_SQRT_2;
        Self {
            vertices: vec![
                Point3::new(-s, -s, 0.0),
                Point3::new(s, -s, 0.0),
                Point3::new(s, s, 0.0),
                Point3::new(-s, s, 0.0),
            ],
            edges: vec![
                MeshEdge::new(0, 1),
                MeshEdge::new(1, 2),
                MeshEdge::new(2, 3),
                MeshEdge::new(3, 0),
            ],
            faces: vec![[0, 1, 2], [0, 2, 3]],
        }
    }

    /// Cube resting on the ground whose base corners lie on the unit circle.
    ///
    /// Only the twelve cube edges are drawn; face diagonals are not edges.
    pub fn cube() -> Self {
        let s = FRAC_1_SQRT_2;
        let h = SQRT_2;
        #[rustfmt::skip]
        let vertices = vec![
            Point3::new(-s, -s, 0.0), // 0
            Point3::new( s, -s, 0.0), // 1
            Point3::new( s,  s, 0.0), // 2
            Point3::new(-s,  s, 0.0), // 3
            Point3::new(-s, -s, h),   // 4
            Point3::new( s, -s, h),   // 5
            Point3::new( s,  s, h),   // 6
            Point3::new(-s,  s, h),   // 7
        ];
        #[rustfmt::skip]
        let edges = [
            [0, 1], [1, 2], [2, 3], [3, 0],
            [4, 5], [5, 6], [6, 7], [7, 4],
            [0, 4], [1, 5], [2, 6], [3, 7],
        ];
        #[rustfmt::skip]
        let faces = vec![
            [0, 2, 1], [0, 3, 2], // Bottom
            [4, 5, 6], [4, 6, 7], // Top
            [0, 1, 5], [0, 5, 4], // Front
            [2, 3, 7], [2, 7, 6], // Back
            [0, 4, 7], [0, 7, 3], // Left
            [1, 2, 6], [1, 6, 5], // Right
        ];
        Self {
            vertices,
            edges: edges.iter().map(|&[a, b]| MeshEdge::new(a, b)).collect(),
            faces,
        }
    }

    /// Tetrahedron with its base on the unit circle and apex at height 1.
    pub fn tetrahedron() -> Self {
        let base = |deg: f64| {
            let (s, c) = deg.to_radians().sin_cos();
            Point3::new(c, s, 0.0)
        };
        let vertices = vec![base(90.0), base(210.0), base(330.0), Point3::new(0.0, 0.0, 1.0)];
        let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        let mut edges = Vec::new();
        for &[a, b, c] in &faces {
            for (p, q) in [(a, b), (b, c), (c, a)] {
                let e = MeshEdge::new(p.min(q), p.max(q));
                if !edges.contains(&e) {
                    edges.push(e);
                }
            }
        }
        Self {
            vertices,
            edges,
            faces,
        }
    }
}

impl SceneGeometry for PrototypeGeometry {
    fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    fn edges(&self) -> &[MeshEdge] {
        &self.edges
    }

    fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }
}

/// Lookup of prototypes by name.
pub trait ObjectLibrary {
    /// The prototype registered under `name`, if any.
    fn get(&self, name: &str) -> Option<&PrototypeGeometry>;
}

/// Names of the prototypes available from [`PrototypeLibrary::with_builtins`].
pub const BUILTIN_PROTOTYPES: [&str; 4] = ["triangle", "square", "cube", "tetrahedron"];

/// A name-ordered registry of prototypes.
#[derive(Debug, Clone, Default)]
pub struct PrototypeLibrary {
    prototypes: BTreeMap<String, PrototypeGeometry>,
}

impl PrototypeLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library holding the built-in prototypes.
    pub fn with_builtins() -> Self {
        let mut lib = Self::new();
        lib.insert("triangle", PrototypeGeometry::triangle());
        lib.insert("square", PrototypeGeometry::square());
        lib.insert("cube", PrototypeGeometry::cube());
        lib.insert("tetrahedron", PrototypeGeometry::tetrahedron());
        lib
    }

    /// Register a prototype, returning the one it replaces.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        prototype: PrototypeGeometry,
    ) -> Option<PrototypeGeometry> {
        self.prototypes.insert(name.into(), prototype)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prototypes.keys().map(String::as_str)
    }

    /// Number of registered prototypes.
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

impl ObjectLibrary for PrototypeLibrary {
    fn get(&self, name: &str) -> Option<&PrototypeGeometry> {
        self.prototypes.get(name)
    }
}
