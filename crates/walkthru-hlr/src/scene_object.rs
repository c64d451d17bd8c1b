//! Placed instances of library prototypes.

use walkthru_math::Point3;

use crate::camera::Camera;
use crate::error::{HlrError, Result};
use crate::geometry::{ObjectLibrary, PrototypeGeometry, SceneGeometry};
use crate::scene::Placement;
use crate::types::{MeshEdge, Point2D, ProjectionRecord};

/// A prototype repositioned by a placement.
///
/// Owns the transformed vertex positions and borrows edge and face
/// topology from the prototype unchanged.
#[derive(Debug, Clone)]
pub struct SceneObject<'a> {
    name: &'a str,
    prototype: &'a PrototypeGeometry,
    vertices: Vec<Point3>,
}

impl<'a> SceneObject<'a> {
    /// Instance `prototype` at `placement`.
    pub fn new(prototype: &'a PrototypeGeometry, placement: &'a Placement) -> Self {
        let transform = placement.transform();
        let vertices = prototype
            .all_vertices()
            .map(|v| transform.apply_point(v))
            .collect();
        Self {
            name: &placement.name,
            prototype,
            vertices,
        }
    }

    /// Look up the placement's prototype in `library` and instance it.
    pub fn from_library<L>(library: &'a L, placement: &'a Placement) -> Result<Self>
    where
        L: ObjectLibrary + ?Sized,
    {
        let prototype = library
            .get(&placement.name)
            .ok_or_else(|| HlrError::UnknownPrototype(placement.name.clone()))?;
        Ok(Self::new(prototype, placement))
    }

    /// Library name of the instanced prototype.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Project every vertex through `camera`.
    ///
    /// Compute this once per (object, camera) pair and reuse it for every
    /// edge.
    pub fn project_vertices(&self, camera: &Camera) -> VertexProjections {
        VertexProjections {
            records: self.vertices.iter().map(|v| camera.project(v)).collect(),
        }
    }
}

impl SceneGeometry for SceneObject<'_> {
    fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    fn edges(&self) -> &[MeshEdge] {
        self.prototype.edges()
    }

    fn faces(&self) -> &[[usize; 3]] {
        self.prototype.faces()
    }
}

/// Per-vertex projections of one object under one camera, indexed like
/// the object's vertices.
#[derive(Debug, Clone)]
pub struct VertexProjections {
    records: Vec<Result<ProjectionRecord>>,
}

impl VertexProjections {
    /// The projection of vertex `index`, or why it has none.
    pub fn get(&self, index: usize) -> Result<&ProjectionRecord> {
        match self.records.get(index) {
            Some(Ok(record)) => Ok(record),
            Some(Err(e)) => Err(e.clone()),
            None => Err(HlrError::InvalidGeometry(format!(
                "vertex {index} of {} has no projection",
                self.records.len()
            ))),
        }
    }

    /// Both endpoint projections of `edge`.
    pub fn edge(&self, edge: &MeshEdge) -> Result<(&ProjectionRecord, &ProjectionRecord)> {
        Ok((self.get(edge.v0)?, self.get(edge.v1)?))
    }

    /// Number of vertices covered.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no vertices are covered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// An object together with its projections under the current camera.
#[derive(Debug, Clone)]
pub struct ProjectedObject<'s, 'a> {
    /// The placed object.
    pub object: &'s SceneObject<'a>,
    /// Its vertex projections.
    pub projections: VertexProjections,
}

impl<'s, 'a> ProjectedObject<'s, 'a> {
    /// Project `object` through `camera`.
    pub fn new(object: &'s SceneObject<'a>, camera: &Camera) -> Self {
        Self {
            object,
            projections: object.project_vertices(camera),
        }
    }

    /// Projected 2D endpoints of every edge whose endpoints both project.
    pub fn projected_edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        self.object.edges().iter().filter_map(|edge| {
            self.projections
                .edge(edge)
                .ok()
                .map(|(a, b)| (a.projected, b.projected))
        })
    }
}
