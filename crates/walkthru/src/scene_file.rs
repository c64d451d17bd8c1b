//! Scene files: a walk-through, its render options, and custom prototypes.
//!
//! ```toml
//! [options]
//! upward = [0.0, 0.0, 1.0]
//!
//! [[shots]]
//! position = [0.0, 0.0, 0.5]
//! direction = [1.0, 0.0, 0.0]
//!
//! [[placements]]
//! name = "wedge"
//! position = [3.0, 0.0, 0.0]
//! scale = 0.8
//!
//! [prototypes.wedge]
//! vertices = [[0.0, -1.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]
//! faces = [[0, 1, 2], [0, 1, 3], [1, 2, 3], [2, 0, 3]]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use walkthru_hlr::{
    render_walk_thru, Diagnostic, DiagnosticScope, HlrError, PageSink, Placement,
    PrototypeGeometry, PrototypeLibrary, RenderOptions, RenderReport, SceneBounds, Shot, WalkThru,
};
use walkthru_math::Point3;

use crate::{Result, WalkThruError};

/// Mesh data for a prototype defined in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrototypeSpec {
    /// Vertex positions `[x, y, z]`.
    pub vertices: Vec<[f64; 3]>,
    /// Triangles as vertex index triples.
    #[serde(default)]
    pub faces: Vec<[usize; 3]>,
    /// Drawn edges; derived from the face sides when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<[usize; 2]>>,
}

impl PrototypeSpec {
    /// Build and validate the prototype mesh.
    pub fn to_geometry(&self) -> walkthru_hlr::Result<PrototypeGeometry> {
        let vertices: Vec<Point3> = self.vertices.iter().map(|&v| Point3::from(v)).collect();
        match &self.edges {
            Some(edges) => PrototypeGeometry::new(vertices, edges.clone(), self.faces.clone()),
            None => PrototypeGeometry::from_faces(vertices, self.faces.clone()),
        }
    }
}

/// Everything needed to render a walk-through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneFile {
    /// Rendering settings.
    pub options: RenderOptions,
    /// Camera shots in order. An empty list means one shot at the origin
    /// facing +X.
    pub shots: Vec<Shot>,
    /// Placed objects.
    pub placements: Vec<Placement>,
    /// Floor extent the placements are kept inside.
    pub bounds: SceneBounds,
    /// Prototypes added to (or replacing) the built-in library.
    pub prototypes: BTreeMap<String, PrototypeSpec>,
}

impl SceneFile {
    /// Load a scene from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let scene = match extension.as_deref() {
            Some("toml") => Self::from_toml(&text)?,
            Some("json") => Self::from_json(&text)?,
            _ => return Err(WalkThruError::UnsupportedFormat(path.display().to_string())),
        };
        debug!(
            "loaded {}: {} shots, {} placements, {} prototypes",
            path.display(),
            scene.shots.len(),
            scene.placements.len(),
            scene.prototypes.len()
        );
        Ok(scene)
    }

    /// Parse a scene from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parse a scene from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The built-in prototypes plus this scene's own.
    ///
    /// Fails on the first prototype with invalid geometry.
    pub fn library(&self) -> Result<PrototypeLibrary> {
        let (library, rejected) = self.usable_library();
        match rejected.into_iter().next() {
            Some((name, source)) => Err(WalkThruError::Prototype { name, source }),
            None => Ok(library),
        }
    }

    /// The built-in prototypes plus every valid prototype of this scene.
    ///
    /// Invalid prototypes are left out and returned by name.
    pub fn usable_library(&self) -> (PrototypeLibrary, Vec<(String, HlrError)>) {
        let mut library = PrototypeLibrary::with_builtins();
        let mut rejected = Vec::new();
        for (name, spec) in &self.prototypes {
            match spec.to_geometry() {
                Ok(geometry) => {
                    if library.insert(name.clone(), geometry).is_some() {
                        debug!("prototype `{name}` replaces the built-in");
                    }
                }
                Err(e) => {
                    warn!("prototype `{name}` is invalid: {e}");
                    rejected.push((name.clone(), e));
                }
            }
        }
        (library, rejected)
    }

    /// The walk-through with every placement clamped to the bounds.
    pub fn walk_thru(&self) -> WalkThru {
        let mut walk = if self.shots.is_empty() {
            WalkThru::new()
        } else {
            WalkThru::empty()
        };
        walk.shots.extend(self.shots.iter().copied());
        walk.placements = self.placements.clone();
        walk.bounds = self.bounds;
        walk.clamp_placements();
        walk
    }

    /// Render every shot to `sink`.
    ///
    /// Invalid prototypes are reported and left out, along with the
    /// placements that name them.
    pub fn render<S: PageSink + ?Sized>(&self, sink: &mut S) -> RenderReport {
        let (library, rejected) = self.usable_library();
        let walk = self.walk_thru();
        let mut report = render_walk_thru(&walk, &library, sink, &self.options);
        for (name, error) in rejected {
            report.diagnostics.push(Diagnostic {
                scope: DiagnosticScope::Prototype { name },
                error,
            });
        }
        report
    }
}
