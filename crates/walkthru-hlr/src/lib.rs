#![warn(missing_docs)]

//! Perspective walk-through rendering with hidden lines removed.
//!
//! A walk-through is a list of camera shots over a scene of placed
//! prototypes. Each shot becomes one page of line-drawing commands:
//!
//! - **Camera**: a left-handed frame and a perspective projection onto the
//!   plane one unit in front of the camera center
//! - **Scene objects**: library prototypes moved, rotated, and scaled by a
//!   placement, sharing the prototype's edge and face topology
//! - **Breakpoints**: where a projected edge crosses other projected edges
//! - **Occlusion**: whether any face lies between the camera and a point
//! - **Rendering**: split, test, and draw each edge onto a fixed page
//!
//! # Example
//!
//! ```ignore
//! use walkthru_hlr::{render_walk_thru, Placement, PrototypeLibrary, RecordingSink,
//!     RenderOptions, WalkThru};
//! use walkthru_math::Point3;
//!
//! let mut walk = WalkThru::new();
//! walk.add_placement(Placement::new("cube", Point3::new(3.0, 0.0, 0.0)).with_scale(0.5));
//!
//! let library = PrototypeLibrary::with_builtins();
//! let mut sink = RecordingSink::new();
//! let report = render_walk_thru(&walk, &library, &mut sink, &RenderOptions::default());
//! println!("{} lines on {} pages", report.lines_drawn, report.pages);
//! ```

pub mod breakpoints;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod occlusion;
pub mod page;
pub mod render;
pub mod scene;
pub mod scene_object;
pub mod types;

pub use breakpoints::{find_breakpoints, segment_crossing, BREAKPOINT_EPSILON};
pub use camera::Camera;
pub use error::{HlrError, Result};
pub use geometry::{
    ObjectLibrary, PrototypeGeometry, PrototypeLibrary, SceneGeometry, BUILTIN_PROTOTYPES,
};
pub use occlusion::{face_occludes, intersect_face, is_occluded, FaceHit, OCCLUSION_EPSILON};
pub use page::{to_page_coords, DrawCommand, LineStyle, PageSink, RecordingSink, PAGE_SIZE};
pub use render::{
    instance_placements, render_walk_thru, Diagnostic, DiagnosticScope, RenderOptions,
    RenderReport,
};
pub use scene::{Placement, SceneBounds, Shot, WalkThru, MIN_PLACEMENT_SCALE};
pub use scene_object::{ProjectedObject, SceneObject, VertexProjections};
pub use types::{MeshEdge, Point2D, ProjectionRecord, Triangle3D};
