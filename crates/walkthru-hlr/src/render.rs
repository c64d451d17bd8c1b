//! Walk-through rendering with hidden lines removed.
//!
//! For each shot: build the camera, project every object once, then for
//! every edge split it at its crossings with all other projected edges and
//! draw each piece whose 3D midpoint no face hides from the camera.

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use walkthru_math::{lerp_point, Vec3};

use crate::breakpoints::find_breakpoints;
use crate::camera::Camera;
use crate::error::HlrError;
use crate::geometry::{ObjectLibrary, SceneGeometry};
use crate::occlusion::is_occluded;
use crate::page::{to_page_coords, LineStyle, PageSink};
use crate::scene::WalkThru;
use crate::scene_object::{ProjectedObject, SceneObject};

/// Rendering settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Stroke used for every page.
    pub style: LineStyle,
    /// Up hint for every camera [x, y, z].
    pub upward: [f64; 3],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: LineStyle::default(),
            upward: [0.0, 0.0, 1.0],
        }
    }
}

/// What a diagnostic refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticScope {
    /// A scene-supplied prototype left out of the library.
    Prototype {
        /// Name the prototype was given.
        name: String,
    },
    /// A shot that produced no page.
    Shot {
        /// Index into the shot list.
        shot: usize,
    },
    /// A placement left out of every page.
    Placement {
        /// Index into the placement list.
        placement: usize,
    },
    /// An edge left off one page.
    Edge {
        /// Index into the shot list.
        shot: usize,
        /// Index of the object among the rendered objects.
        object: usize,
        /// Index of the edge within its object.
        edge: usize,
    },
}

/// One reported rendering failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// What was skipped.
    pub scope: DiagnosticScope,
    /// Why it was skipped.
    pub error: HlrError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            DiagnosticScope::Prototype { name } => {
                write!(f, "prototype `{name}` skipped: {}", self.error)
            }
            DiagnosticScope::Shot { shot } => write!(f, "shot {shot} skipped: {}", self.error),
            DiagnosticScope::Placement { placement } => {
                write!(f, "placement {placement} skipped: {}", self.error)
            }
            DiagnosticScope::Edge { shot, object, edge } => write!(
                f,
                "shot {shot}, object {object}, edge {edge} skipped: {}",
                self.error
            ),
        }
    }
}

/// Summary of a rendering pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    /// Pages started (one per successful shot).
    pub pages: usize,
    /// Visible sub-segments drawn.
    pub lines_drawn: usize,
    /// Sub-segments found hidden.
    pub segments_hidden: usize,
    /// Edges left off a page because an endpoint could not be projected.
    pub edges_skipped: usize,
    /// One entry per skipped prototype, shot, placement, or edge.
    pub diagnostics: Vec<Diagnostic>,
}

impl RenderReport {
    fn record(&mut self, scope: DiagnosticScope, error: HlrError) {
        let diagnostic = Diagnostic { scope, error };
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Whether nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Instance every placement of `walk` that the library can supply.
///
/// Placements naming unknown prototypes are reported and left out.
pub fn instance_placements<'a, L>(
    walk: &'a WalkThru,
    library: &'a L,
    report: &mut RenderReport,
) -> Vec<SceneObject<'a>>
where
    L: ObjectLibrary + ?Sized,
{
    let mut objects = Vec::with_capacity(walk.placements.len());
    for (index, placement) in walk.placements.iter().enumerate() {
        match SceneObject::from_library(library, placement) {
            Ok(object) => objects.push(object),
            Err(e) => report.record(DiagnosticScope::Placement { placement: index }, e),
        }
    }
    objects
}

/// Render every shot of `walk` to `sink`, one page per shot.
///
/// Failures never abort the pass: a degenerate camera drops its shot, an
/// unknown prototype drops its placement, and an edge with an unprojectable
/// endpoint is left off its page. Each is reported once.
pub fn render_walk_thru<L, S>(
    walk: &WalkThru,
    library: &L,
    sink: &mut S,
    options: &RenderOptions,
) -> RenderReport
where
    L: ObjectLibrary + ?Sized,
    S: PageSink + ?Sized,
{
    let mut report = RenderReport::default();
    let objects = instance_placements(walk, library, &mut report);
    let upward = Vec3::from(options.upward);

    for (shot_index, shot) in walk.shots.iter().enumerate() {
        let camera = match Camera::new(shot.position_point(), shot.direction_vec(), upward) {
            Ok(camera) => camera,
            Err(e) => {
                report.record(DiagnosticScope::Shot { shot: shot_index }, e);
                continue;
            }
        };

        sink.new_page();
        sink.set_line_style(&options.style);
        report.pages += 1;

        let drawn_before = report.lines_drawn;
        render_shot(shot_index, &camera, &objects, sink, &mut report);
        debug!(
            "shot {shot_index}: {} lines drawn",
            report.lines_drawn - drawn_before
        );
    }

    info!(
        "rendered {} pages: {} lines drawn, {} segments hidden, {} diagnostics",
        report.pages,
        report.lines_drawn,
        report.segments_hidden,
        report.diagnostics.len()
    );
    report
}

fn render_shot<S>(
    shot_index: usize,
    camera: &Camera,
    objects: &[SceneObject<'_>],
    sink: &mut S,
    report: &mut RenderReport,
) where
    S: PageSink + ?Sized,
{
    let projected: Vec<ProjectedObject<'_, '_>> = objects
        .iter()
        .map(|object| ProjectedObject::new(object, camera))
        .collect();
    let view_origin = camera.center();

    for (object_index, target) in projected.iter().enumerate() {
        for (edge_index, edge) in target.object.edges().iter().enumerate() {
            let (r0, r1) = match target.projections.edge(edge) {
                Ok(records) => records,
                Err(e) => {
                    report.edges_skipped += 1;
                    let scope = DiagnosticScope::Edge {
                        shot: shot_index,
                        object: object_index,
                        edge: edge_index,
                    };
                    report.record(scope, e);
                    continue;
                }
            };

            let breakpoints = find_breakpoints(r0.projected, r1.projected, &projected);
            for pair in breakpoints.windows(2) {
                let (t0, t1) = (pair[0], pair[1]);
                let mid = lerp_point(&r0.point, &r1.point, 0.5 * (t0 + t1));
                if is_occluded(&mid, &view_origin, objects) {
                    report.segments_hidden += 1;
                    continue;
                }

                let start = to_page_coords(r0.projected.lerp(&r1.projected, t0));
                let end = to_page_coords(r0.projected.lerp(&r1.projected, t1));
                sink.draw_line(start.x, start.y, end.x, end.y);
                report.lines_drawn += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PrototypeGeometry, PrototypeLibrary};
    use crate::page::{DrawCommand, RecordingSink};
    use crate::scene::{Placement, Shot};
    use crate::types::Point2D;
    use approx::assert_relative_eq;
    use walkthru_math::Point3;

    fn flat_triangle(half: f64, y0: f64, apex: f64, z: f64) -> PrototypeGeometry {
        PrototypeGeometry::new(
            vec![
                Point3::new(-half, y0, z),
                Point3::new(half, y0, z),
                Point3::new(0.0, apex, z),
            ],
            vec![[0, 1], [1, 2], [2, 0]],
            vec![[0, 1, 2]],
        )
        .unwrap()
    }

    /// Camera at the origin looking down +Z with +Y up.
    fn z_walk(placements: Vec<Placement>) -> (WalkThru, RenderOptions) {
        let mut walk = WalkThru::empty();
        walk.add_shot(Shot::new(Point3::origin(), Vec3::z()));
        walk.placements = placements;
        let options = RenderOptions {
            upward: [0.0, 1.0, 0.0],
            ..RenderOptions::default()
        };
        (walk, options)
    }

    #[test]
    fn test_single_triangle_three_lines() {
        let mut walk = WalkThru::new();
        walk.add_placement(Placement::new("triangle", Point3::new(2.0, 0.0, 0.0)).with_scale(0.5));
        let library = PrototypeLibrary::with_builtins();
        let mut sink = RecordingSink::new();

        let report = render_walk_thru(&walk, &library, &mut sink, &RenderOptions::default());

        assert!(report.is_clean());
        assert_eq!(report.pages, 1);
        assert_eq!(report.lines_drawn, 3);
        assert_eq!(sink.commands[0], DrawCommand::NewPage);
        assert_eq!(sink.commands[1], DrawCommand::LineStyle(LineStyle::default()));

        // Projected vertices: (0.25, 0), (-0.25, 0), (0, 0.25).
        let expected = [
            ((33.75, 54.0), (20.25, 54.0)),
            ((20.25, 54.0), (27.0, 47.25)),
            ((27.0, 47.25), (33.75, 54.0)),
        ];
        let lines: Vec<(Point2D, Point2D)> = sink.lines().collect();
        for ((a, b), ((ax, ay), (bx, by))) in lines.iter().zip(expected) {
            assert_relative_eq!(a.x, ax, epsilon = 1e-9);
            assert_relative_eq!(a.y, ay, epsilon = 1e-9);
            assert_relative_eq!(b.x, bx, epsilon = 1e-9);
            assert_relative_eq!(b.y, by, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_hidden_triangle_behind_nearer_one() {
        let mut library = PrototypeLibrary::new();
        library.insert("far", flat_triangle(1.0, -1.0, 1.0, 5.0));
        library.insert("near", flat_triangle(1.0, -1.0, 1.0, 2.0));
        let (walk, options) = z_walk(vec![
            Placement::new("far", Point3::origin()).with_scale(1.0),
            Placement::new("near", Point3::origin()).with_scale(1.0),
        ]);
        let mut sink = RecordingSink::new();

        let report = render_walk_thru(&walk, &library, &mut sink, &options);

        // The far triangle projects entirely inside the near one.
        assert_eq!(report.lines_drawn, 3);
        assert_eq!(report.segments_hidden, 3);
    }

    #[test]
    fn test_partially_hidden_edge_is_split() {
        let mut library = PrototypeLibrary::new();
        library.insert("far", flat_triangle(5.0, -1.0, 4.0, 5.0));
        library.insert("near", flat_triangle(1.0, -1.0, 1.0, 2.0));
        let (walk, options) = z_walk(vec![
            Placement::new("far", Point3::origin()).with_scale(1.0),
            Placement::new("near", Point3::origin()).with_scale(1.0),
        ]);
        let mut sink = RecordingSink::new();

        let report = render_walk_thru(&walk, &library, &mut sink, &options);

        // Far base splits in three with the middle hidden; the near
        // triangle's slanted sides split where the far base crosses them.
        assert_eq!(report.segments_hidden, 1);
        assert_eq!(report.lines_drawn, 9);
        assert!(report.is_clean());
    }

    #[test]
    fn test_degenerate_shot_is_skipped() {
        let mut walk = WalkThru::new();
        walk.add_shot(Shot::new(Point3::origin(), Vec3::z()));
        walk.add_shot(Shot::new(Point3::origin(), Vec3::zeros()));
        walk.add_placement(Placement::new("triangle", Point3::new(2.0, 0.0, 0.0)).with_scale(0.5));
        let library = PrototypeLibrary::with_builtins();
        let mut sink = RecordingSink::new();

        let report = render_walk_thru(&walk, &library, &mut sink, &RenderOptions::default());

        assert_eq!(report.pages, 1);
        assert_eq!(sink.num_pages(), 1);
        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.diagnostics[0].scope, DiagnosticScope::Shot { shot: 1 });
        assert_eq!(report.diagnostics[1].scope, DiagnosticScope::Shot { shot: 2 });
    }

    #[test]
    fn test_unknown_prototype_is_skipped() {
        let mut walk = WalkThru::new();
        walk.add_placement(Placement::new("teapot", Point3::new(2.0, 0.0, 0.0)));
        walk.add_placement(Placement::new("triangle", Point3::new(2.0, 0.0, 0.0)).with_scale(0.5));
        let library = PrototypeLibrary::with_builtins();
        let mut sink = RecordingSink::new();

        let report = render_walk_thru(&walk, &library, &mut sink, &RenderOptions::default());

        assert_eq!(report.lines_drawn, 3);
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic {
                scope: DiagnosticScope::Placement { placement: 0 },
                error: HlrError::UnknownPrototype("teapot".to_string()),
            }]
        );
    }

    #[test]
    fn test_zero_depth_edges_are_skipped() {
        let mut walk = WalkThru::new();
        // Every vertex sits in the camera's center plane x = 0.
        walk.add_placement(Placement::new("triangle", Point3::origin()));
        walk.add_placement(Placement::new("triangle", Point3::new(2.0, 0.0, 0.0)).with_scale(0.5));
        let library = PrototypeLibrary::with_builtins();
        let mut sink = RecordingSink::new();

        let report = render_walk_thru(&walk, &library, &mut sink, &RenderOptions::default());

        assert_eq!(report.edges_skipped, 3);
        assert_eq!(report.lines_drawn, 3);
        assert_eq!(report.diagnostics.len(), 3);
        assert!(report
            .diagnostics
            .iter()
            .all(|d| matches!(d.error, HlrError::DegenerateProjection { .. })));
        for (a, b) in sink.lines() {
            for v in [a.x, a.y, b.x, b.y] {
                assert!(v.is_finite());
            }
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut walk = WalkThru::new();
        walk.add_shot(Shot::new(Point3::new(0.0, -3.0, 0.5), Vec3::new(0.6, 1.0, 0.0)));
        walk.add_placement(Placement::new("cube", Point3::new(2.0, 1.0, 0.0)).with_scale(0.5));
        walk.add_placement(
            Placement::new("tetrahedron", Point3::new(2.5, 0.0, 0.0))
                .with_scale(0.6)
                .with_orientation(20.0),
        );
        let library = PrototypeLibrary::with_builtins();

        let mut first = RecordingSink::new();
        let mut second = RecordingSink::new();
        render_walk_thru(&walk, &library, &mut first, &RenderOptions::default());
        render_walk_thru(&walk, &library, &mut second, &RenderOptions::default());

        assert_eq!(first.num_pages(), 2);
        assert_eq!(first, second);
    }
}
