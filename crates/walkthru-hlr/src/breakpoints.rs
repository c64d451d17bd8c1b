//! Breakpoint discovery along projected edges.
//!
//! An edge's visibility can only change where its projection crosses the
//! projection of another edge, so splitting at every crossing leaves
//! sub-segments that are either wholly visible or wholly hidden.

use crate::scene_object::ProjectedObject;
use crate::types::Point2D;

/// Tolerance for parallel lines and for crossings at segment endpoints.
pub const BREAKPOINT_EPSILON: f64 = 1e-8;

fn cross(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

/// Parameter `t` along `p0 -> p1` where it properly crosses `q0 -> q1`.
///
/// Returns `None` for parallel or collinear segments, and for crossings at
/// or within [`BREAKPOINT_EPSILON`] of either segment's endpoints (shared
/// vertices are not crossings).
pub fn segment_crossing(p0: Point2D, p1: Point2D, q0: Point2D, q1: Point2D) -> Option<f64> {
    let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
    let (ex, ey) = (q1.x - q0.x, q1.y - q0.y);

    let denom = cross(dx, dy, ex, ey);
    let scale = (dx * dx + dy * dy).sqrt() * (ex * ex + ey * ey).sqrt();
    if scale == 0.0 || denom.abs() <= BREAKPOINT_EPSILON * scale {
        return None;
    }

    let (wx, wy) = (q0.x - p0.x, q0.y - p0.y);
    let t = cross(wx, wy, ex, ey) / denom;
    let s = cross(wx, wy, dx, dy) / denom;

    let inside = |u: f64| u > BREAKPOINT_EPSILON && u < 1.0 - BREAKPOINT_EPSILON;
    if inside(t) && inside(s) {
        Some(t)
    } else {
        None
    }
}

/// Sorted parameters in `[0, 1]` at which the edge `p0 -> p1` may change
/// visibility, checked against every projected edge of every object.
///
/// Always starts with `0.0` and ends with `1.0`; values are ordered
/// numerically and near-duplicates are collapsed.
///
/// Only proper crossings split the edge. Where another projected vertex
/// lands exactly on the edge (a T-junction) no breakpoint is added, so the
/// sub-segment through that point keeps a single visibility taken at its
/// midpoint.
pub fn find_breakpoints(p0: Point2D, p1: Point2D, objects: &[ProjectedObject<'_, '_>]) -> Vec<f64> {
    let mut breakpoints = vec![0.0, 1.0];
    for projected in objects {
        breakpoints.extend(
            projected
                .projected_edges()
                .filter_map(|(q0, q1)| segment_crossing(p0, p1, q0, q1)),
        );
    }

    breakpoints.sort_by(f64::total_cmp);
    breakpoints.dedup_by(|a, b| (*a - *b).abs() <= BREAKPOINT_EPSILON);
    breakpoints
}
