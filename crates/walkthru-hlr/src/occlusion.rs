//! Ray/triangle occlusion testing.
//!
//! A point is hidden when some scene face crosses the segment between the
//! view origin and the point, strictly nearer to the origin than the point.
//! Every query scans every face; scenes are small enough that no spatial
//! index is kept.

use walkthru_math::{Point3, Vec3};

use crate::geometry::SceneGeometry;
use crate::types::Triangle3D;

/// Tolerance for parallel rays and for depth ties.
pub const OCCLUSION_EPSILON: f64 = 1e-8;

/// Where a view ray meets a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceHit {
    /// The intersection point.
    pub point: Point3,
    /// Distance from the view origin to the intersection.
    pub depth: f64,
    /// Barycentric weights `(alpha0, alpha1, alpha2)` of the intersection.
    pub barycentric: [f64; 3],
}

/// Intersect the ray `origin + t * cast` (`t > 0`) with a triangle.
///
/// Returns `None` when the ray runs parallel to the face plane, meets the
/// plane behind the origin, or meets it outside the triangle. Boundary
/// points count as inside.
pub fn intersect_face(tri: &Triangle3D, origin: &Point3, cast: &Vec3) -> Option<FaceHit> {
    let e1 = tri.v1 - tri.v0;
    let e2 = tri.v2 - tri.v0;
    let v1 = e1.try_normalize(f64::EPSILON)?;
    let v2 = e2.try_normalize(f64::EPSILON)?;

    // Unit-edge normal; its length is the sine of the corner angle.
    let n = v1.cross(&v2);
    let long_delta = (tri.v0 - *origin).dot(&n);
    let short_delta = cast.dot(&n);
    if short_delta.abs() < OCCLUSION_EPSILON {
        return None;
    }

    let t = long_delta / short_delta;
    if t <= 0.0 {
        return None;
    }
    let q = *origin + *cast * t;

    // Coordinates of q - v0 in the (e1, e2) basis, via the Gram system.
    let w = q - tri.v0;
    let (d11, d12, d22) = (e1.dot(&e1), e1.dot(&e2), e2.dot(&e2));
    let (w1, w2) = (w.dot(&e1), w.dot(&e2));
    let det = d11 * d22 - d12 * d12;
    if det.abs() < f64::EPSILON * d11 * d22 {
        return None;
    }
    let alpha1 = (d22 * w1 - d12 * w2) / det;
    let alpha2 = (d11 * w2 - d12 * w1) / det;
    let alpha0 = 1.0 - alpha1 - alpha2;

    let in_unit = |a: f64| (0.0..=1.0).contains(&a);
    if !(in_unit(alpha0) && in_unit(alpha1) && in_unit(alpha2)) {
        return None;
    }

    Some(FaceHit {
        point: q,
        depth: (q - *origin).norm(),
        barycentric: [alpha0, alpha1, alpha2],
    })
}

/// Whether `tri` lies strictly between `origin` and a point at distance
/// `depth` along `cast`.
///
/// A face meeting the ray at the point's own depth (such as a face that
/// contains the point) does not occlude it.
pub fn face_occludes(tri: &Triangle3D, origin: &Point3, cast: &Vec3, depth: f64) -> bool {
    intersect_face(tri, origin, cast)
        .is_some_and(|hit| hit.depth < depth - OCCLUSION_EPSILON * depth.max(1.0))
}

/// Whether any face of any object hides `point` from `view_origin`.
pub fn is_occluded<G: SceneGeometry>(point: &Point3, view_origin: &Point3, objects: &[G]) -> bool {
    let cast = *point - *view_origin;
    let depth = cast.norm();
    objects.iter().any(|object| {
        object
            .all_faces()
            .any(|tri| face_occludes(&tri, view_origin, &cast, depth))
    })
}
