//! Perspective camera with a left-handed viewing frame.

use walkthru_math::{Point3, Tolerance, Vec3};

use crate::error::{HlrError, Result};
use crate::types::{Point2D, ProjectionRecord};

/// A perspective snapshot of the scene taken from `center`.
///
/// The frame `(right, up, into)` is orthonormal and left-handed: `into`
/// points into the scene and `(right, up)` span the virtual film, which
/// sits one unit in front of the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    center: Point3,
    into: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Build a camera at `center` looking along `towards`, rolled so that
    /// `upward` points up on the film.
    ///
    /// Fails with [`HlrError::DegenerateCamera`] when either direction is
    /// zero-length or the two are parallel.
    pub fn new(center: Point3, towards: Vec3, upward: Vec3) -> Result<Self> {
        let tol = Tolerance::DEFAULT;
        let into = towards.try_normalize(tol.linear).ok_or_else(|| {
            HlrError::DegenerateCamera("view direction has zero length".to_string())
        })?;
        let upward = upward.try_normalize(tol.linear).ok_or_else(|| {
            HlrError::DegenerateCamera("up hint has zero length".to_string())
        })?;

        // |into x upward| is the sine of the angle between them.
        let right = into.cross(&upward);
        let right = right.try_normalize(tol.angular).ok_or_else(|| {
            HlrError::DegenerateCamera("view direction is parallel to the up hint".to_string())
        })?;
        let up = right.cross(&into);

        Ok(Self {
            center,
            into,
            right,
            up,
        })
    }

    /// Center of projection.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Unit view direction.
    pub fn into_axis(&self) -> Vec3 {
        self.into
    }

    /// Unit film axis pointing right.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit film axis pointing up.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Signed distance of `point` along the view axis.
    pub fn depth(&self, point: &Point3) -> f64 {
        self.into.dot(&(*point - self.center))
    }

    /// Project a point onto the film with a perspective divide.
    ///
    /// A point at depth 1 maps to itself; farther points move toward the
    /// view axis. Points in the plane of the center have no projection and
    /// yield [`HlrError::DegenerateProjection`].
    pub fn project(&self, point: &Point3) -> Result<ProjectionRecord> {
        let depth = self.depth(point);
        if depth == 0.0 {
            return Err(HlrError::DegenerateProjection {
                x: point.x,
                y: point.y,
                z: point.z,
            });
        }

        let on_film = self.center + (*point - self.center) / depth;
        let film_origin = self.center + self.into;
        let film_vec = on_film - film_origin;

        Ok(ProjectionRecord {
            point: *point,
            projected: Point2D::new(film_vec.dot(&self.right), film_vec.dot(&self.up)),
            depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn x_camera() -> Camera {
        Camera::new(
            Point3::origin(),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        )
        .unwrap()
    }

    #[test]
    fn test_frame_is_orthonormal() {
        let cam = Camera::new(
            Point3::new(1.0, 2.0, 3.0),
            Vec3::new(1.0, 1.0, -0.5),
            Vec3::new(0.0, 0.3, 1.0),
        )
        .unwrap();
        for v in [cam.into_axis(), cam.right(), cam.up()] {
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-12);
        }
        assert!(cam.into_axis().dot(&cam.right()).abs() < 1e-12);
        assert!(cam.into_axis().dot(&cam.up()).abs() < 1e-12);
        assert!(cam.right().dot(&cam.up()).abs() < 1e-12);
    }

    #[test]
    fn test_frame_is_left_handed() {
        let cam = x_camera();
        // Looking along +X with +Z up puts +Y on the left.
        assert_relative_eq!(cam.right(), Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(cam.up(), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert!(cam.right().cross(&cam.up()).dot(&cam.into_axis()) < 0.0);
    }

    #[test]
    fn test_project_on_axis() {
        let rec = x_camera().project(&Point3::new(2.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(rec.depth, 2.0);
        assert_relative_eq!(rec.projected.x, 0.0);
        assert_relative_eq!(rec.projected.y, 0.0);
        assert_eq!(rec.point, Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_project_unit_depth_maps_to_itself() {
        let rec = x_camera().project(&Point3::new(1.0, -0.25, 0.5)).unwrap();
        assert_relative_eq!(rec.depth, 1.0);
        assert_relative_eq!(rec.projected.x, 0.25);
        assert_relative_eq!(rec.projected.y, 0.5);
    }

    #[test]
    fn test_project_perspective_divide() {
        let cam = x_camera();
        let near = cam.project(&Point3::new(2.0, 0.0, 1.0)).unwrap();
        let far = cam.project(&Point3::new(4.0, 0.0, 1.0)).unwrap();
        assert_relative_eq!(near.projected.y, 0.5);
        assert_relative_eq!(far.projected.y, 0.25);
    }

    #[test]
    fn test_project_zero_depth_fails() {
        let err = x_camera().project(&Point3::new(0.0, 3.0, 1.0)).unwrap_err();
        assert!(matches!(err, HlrError::DegenerateProjection { .. }));
    }

    #[test]
    fn test_degenerate_cameras() {
        let o = Point3::origin();
        let z = Vec3::new(0.0, 0.0, 1.0);
        assert!(matches!(
            Camera::new(o, Vec3::zeros(), z),
            Err(HlrError::DegenerateCamera(_))
        ));
        assert!(matches!(
            Camera::new(o, z, Vec3::zeros()),
            Err(HlrError::DegenerateCamera(_))
        ));
        assert!(matches!(
            Camera::new(o, Vec3::new(0.0, 0.0, -3.0), z),
            Err(HlrError::DegenerateCamera(_))
        ));
    }
}
