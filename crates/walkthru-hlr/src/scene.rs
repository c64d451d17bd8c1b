//! Walk-through scene description: camera shots and object placements.
//!
//! Positions and directions are stored as arrays so scene files serialize
//! without nalgebra's serde feature; accessors return math types.

use serde::{Deserialize, Serialize};
use walkthru_math::{Point3, Transform, Vec3};

/// Smallest scale a placement may have.
pub const MIN_PLACEMENT_SCALE: f64 = 0.1;

/// One camera placement in the walk-through, rendered as one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Camera center [x, y, z].
    pub position: [f64; 3],
    /// Facing direction [x, y, z].
    pub direction: [f64; 3],
}

impl Shot {
    /// Create a new shot.
    pub fn new(position: Point3, direction: Vec3) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            direction: [direction.x, direction.y, direction.z],
        }
    }

    /// Get position as Point3.
    pub fn position_point(&self) -> Point3 {
        Point3::from(self.position)
    }

    /// Get direction as Vec3.
    pub fn direction_vec(&self) -> Vec3 {
        Vec3::from(self.direction)
    }
}

/// Rectangular extent of the scene floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneBounds {
    /// Minimum X.
    pub left: f64,
    /// Maximum X.
    pub right: f64,
    /// Minimum Y.
    pub bottom: f64,
    /// Maximum Y.
    pub top: f64,
}

impl SceneBounds {
    /// Largest base radius that fits inside the bounds, never below the minimum scale.
    pub fn max_scale(&self) -> f64 {
        (0.5 * (self.right - self.left))
            .min(0.5 * (self.top - self.bottom))
            .max(MIN_PLACEMENT_SCALE)
    }
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self {
            left: -10.0,
            right: 10.0,
            bottom: -10.0,
            top: 10.0,
        }
    }
}

/// A library object positioned, sized, and spun within the scene.
///
/// The object's circular base (radius `scale`, centered on `position`)
/// is kept inside the scene bounds by the editing operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Library name of the prototype.
    pub name: String,
    /// Base center [x, y, z].
    pub position: [f64; 3],
    /// Uniform scale, also the radius of the base circle.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Spin about the vertical axis, in degrees.
    #[serde(default)]
    pub orientation: f64,
}

fn default_scale() -> f64 {
    MIN_PLACEMENT_SCALE
}

impl Placement {
    /// Place `name` at `position` with the minimum scale and no spin.
    pub fn new(name: impl Into<String>, position: Point3) -> Self {
        Self {
            name: name.into(),
            position: [position.x, position.y, position.z],
            scale: MIN_PLACEMENT_SCALE,
            orientation: 0.0,
        }
    }

    /// Set the scale (no smaller than the minimum) without bounds checks.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale.max(MIN_PLACEMENT_SCALE);
        self
    }

    /// Set the orientation in degrees.
    pub fn with_orientation(mut self, degrees: f64) -> Self {
        self.orientation = degrees;
        self
    }

    /// Get position as Point3.
    pub fn position_point(&self) -> Point3 {
        Point3::from(self.position)
    }

    /// Resize, keeping the base inside `bounds`.
    ///
    /// The scale never drops below [`MIN_PLACEMENT_SCALE`]; when the base
    /// sits closer than that to a bound it is pushed back inside.
    pub fn resize(&mut self, scale: f64, bounds: &SceneBounds) {
        let [x, y, _] = self.position;
        let room = (bounds.right - x)
            .min(bounds.top - y)
            .min(x - bounds.left)
            .min(y - bounds.bottom);
        self.scale = scale.min(room).max(MIN_PLACEMENT_SCALE);
        if room < self.scale {
            self.move_to(self.position_point(), bounds);
        }
    }

    /// Relocate, keeping the base inside `bounds`.
    ///
    /// On an axis too narrow for the base, the base is centered on that axis.
    pub fn move_to(&mut self, position: Point3, bounds: &SceneBounds) {
        let x = clamp_axis(position.x, bounds.left, bounds.right, self.scale);
        let y = clamp_axis(position.y, bounds.bottom, bounds.top, self.scale);
        self.position = [x, y, position.z];
    }

    /// Spin further by `degrees`.
    pub fn rotate_by(&mut self, degrees: f64) {
        self.orientation += degrees;
    }

    /// Whether `point` lies strictly inside the base circle (planar distance).
    pub fn base_includes(&self, point: &Point3) -> bool {
        let dx = point.x - self.position[0];
        let dy = point.y - self.position[1];
        dx * dx + dy * dy < self.scale * self.scale
    }

    /// Prototype-to-scene transform: scale, then spin about Z, then translate.
    pub fn transform(&self) -> Transform {
        let [x, y, z] = self.position;
        Transform::translation(x, y, z)
            .then(&Transform::rotation_z(self.orientation.to_radians()))
            .then(&Transform::uniform_scale(self.scale))
    }
}

fn clamp_axis(value: f64, low: f64, high: f64, radius: f64) -> f64 {
    if high - low <= 2.0 * radius {
        0.5 * (low + high)
    } else {
        value.clamp(low + radius, high - radius)
    }
}

/// A scripted walk-through: shots in viewing order and the objects they see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkThru {
    /// Camera shots, one page each, in order.
    #[serde(default)]
    pub shots: Vec<Shot>,
    /// Placed library objects, in drawing order.
    #[serde(default)]
    pub placements: Vec<Placement>,
    /// Floor extent used when editing placements.
    #[serde(default)]
    pub bounds: SceneBounds,
}

impl WalkThru {
    /// An empty scene with a single shot at the origin facing +X.
    pub fn new() -> Self {
        Self {
            shots: vec![Shot::new(Point3::origin(), Vec3::x())],
            placements: Vec::new(),
            bounds: SceneBounds::default(),
        }
    }

    /// An empty scene with no shots.
    pub fn empty() -> Self {
        Self {
            shots: Vec::new(),
            placements: Vec::new(),
            bounds: SceneBounds::default(),
        }
    }

    /// Append a shot.
    pub fn add_shot(&mut self, shot: Shot) {
        self.shots.push(shot);
    }

    /// Append a placement.
    pub fn add_placement(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// Re-apply the bounds invariant to every placement.
    pub fn clamp_placements(&mut self) {
        let bounds = self.bounds;
        for placement in &mut self.placements {
            placement.scale = placement.scale.min(bounds.max_scale()).max(MIN_PLACEMENT_SCALE);
            let position = placement.position_point();
            placement.move_to(position, &bounds);
            placement.resize(placement.scale, &bounds);
        }
    }
}

impl Default for WalkThru {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_bounds() -> SceneBounds {
        SceneBounds {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
        }
    }

    #[test]
    fn test_new_walk_thru_has_default_shot() {
        let walk = WalkThru::new();
        assert_eq!(walk.shots.len(), 1);
        assert_eq!(walk.shots[0].position_point(), Point3::origin());
        assert_eq!(walk.shots[0].direction_vec(), Vec3::x());
        assert!(walk.placements.is_empty());
    }

    #[test]
    fn test_resize_clamps_to_nearest_bound() {
        let mut p = Placement::new("cube", Point3::new(0.5, 0.0, 0.0));
        p.resize(2.0, &unit_bounds());
        assert_relative_eq!(p.scale, 0.5);

        p.resize(0.01, &unit_bounds());
        assert_relative_eq!(p.scale, MIN_PLACEMENT_SCALE);
    }

    #[test]
    fn test_move_to_keeps_base_inside() {
        let mut p = Placement::new("cube", Point3::origin()).with_scale(0.25);
        p.move_to(Point3::new(5.0, -5.0, 0.5), &unit_bounds());
        assert_relative_eq!(p.position[0], 0.75);
        assert_relative_eq!(p.position[1], -0.75);
        assert_relative_eq!(p.position[2], 0.5);
    }

    #[test]
    fn test_rotate_by_accumulates() {
        let mut p = Placement::new("cube", Point3::origin());
        p.rotate_by(30.0);
        p.rotate_by(15.0);
        assert_relative_eq!(p.orientation, 45.0);
    }

    #[test]
    fn test_base_includes() {
        let p = Placement::new("cube", Point3::new(1.0, 1.0, 0.0)).with_scale(0.5);
        assert!(p.base_includes(&Point3::new(1.2, 1.2, 9.0)));
        assert!(!p.base_includes(&Point3::new(1.5, 1.0, 0.0)));
    }

    #[test]
    fn test_transform_scales_spins_then_translates() {
        let p = Placement::new("triangle", Point3::new(2.0, 1.0, 0.0))
            .with_scale(0.5)
            .with_orientation(90.0);
        let q = p.transform().apply_point(&Point3::new(1.0, 0.0, 1.0));
        assert_relative_eq!(q, Point3::new(2.0, 1.5, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_clamp_placements() {
        let mut walk = WalkThru::new();
        walk.bounds = unit_bounds();
        walk.add_placement(Placement::new("cube", Point3::new(3.0, 0.0, 0.0)).with_scale(0.5));
        walk.clamp_placements();
        let p = &walk.placements[0];
        assert_relative_eq!(p.position[0], 0.5);
        assert_relative_eq!(p.scale, 0.5);
    }

    #[test]
    fn test_resize_near_bound_keeps_minimum_scale() {
        let mut p = Placement::new("cube", Point3::new(0.95, 0.0, 0.0));
        p.resize(0.5, &unit_bounds());
        assert_relative_eq!(p.scale, MIN_PLACEMENT_SCALE);
        assert_relative_eq!(p.position[0], 1.0 - MIN_PLACEMENT_SCALE);

        let mut outside = Placement::new("cube", Point3::new(-3.0, 2.0, 0.0));
        outside.resize(0.5, &unit_bounds());
        assert_relative_eq!(outside.scale, MIN_PLACEMENT_SCALE);
        assert_relative_eq!(outside.position[0], -1.0 + MIN_PLACEMENT_SCALE);
        assert_relative_eq!(outside.position[1], 1.0 - MIN_PLACEMENT_SCALE);
    }

    #[test]
    fn test_clamp_oversized_placement() {
        let mut walk = WalkThru::new();
        walk.bounds = unit_bounds();
        walk.add_placement(Placement::new("cube", Point3::origin()).with_scale(3.0));
        walk.clamp_placements();
        let p = &walk.placements[0];
        assert_relative_eq!(p.scale, 1.0);
        assert_relative_eq!(p.position[0], 0.0);
        assert_relative_eq!(p.position[1], 0.0);
    }

    #[test]
    fn test_bounds_narrower_than_minimum_center_the_base() {
        let bounds = SceneBounds {
            left: 0.0,
            right: 0.1,
            bottom: -1.0,
            top: 1.0,
        };
        assert_relative_eq!(bounds.max_scale(), MIN_PLACEMENT_SCALE);

        let mut p = Placement::new("cube", Point3::new(4.0, 0.5, 0.0));
        p.move_to(Point3::new(4.0, 0.5, 0.0), &bounds);
        assert_relative_eq!(p.position[0], 0.05);
        assert_relative_eq!(p.position[1], 0.5);
        assert!(p.scale >= MIN_PLACEMENT_SCALE);
    }
}
