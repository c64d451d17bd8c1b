//! Error types for projection and hidden-line removal.

use thiserror::Error;

/// Errors that can occur while building cameras, instancing prototypes,
/// or projecting scene geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HlrError {
    /// The camera frame cannot be built from the given direction and up hint.
    #[error("degenerate camera: {0}")]
    DegenerateCamera(String),

    /// A point lies in the plane through the camera center perpendicular to
    /// the view direction, so its perspective divide is undefined.
    #[error("point ({x}, {y}, {z}) projects at zero depth")]
    DegenerateProjection {
        /// X coordinate of the offending point.
        x: f64,
        /// Y coordinate of the offending point.
        y: f64,
        /// Z coordinate of the offending point.
        z: f64,
    },

    /// A placement names a prototype that the object library does not have.
    #[error("unknown prototype '{0}'")]
    UnknownPrototype(String),

    /// Prototype topology references vertices that do not exist.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Result type for hidden-line operations.
pub type Result<T> = std::result::Result<T, HlrError>;
