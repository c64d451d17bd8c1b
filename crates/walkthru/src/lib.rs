#![warn(missing_docs)]

//! walkthru: perspective walk-throughs drawn as hidden-line pages
//!
//! Loads a scene (shots, placements, and custom prototypes) from TOML or
//! JSON, renders one page per shot with hidden lines removed, and exports
//! the pages as SVG, DXF R12, or a JSON command log.
//!
//! # Example
//!
//! ```rust,no_run
//! use walkthru::{DrawingDocument, SceneFile};
//!
//! let scene = SceneFile::load("tour.toml").unwrap();
//! let mut doc = DrawingDocument::new();
//! let report = scene.render(&mut doc);
//! doc.write_svg_pages("out").unwrap();
//! println!("{} pages, {} lines", report.pages, report.lines_drawn);
//! ```

use thiserror::Error;

pub mod export;
pub mod scene_file;

pub use walkthru_hlr::*;
pub use walkthru_math as math;

pub use export::{DrawingDocument, DrawingPage};
pub use scene_file::{PrototypeSpec, SceneFile};

/// Errors from loading scenes and writing drawings.
#[derive(Error, Debug)]
pub enum WalkThruError {
    /// An I/O error occurred reading a scene or writing pages.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The scene file is not valid TOML for a scene.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    /// The scene file is not valid JSON for a scene, or pages failed to serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A custom prototype has invalid geometry.
    #[error("prototype `{name}`: {source}")]
    Prototype {
        /// Name of the prototype in the scene file.
        name: String,
        /// What is wrong with it.
        source: HlrError,
    },
    /// The scene file extension is neither `.toml` nor `.json`.
    #[error("unsupported scene format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for scene loading and export.
pub type Result<T> = std::result::Result<T, WalkThruError>;
